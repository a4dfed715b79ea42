//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipbundle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack files and directories into a zip archive
    Create(CreateArgs),
    /// Print the HTTP download headers for an archive
    Headers(HeadersArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Output archive path (must end with .zip) or an existing directory
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Archive file name when OUTPUT is a directory
    /// [default: first source name + .zip]
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Source files or directories to archive
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Only add the files directly inside source directories
    #[arg(long, conflicts_with_all = ["depth", "files_only"])]
    pub shallow: bool,

    /// Only add entries exactly N levels below each source directory
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Do not add directory entries
    #[arg(long)]
    pub files_only: bool,

    /// Skip files and directories whose name starts with a dot
    #[arg(long)]
    pub ignore_dot_entries: bool,

    /// Strip this prefix from entry names (only if every entry matches)
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<PathBuf>,

    /// Compression level (0 = store, 1-9 = deflate)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,

    /// Copy unix permissions of source files into the archive
    #[arg(long)]
    pub preserve_permissions: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct HeadersArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Use an inline disposition instead of attachment
    #[arg(long)]
    pub inline: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
