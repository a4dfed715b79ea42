//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use zipbundle_core::Archiver;
use zipbundle_core::ArchiverConfig;
use zipbundle_core::Depth;
use zipbundle_core::NoopProgress;
use zipbundle_core::ProgressCallback;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let mut config = ArchiverConfig::new()
        .with_preserve_permissions(args.preserve_permissions)
        .with_ignore_dot_entries(args.ignore_dot_entries);
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }

    let mut archiver = add_archive_context(Archiver::with_config(config), &args.output)?;

    for source in &args.sources {
        let added = if !source.is_dir() {
            archiver.add_file(source)
        } else if args.shallow {
            archiver.add_directory(source)
        } else {
            archiver.add_directory_recursive(source, Depth::from_option(args.depth), args.files_only)
        };
        add_archive_context(added, &args.output)?;
    }

    if let Some(prefix) = &args.strip_prefix {
        archiver.set_strip_prefix(prefix);
    }
    if let Some(name) = &args.name {
        archiver.set_archive_name(name.as_str());
    }

    let output = if args.output.is_dir() {
        archiver.archive_path_in(&args.output).ok_or_else(|| {
            anyhow!(
                "Cannot derive an archive name inside '{}'\n\
                 HINT: Pass --name.",
                args.output.display()
            )
        })?
    } else {
        args.output.clone()
    };

    if output.exists() && !args.force {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite it.",
            output.display()
        );
    }

    tracing::debug!(
        sources = args.sources.len(),
        entries = archiver.storage().len(),
        "sources collected"
    );

    let mut progress: Box<dyn ProgressCallback> = if !quiet && CliProgress::should_show() {
        Box::new(CliProgress::new(archiver.storage().len(), "Packing"))
    } else {
        Box::new(NoopProgress)
    };

    let built = archiver.build_with_progress(&output, progress.as_mut());
    drop(progress);

    let Some(report) = add_archive_context(built, &output)? else {
        formatter.format_warning("Nothing to archive, no file was written");
        return Ok(());
    };

    if let Some(prefix) = &args.strip_prefix
        && !report.prefix_stripped
    {
        formatter.format_warning(&format!(
            "Prefix '{}' does not match every entry, full paths were kept",
            prefix.display()
        ));
    }

    formatter.format_build_result(&output, &report)
}
