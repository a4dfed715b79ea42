//! ZIP archive writing.
//!
//! Turns an ordered list of stored paths into a zip file. Every entry gets
//! the zip epoch as modification time, so identical inputs always produce
//! identical archives.

use crate::ArchiverError;
use crate::ProgressCallback;
use crate::Result;
use crate::config::ArchiverConfig;
use crate::error::zip_failure;
use crate::naming::directory_entry_name;
use crate::naming::entry_name;
use crate::report::BuildReport;
use std::fs;
use std::fs::File;
use std::fs::Metadata;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const FILE_MODE: u32 = 0o644;
const DIR_MODE: u32 = 0o755;
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Builds the base entry options for `config`.
pub(crate) fn entry_options(config: &ArchiverConfig) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().last_modified_time(DateTime::default());

    match config.effective_compression_level() {
        0 => options.compression_method(CompressionMethod::Stored),
        level => options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level))),
    }
}

/// Writes a one-entry archive into memory to confirm the codec works.
///
/// # Errors
///
/// Returns [`ArchiverError::Environment`] if the zip writer rejects the
/// configured options.
pub(crate) fn probe(options: SimpleFileOptions) -> Result<()> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("probe", options).map_err(unavailable)?;
    zip.write_all(b"probe").map_err(unavailable)?;
    zip.finish().map_err(unavailable)?;

    Ok(())
}

fn unavailable(err: impl std::fmt::Display) -> ArchiverError {
    ArchiverError::Environment(err.to_string())
}

/// Writes `paths` into a new archive at `destination`, truncating any
/// existing file.
///
/// Directories become `name/` markers, files are copied in full. Paths whose
/// entry name is empty (the strip prefix itself) are skipped.
///
/// Every name and source is checked before the destination is opened, so a
/// vanished source or a bad name leaves an existing destination untouched.
///
/// # Errors
///
/// Returns an error if a stored path vanished, a name is not UTF-8, or any
/// write fails.
pub(crate) fn write_archive(
    destination: &Path,
    paths: &[PathBuf],
    strip_prefix: Option<&Path>,
    config: &ArchiverConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<BuildReport> {
    let mut report = BuildReport {
        prefix_stripped: strip_prefix.is_some(),
        ..BuildReport::default()
    };

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let name = entry_name(path, strip_prefix)?;
        if name.is_empty() {
            tracing::debug!(path = %path.display(), "skipping entry with empty name");
            report.entries_skipped += 1;
            continue;
        }
        entries.push((path, name, source_metadata(path)?));
    }

    let file = File::create(destination)?;
    let mut zip = ZipWriter::new(file);
    let options = entry_options(config);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let total = entries.len();

    for (idx, (path, name, metadata)) in entries.iter().enumerate() {
        let display_name = Path::new(name.as_str());
        progress.on_entry_start(display_name, total, idx + 1);

        if metadata.is_dir() {
            let dir_name = directory_entry_name(name);
            let dir_options = options.unix_permissions(mode_for(metadata, config, DIR_MODE));
            zip.add_directory(dir_name.as_str(), dir_options)
                .map_err(|e| zip_failure("add directory", &e))?;
            tracing::trace!(entry = %dir_name, "added directory");
            report.directories_added += 1;
        } else {
            let file_options = options.unix_permissions(mode_for(metadata, config, FILE_MODE));
            zip.start_file(name.as_str(), file_options)
                .map_err(|e| zip_failure("start file in ZIP", &e))?;
            let copied = copy_file(&mut zip, path, &mut buffer, progress)?;
            tracing::trace!(entry = %name, bytes = copied, "added file");
            report.files_added += 1;
            report.bytes_read += copied;
        }

        progress.on_entry_complete(display_name);
    }

    zip.finish()
        .map_err(|e| zip_failure("finish ZIP archive", &e))?;
    report.archive_size = fs::metadata(destination)?.len();

    progress.on_complete();

    Ok(report)
}

/// Reads metadata of a stored path, reporting a vanished path as not found.
fn source_metadata(path: &Path) -> Result<Metadata> {
    fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArchiverError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArchiverError::Io(e)
        }
    })
}

/// Copies a file's content into the current zip entry.
fn copy_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    buffer: &mut [u8],
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut file = File::open(path)?;
    let mut copied = 0u64;

    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        copied += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(copied)
}

#[cfg(unix)]
fn mode_for(metadata: &Metadata, config: &ArchiverConfig, fixed: u32) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    if config.preserve_permissions {
        metadata.permissions().mode() & 0o7777
    } else {
        fixed
    }
}

#[cfg(not(unix))]
fn mode_for(_metadata: &Metadata, _config: &ArchiverConfig, fixed: u32) -> u32 {
    fixed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use tempfile::TempDir;

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_probe_accepts_default_options() {
        assert!(probe(entry_options(&ArchiverConfig::default())).is_ok());
        assert!(probe(entry_options(&ArchiverConfig::default().with_compression_level(0))).is_ok());
    }

    #[test]
    fn test_write_archive_entries_in_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        fs::create_dir_all(root.join("css")).unwrap();
        fs::write(root.join("css/app.css"), "body {}").unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();

        let paths = vec![root.join("index.html"), root.join("css"), root.join("css/app.css")];
        let output = temp.path().join("out.zip");

        let report = write_archive(
            &output,
            &paths,
            Some(root.as_path()),
            &ArchiverConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(report.files_added, 2);
        assert_eq!(report.directories_added, 1);
        assert_eq!(report.bytes_read, 20);
        assert!(report.prefix_stripped);
        assert_eq!(report.archive_size, fs::metadata(&output).unwrap().len());
        assert_eq!(entry_names(&output), ["index.html", "css/", "css/app.css"]);
    }

    #[test]
    fn test_write_archive_skips_prefix_itself() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let output = temp.path().join("out.zip");
        let report = write_archive(
            &output,
            &[root.clone(), root.join("a.txt")],
            Some(root.as_path()),
            &ArchiverConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(report.entries_skipped, 1);
        assert_eq!(entry_names(&output), ["a.txt"]);
    }

    #[test]
    fn test_write_archive_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "same content").unwrap();
        let paths = vec![root.join("a.txt")];

        let first = temp.path().join("first.zip");
        let second = temp.path().join("second.zip");
        let config = ArchiverConfig::default();
        write_archive(&first, &paths, Some(root.as_path()), &config, &mut NoopProgress).unwrap();
        write_archive(&second, &paths, Some(root.as_path()), &config, &mut NoopProgress).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_write_archive_stored_method() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "a".repeat(1000)).unwrap();

        let output = temp.path().join("out.zip");
        let config = ArchiverConfig::default().with_compression_level(0);
        write_archive(&output, &[source], Some(temp.path()), &config, &mut NoopProgress).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Stored);
        assert_eq!(entry.size(), 1000);
    }

    #[test]
    fn test_write_archive_vanished_source() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("a.txt");
        fs::write(&present, "a").unwrap();
        let output = temp.path().join("out.zip");
        fs::write(&output, "previous archive").unwrap();

        let result = write_archive(
            &output,
            &[present, temp.path().join("gone.txt")],
            Some(temp.path()),
            &ArchiverConfig::default(),
            &mut NoopProgress,
        );
        assert!(matches!(result, Err(ArchiverError::NotFound { .. })));
        assert_eq!(fs::read(&output).unwrap(), b"previous archive");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_archive_fixed_and_preserved_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run.sh");
        fs::write(&source, "#!/bin/sh").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o755)).unwrap();

        let fixed = temp.path().join("fixed.zip");
        write_archive(
            &fixed,
            &[source.clone()],
            Some(temp.path()),
            &ArchiverConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();
        let mut zip = zip::ZipArchive::new(File::open(&fixed).unwrap()).unwrap();
        assert_eq!(zip.by_index(0).unwrap().unix_mode().unwrap() & 0o777, 0o644);

        let preserved = temp.path().join("preserved.zip");
        let config = ArchiverConfig::default().with_preserve_permissions(true);
        write_archive(&preserved, &[source], Some(temp.path()), &config, &mut NoopProgress)
            .unwrap();
        let mut zip = zip::ZipArchive::new(File::open(&preserved).unwrap()).unwrap();
        assert_eq!(zip.by_index(0).unwrap().unix_mode().unwrap() & 0o777, 0o755);
    }
}
