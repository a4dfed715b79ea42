//! Error conversion utilities for CLI.
//!
//! Converts zipbundle-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use zipbundle_core::ArchiverError;

/// Converts `ArchiverError` to a user-friendly anyhow error with context.
pub fn convert_archiver_error(err: ArchiverError, output: &Path) -> anyhow::Error {
    match err {
        ArchiverError::NotFound { path } => {
            anyhow!(
                "Source not found: {}\n\
                 HINT: Files must be regular files and directories must exist.",
                path.display()
            )
        }
        ArchiverError::InvalidDestination { path } => {
            anyhow!(
                "Invalid output '{}': archives must be written to a *.zip path\n\
                 HINT: The extension check is case-sensitive.",
                path.display()
            )
        }
        ArchiverError::DestinationNotFound { path } => {
            anyhow!(
                "Output directory '{}' does not exist\n\
                 HINT: Create the directory before building the archive.",
                path.display()
            )
        }
        ArchiverError::Environment(reason) => {
            anyhow!("Zip archiving is unavailable: {reason}")
        }
        ArchiverError::Io(io_err) => {
            anyhow!("I/O error while writing '{}': {}", output.display(), io_err)
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error building archive '{}'", output.display())),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiverError>,
    output: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archiver_error(e, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_not_found_error() {
        let err = ArchiverError::NotFound {
            path: PathBuf::from("/srv/missing"),
        };
        let msg = format!("{:?}", convert_archiver_error(err, Path::new("out.zip")));
        assert!(msg.contains("Source not found"));
        assert!(msg.contains("/srv/missing"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_destination() {
        let err = ArchiverError::InvalidDestination {
            path: PathBuf::from("archive.tar"),
        };
        let msg = format!("{:?}", convert_archiver_error(err, Path::new("archive.tar")));
        assert!(msg.contains("*.zip"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = ArchiverError::Io(io::Error::other("disk full"));
        let msg = format!("{:?}", convert_archiver_error(err, Path::new("out.zip")));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("out.zip"));
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let err = ArchiverError::InvalidCompressionLevel { level: 11 };
        let msg = format!("{:?}", convert_archiver_error(err, Path::new("out.zip")));
        assert!(msg.contains("Error building archive"));
        assert!(msg.contains("invalid compression level 11"));
    }
}
