//! Error types for archive building and delivery.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiverError`.
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Errors that can occur while collecting, building, or delivering archives.
#[derive(Error, Debug)]
pub enum ArchiverError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file or directory does not exist (or has the wrong type).
    #[error("file or folder not found: {path}")]
    NotFound {
        /// The path that could not be found.
        path: PathBuf,
    },

    /// The destination does not carry the `.zip` extension.
    #[error("invalid archive destination (expected *.zip): {path}")]
    InvalidDestination {
        /// The rejected destination path.
        path: PathBuf,
    },

    /// The destination's parent directory does not exist.
    #[error("destination directory not found: {path}")]
    DestinationNotFound {
        /// The missing parent directory.
        path: PathBuf,
    },

    /// The zip capability is not usable with the requested settings.
    #[error("zip archiving unavailable: {0}")]
    Environment(String),

    /// An entry name cannot be represented in the archive.
    #[error("path is not valid UTF-8: {path}")]
    InvalidEntryName {
        /// The offending source path.
        path: PathBuf,
    },

    /// Compression level outside 0-9.
    #[error("invalid compression level {level}, must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl ArchiverError {
    /// Returns `true` if this error was caused by the build destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipbundle_core::ArchiverError;
    ///
    /// let err = ArchiverError::InvalidDestination {
    ///     path: PathBuf::from("archive.tar"),
    /// };
    /// assert!(err.is_destination_error());
    ///
    /// let err = ArchiverError::NotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(!err.is_destination_error());
    /// ```
    #[must_use]
    pub const fn is_destination_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDestination { .. } | Self::DestinationNotFound { .. }
        )
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::InvalidDestination { path }
            | Self::DestinationNotFound { path }
            | Self::InvalidEntryName { path } => Some(path),
            _ => None,
        }
    }
}

/// Wraps a `zip` crate error into an I/O error with context.
pub(crate) fn zip_failure(action: &str, err: &zip::result::ZipError) -> ArchiverError {
    ArchiverError::Io(std::io::Error::other(format!("failed to {action}: {err}")))
}
