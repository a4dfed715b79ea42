//! Configuration for archive building.

use crate::ArchiverError;
use crate::Result;

/// Compression level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for an [`Archiver`](crate::Archiver).
///
/// # Examples
///
/// ```
/// use zipbundle_core::ArchiverConfig;
///
/// let config = ArchiverConfig::default()
///     .with_compression_level(9)
///     .with_ignore_dot_entries(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiverConfig {
    /// Compression level.
    ///
    /// `Some(0)` stores entries uncompressed, `Some(1..=9)` deflates.
    /// `None` uses [`DEFAULT_COMPRESSION_LEVEL`].
    ///
    /// Default: `None`.
    pub compression_level: Option<u8>,

    /// Copy unix permission bits of source files into the archive.
    ///
    /// When disabled, files get `0o644` and directories `0o755` so that the
    /// output only depends on paths and contents.
    ///
    /// Default: `false`.
    pub preserve_permissions: bool,

    /// Initial value of the archiver's dot-entry flag.
    ///
    /// Default: `false`.
    pub ignore_dot_entries: bool,
}

impl ArchiverConfig {
    /// Creates a new `ArchiverConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level (0 = stored).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to preserve unix permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the initial dot-entry flag.
    #[must_use]
    pub fn with_ignore_dot_entries(mut self, ignore: bool) -> Self {
        self.ignore_dot_entries = ignore;
        self
    }

    /// Returns the effective compression level.
    #[must_use]
    pub fn effective_compression_level(&self) -> u8 {
        self.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::InvalidCompressionLevel`] for levels above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiverError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
