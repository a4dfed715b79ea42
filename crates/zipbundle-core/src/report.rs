//! Archive build reporting.

use std::time::Duration;

/// Statistics of a completed archive build.
///
/// # Examples
///
/// ```
/// use zipbundle_core::BuildReport;
///
/// let mut report = BuildReport::default();
/// report.files_added = 2;
/// report.directories_added = 1;
/// assert_eq!(report.total_entries(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of file entries written.
    pub files_added: usize,

    /// Number of directory markers written.
    pub directories_added: usize,

    /// Stored paths skipped because their entry name was empty.
    pub entries_skipped: usize,

    /// Uncompressed bytes copied from source files.
    pub bytes_read: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// Whether the strip prefix was applied to entry names.
    pub prefix_stripped: bool,

    /// Duration of the build.
    pub duration: Duration,
}

impl BuildReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries written to the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either size is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipbundle_core::BuildReport;
    ///
    /// let mut report = BuildReport::new();
    /// report.bytes_read = 1000;
    /// report.archive_size = 250;
    /// assert_eq!(report.compression_ratio(), 4.0);
    ///
    /// report.archive_size = 0;
    /// assert_eq!(report.compression_ratio(), 0.0);
    /// ```
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}
