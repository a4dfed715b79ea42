//! The archiver: collects source paths and builds zip archives from them.

use crate::ArchiverError;
use crate::ProgressCallback;
use crate::Result;
use crate::config::ArchiverConfig;
use crate::naming::effective_strip_prefix;
use crate::progress::NoopProgress;
use crate::report::BuildReport;
use crate::storage::Storage;
use crate::walker;
use crate::walker::Depth;
use crate::writer;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Extension every build destination must carry.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Collects files and directories and packs them into a zip archive.
///
/// Add-operations canonicalize and deduplicate paths into the storage.
/// [`build`](Self::build) writes the archive and resets the storage and
/// strip prefix so the instance can be reused.
///
/// # Examples
///
/// ```no_run
/// use zipbundle_core::Archiver;
/// use zipbundle_core::Depth;
///
/// let mut archiver = Archiver::new()?;
/// archiver
///     .set_ignore_dot_entries(true)
///     .add_directory_recursive("files/theme", Depth::Unlimited, false)?
///     .set_strip_prefix("files/theme");
///
/// if archiver.build("/tmp/theme.zip")? {
///     println!("archive written");
/// }
/// # Ok::<(), zipbundle_core::ArchiverError>(())
/// ```
#[derive(Debug)]
pub struct Archiver {
    storage: Storage,
    strip_prefix: Option<PathBuf>,
    ignore_dot_entries: bool,
    config: ArchiverConfig,
    archive_name: Option<String>,
    first_source: Option<PathBuf>,
}

impl Archiver {
    /// Creates an archiver with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::Environment`] if zip archives cannot be
    /// written.
    pub fn new() -> Result<Self> {
        Self::with_config(ArchiverConfig::default())
    }

    /// Creates an archiver with the given configuration.
    ///
    /// The configuration is validated and the zip codec is probed once with
    /// the resulting entry options.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::InvalidCompressionLevel`] for an invalid
    /// config and [`ArchiverError::Environment`] if the probe fails.
    pub fn with_config(config: ArchiverConfig) -> Result<Self> {
        config.validate()?;
        writer::probe(writer::entry_options(&config))?;

        Ok(Self {
            storage: Storage::new(),
            strip_prefix: None,
            ignore_dot_entries: config.ignore_dot_entries,
            config,
            archive_name: None,
            first_source: None,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ArchiverConfig {
        &self.config
    }

    /// Adds a single regular file.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] if `path` is not an existing
    /// regular file.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(not_found(path));
        }

        let canonical = path.canonicalize()?;
        self.remember_source(&canonical);
        let added = self.storage.insert(canonical);
        tracing::debug!(path = %path.display(), added, "add file");

        Ok(self)
    }

    /// Adds the regular files directly inside a directory.
    ///
    /// Subdirectories are ignored. Dot-entries are skipped when the
    /// dot-entry flag is set.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] if `path` is not an existing
    /// directory, or an I/O error if it cannot be listed.
    pub fn add_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let root = existing_directory(path.as_ref())?;
        let files = walker::collect_shallow(&root, self.ignore_dot_entries)?;
        let added = self.storage.extend(files);
        self.remember_source(&root);
        tracing::debug!(root = %root.display(), added, "add directory");

        Ok(self)
    }

    /// Adds the contents of a directory tree.
    ///
    /// `depth` selects which levels are added, `files_only` leaves
    /// directories out. The root itself is never added.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] if `path` is not an existing
    /// directory, or an I/O error if the tree cannot be read. Storage is
    /// unchanged on error.
    pub fn add_directory_recursive<P: AsRef<Path>>(
        &mut self,
        path: P,
        depth: Depth,
        files_only: bool,
    ) -> Result<&mut Self> {
        let root = existing_directory(path.as_ref())?;
        let paths =
            walker::collect_recursive(&root, depth, files_only, self.ignore_dot_entries)?;
        let added = self.storage.extend(paths);
        self.remember_source(&root);
        tracing::debug!(
            root = %root.display(),
            ?depth,
            files_only,
            added,
            "add directory recursively"
        );

        Ok(self)
    }

    /// Sets the prefix to strip from entry names.
    ///
    /// Not validated until [`build`](Self::build), where it only applies if
    /// every stored path starts with it.
    pub fn set_strip_prefix<P: AsRef<Path>>(&mut self, prefix: P) -> &mut Self {
        self.strip_prefix = Some(prefix.as_ref().to_path_buf());
        self
    }

    /// Returns the current strip prefix.
    #[must_use]
    pub fn strip_prefix(&self) -> Option<&Path> {
        self.strip_prefix.as_deref()
    }

    /// Sets whether subsequent add-operations skip dot-entries.
    pub fn set_ignore_dot_entries(&mut self, ignore: bool) -> &mut Self {
        self.ignore_dot_entries = ignore;
        self
    }

    /// Returns whether dot-entries are skipped.
    #[must_use]
    pub fn ignores_dot_entries(&self) -> bool {
        self.ignore_dot_entries
    }

    /// Returns the stored paths in insertion order.
    #[must_use]
    pub fn storage(&self) -> &[PathBuf] {
        self.storage.as_slice()
    }

    /// Clears the storage. The strip prefix and archive name are kept.
    pub fn purge_storage(&mut self) -> &mut Self {
        self.storage.clear();
        self.first_source = None;
        self
    }

    /// Sets the file name used by [`build_into`](Self::build_into).
    ///
    /// Without one, the archive is named after the first added source.
    pub fn set_archive_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.archive_name = Some(name.into());
        self
    }

    /// Returns the archive file name set with
    /// [`set_archive_name`](Self::set_archive_name).
    #[must_use]
    pub fn archive_name(&self) -> Option<&str> {
        self.archive_name.as_deref()
    }

    /// Resolves the archive path [`build_into`](Self::build_into) would write
    /// inside `dir`.
    ///
    /// The explicit archive name wins; otherwise the file name of the first
    /// added source plus `.zip` is used. Returns `None` when neither exists.
    #[must_use]
    pub fn archive_path_in(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(name) = &self.archive_name {
            return Some(dir.join(name));
        }

        let mut name = self.first_source.as_deref()?.file_name()?.to_os_string();
        name.push(ARCHIVE_EXTENSION);
        Some(dir.join(name))
    }

    /// Builds the archive inside the directory `dir`.
    ///
    /// The file name comes from [`archive_path_in`](Self::archive_path_in).
    /// Returns the written path, or `Ok(None)` when the storage is empty.
    /// The archive name is cleared together with the storage after a
    /// successful build.
    ///
    /// # Errors
    ///
    /// - [`ArchiverError::DestinationNotFound`] if `dir` is not an existing
    ///   directory
    /// - [`ArchiverError::InvalidDestination`] if no name can be derived or
    ///   the name does not end with `.zip`
    /// - the errors of [`build`](Self::build)
    pub fn build_into<P: AsRef<Path>>(&mut self, dir: P) -> Result<Option<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ArchiverError::DestinationNotFound {
                path: dir.to_path_buf(),
            });
        }

        let Some(destination) = self.archive_path_in(dir) else {
            if self.storage.is_empty() {
                return Ok(None);
            }
            return Err(ArchiverError::InvalidDestination {
                path: dir.to_path_buf(),
            });
        };

        Ok(self.build(&destination)?.then_some(destination))
    }

    /// Builds the archive at `destination`.
    ///
    /// Returns `Ok(false)` without touching the filesystem when the storage is
    /// empty, `Ok(true)` once the archive is written. After a successful build
    /// the storage and strip prefix are cleared.
    ///
    /// # Errors
    ///
    /// - [`ArchiverError::InvalidDestination`] if `destination` does not end
    ///   with `.zip`
    /// - [`ArchiverError::DestinationNotFound`] if its parent directory is
    ///   missing
    /// - I/O errors while writing; the file at `destination` is then
    ///   indeterminate
    pub fn build<P: AsRef<Path>>(&mut self, destination: P) -> Result<bool> {
        self.build_with_progress(destination, &mut NoopProgress)
            .map(|report| report.is_some())
    }

    /// Builds the archive, reporting progress and returning statistics.
    ///
    /// Behaves like [`build`](Self::build); `Ok(None)` is the empty-storage
    /// no-op.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_progress<P: AsRef<Path>>(
        &mut self,
        destination: P,
        progress: &mut dyn ProgressCallback,
    ) -> Result<Option<BuildReport>> {
        let destination = destination.as_ref();
        validate_destination(destination)?;

        if self.storage.is_empty() {
            tracing::debug!(destination = %destination.display(), "storage empty, build skipped");
            return Ok(None);
        }

        let start = Instant::now();
        let prefix = effective_strip_prefix(self.strip_prefix.as_deref(), self.storage.as_slice());
        if prefix.is_none()
            && let Some(requested) = &self.strip_prefix
        {
            tracing::warn!(
                prefix = %requested.display(),
                "strip prefix does not match every stored path, keeping full paths"
            );
        }

        let mut report = writer::write_archive(
            destination,
            self.storage.as_slice(),
            prefix.as_deref(),
            &self.config,
            progress,
        )?;
        report.duration = start.elapsed();

        tracing::debug!(
            destination = %destination.display(),
            files = report.files_added,
            directories = report.directories_added,
            bytes = report.archive_size,
            "archive built"
        );

        self.reset();
        Ok(Some(report))
    }

    fn remember_source(&mut self, path: &Path) {
        if self.first_source.is_none() {
            self.first_source = Some(path.to_path_buf());
        }
    }

    fn reset(&mut self) {
        self.storage.clear();
        self.strip_prefix = None;
        self.archive_name = None;
        self.first_source = None;
    }
}

fn existing_directory(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(not_found(path));
    }
    Ok(path.canonicalize()?)
}

fn not_found(path: &Path) -> ArchiverError {
    ArchiverError::NotFound {
        path: path.to_path_buf(),
    }
}

/// Checks the `.zip` suffix and the parent directory of a destination.
///
/// # Errors
///
/// Returns [`ArchiverError::InvalidDestination`] or
/// [`ArchiverError::DestinationNotFound`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipbundle_core::ArchiverError;
/// use zipbundle_core::archiver::validate_destination;
///
/// assert!(matches!(
///     validate_destination(Path::new("archive.tar")),
///     Err(ArchiverError::InvalidDestination { .. })
/// ));
/// assert!(matches!(
///     validate_destination(Path::new("/nonexistent-dir/out.zip")),
///     Err(ArchiverError::DestinationNotFound { .. })
/// ));
/// ```
pub fn validate_destination(destination: &Path) -> Result<()> {
    let has_extension = destination
        .to_str()
        .is_some_and(|s| s.ends_with(ARCHIVE_EXTENSION));
    if !has_extension {
        return Err(ArchiverError::InvalidDestination {
            path: destination.to_path_buf(),
        });
    }

    // A bare file name lives in the current directory.
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.is_dir() {
        return Err(ArchiverError::DestinationNotFound {
            path: parent.to_path_buf(),
        });
    }

    Ok(())
}
