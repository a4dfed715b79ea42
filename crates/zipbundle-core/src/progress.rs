//! Progress reporting for archive builds.

use std::path::Path;

/// Receives progress events while an archive is being written.
///
/// Events for one entry arrive as `on_entry_start`, zero or more
/// `on_bytes_written`, then `on_entry_complete`. `on_complete` fires once
/// after the archive has been finalized.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipbundle_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, name: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", name.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &Path) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is written. `current` is 1-based.
    fn on_entry_start(&mut self, name: &Path, total: usize, current: usize);

    /// Called for every chunk of file content copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry was written.
    fn on_entry_complete(&mut self, name: &Path);

    /// Called once the archive is finalized.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &Path) {}

    fn on_complete(&mut self) {}
}
