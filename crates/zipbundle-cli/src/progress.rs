//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::HumanBytes;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;
use zipbundle_core::ProgressCallback;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Counts written entries against the storage size and shows the bytes
/// packed so far. Cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar for `total` entries.
    #[must_use]
    pub fn new(total: usize, message: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries {wide_msg:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, name: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message(format!(
            "Packing {} ({} read)",
            name.display(),
            HumanBytes(self.bytes_written)
        ));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _name: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
