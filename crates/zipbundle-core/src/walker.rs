//! Directory traversal for collecting archive candidates.
//!
//! Both collectors return the complete candidate list before the caller
//! touches its storage, so a traversal error never leaves a half-applied
//! add-operation behind. Entries are visited in lexicographic file-name order
//! with parents before their children.

use crate::ArchiverError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// How deep a recursive collection descends below its root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Depth {
    /// Every descendant at any depth.
    #[default]
    Unlimited,

    /// Only entries exactly this many levels below the root
    /// (`0` = immediate children).
    Exactly(usize),
}

impl Depth {
    /// Converts the optional CLI-style depth into a `Depth`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipbundle_core::Depth;
    ///
    /// assert_eq!(Depth::from(None), Depth::Unlimited);
    /// assert_eq!(Depth::from(Some(2)), Depth::Exactly(2));
    /// ```
    #[must_use]
    pub const fn from_option(depth: Option<usize>) -> Self {
        match depth {
            Some(n) => Self::Exactly(n),
            None => Self::Unlimited,
        }
    }

    /// Configures `walkdir` so that only entries at this depth are yielded.
    ///
    /// `walkdir` counts the root as depth 0, hence the offset by one. The
    /// offset saturates, so the root is never selected.
    fn apply(self, walker: WalkDir) -> WalkDir {
        match self {
            Self::Unlimited => walker.min_depth(1),
            Self::Exactly(n) => {
                let level = n.saturating_add(1);
                walker.min_depth(level).max_depth(level)
            }
        }
    }
}

impl From<Option<usize>> for Depth {
    fn from(depth: Option<usize>) -> Self {
        Self::from_option(depth)
    }
}

/// Checks if a path is a dot-entry (its name starts with '.').
///
/// Only the final component is checked.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipbundle_core::walker::is_dot_entry;
///
/// assert!(is_dot_entry(Path::new(".gitignore")));
/// assert!(is_dot_entry(Path::new("dir/.cache")));
/// assert!(!is_dot_entry(Path::new(".config/settings.json")));
/// ```
#[must_use]
pub fn is_dot_entry(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}

/// Collects the regular files directly inside `dir`.
///
/// Subdirectories are never included or descended into.
///
/// # Errors
///
/// Returns an error if the directory listing or an entry's metadata cannot
/// be read.
pub fn collect_shallow(dir: &Path, ignore_dot_entries: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if ignore_dot_entries && is_dot_entry(&path) {
            continue;
        }

        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Collects the descendants of `dir` selected by `depth`.
///
/// With `files_only`, directories are left out of the result (they are
/// still traversed). With `ignore_dot_entries`, dot-files are skipped and
/// dot-directories are pruned together with their contents. Symlinks whose
/// target does not exist are skipped.
///
/// # Errors
///
/// Returns an error if any part of the tree cannot be read.
pub fn collect_recursive(
    dir: &Path,
    depth: Depth,
    files_only: bool,
    ignore_dot_entries: bool,
) -> Result<Vec<PathBuf>> {
    let walker = depth.apply(WalkDir::new(dir).sort_by_file_name());
    let mut paths = Vec::new();

    // The predicate also sees the root, which must never be pruned even if
    // its own name starts with a dot.
    let keep = |entry: &DirEntry| {
        entry.depth() == 0 || !ignore_dot_entries || !is_dot_entry(entry.path())
    };

    for entry in walker.into_iter().filter_entry(keep) {
        let entry = entry.map_err(|e| {
            ArchiverError::Io(std::io::Error::other(format!("walkdir error: {e}")))
        })?;

        // Symlinks are classified by their target, like the build step does.
        let Ok(metadata) = fs::metadata(entry.path()) else {
            tracing::debug!(path = %entry.path().display(), "skipping dangling symlink");
            continue;
        };
        if files_only && metadata.is_dir() {
            continue;
        }

        paths.push(entry.into_path());
    }

    Ok(paths)
}
