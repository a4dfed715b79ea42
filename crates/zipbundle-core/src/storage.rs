//! Ordered, duplicate-free set of source paths.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// Paths queued for the next archive build.
///
/// Keeps insertion order for the archive layout and a hash set for
/// membership, so repeated or overlapping add-operations never produce
/// duplicate entries.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipbundle_core::Storage;
///
/// let mut storage = Storage::new();
/// assert!(storage.insert("/srv/a.txt".into()));
/// assert!(!storage.insert("/srv/a.txt".into()));
/// assert_eq!(storage.as_slice(), &[Path::new("/srv/a.txt")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Storage {
    paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl Storage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a path unless it is already stored.
    ///
    /// Returns `true` if the path was added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    /// Appends every path, skipping duplicates. Returns how many were added.
    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) -> usize {
        let mut added = 0;
        for path in paths {
            if self.insert(path) {
                added += 1;
            }
        }
        added
    }

    /// Returns `true` if the path is stored.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Stored paths in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Removes every stored path.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.seen.clear();
    }

    /// Iterates over stored paths in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a Storage {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
