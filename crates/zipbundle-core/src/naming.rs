//! Entry-name computation for zip archives.
//!
//! Zip entry names are relative, UTF-8 and separated by `/` on every
//! platform. A strip prefix is honored only when it matches every stored
//! path; a single mismatch disables it for the whole build.

use crate::ArchiverError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Resolves the strip prefix that applies to `paths`, if any.
///
/// The prefix is tried as given and in canonical form, because stored paths
/// are canonical while callers usually pass the path they added.
///
/// Returns `None` when no prefix is set, the prefix is empty, or at least one
/// path does not start with it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::path::PathBuf;
/// use zipbundle_core::naming::effective_strip_prefix;
///
/// let paths = [PathBuf::from("/srv/site/a.txt"), PathBuf::from("/srv/site/b/c.txt")];
/// let prefix = effective_strip_prefix(Some(Path::new("/srv/site")), &paths);
/// assert_eq!(prefix.as_deref(), Some(Path::new("/srv/site")));
///
/// let mixed = [PathBuf::from("/srv/site/a.txt"), PathBuf::from("/srv/other.txt")];
/// assert_eq!(effective_strip_prefix(Some(Path::new("/srv/site")), &mixed), None);
/// ```
#[must_use]
pub fn effective_strip_prefix(prefix: Option<&Path>, paths: &[PathBuf]) -> Option<PathBuf> {
    let prefix = prefix.filter(|p| !p.as_os_str().is_empty())?;

    let mut candidates = vec![prefix.to_path_buf()];
    if let Ok(canonical) = prefix.canonicalize()
        && canonical != prefix
    {
        candidates.push(canonical);
    }

    candidates
        .into_iter()
        .find(|candidate| paths.iter().all(|path| path.starts_with(candidate)))
}

/// Computes the archive entry name for `path`.
///
/// With a prefix the name is the remainder after the prefix; without one it
/// is the path minus its root (leading separator or drive). `..` and `.`
/// components are dropped. Returns an empty string when nothing remains.
///
/// # Errors
///
/// Returns [`ArchiverError::InvalidEntryName`] if the path is not valid
/// UTF-8.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipbundle_core::naming::entry_name;
///
/// let name = entry_name(Path::new("/srv/site/css/app.css"), Some(Path::new("/srv/site")))?;
/// assert_eq!(name, "css/app.css");
///
/// let name = entry_name(Path::new("/srv/site/css/app.css"), None)?;
/// assert_eq!(name, "srv/site/css/app.css");
/// # Ok::<(), zipbundle_core::ArchiverError>(())
/// ```
pub fn entry_name(path: &Path, strip_prefix: Option<&Path>) -> Result<String> {
    let relative = strip_prefix
        .and_then(|prefix| path.strip_prefix(prefix).ok())
        .unwrap_or(path);

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| ArchiverError::InvalidEntryName {
                path: path.to_path_buf(),
            })?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}

/// Appends the trailing `/` that marks a directory entry.
#[must_use]
pub fn directory_entry_name(name: &str) -> String {
    format!("{name}/")
}
