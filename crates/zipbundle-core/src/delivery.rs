//! Download delivery of finished archives.
//!
//! Computes the response headers a web layer needs to offer an archive for
//! download and streams the file body, optionally deleting it afterwards.
//! No HTTP server is involved; callers plug the headers and writer into
//! whatever framework they use.

use crate::ArchiverError;
use crate::Result;
use std::fmt;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// MIME type of zip archives.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// How the client should present the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disposition {
    /// Prompt a download.
    #[default]
    Attachment,
    /// Display in the browser if possible.
    Inline,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attachment => write!(f, "attachment"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// A prepared archive download.
///
/// # Examples
///
/// ```no_run
/// use zipbundle_core::delivery::Disposition;
/// use zipbundle_core::delivery::Download;
///
/// let download = Download::prepare("/tmp/Übersicht.zip", Disposition::Attachment)?
///     .delete_after_send(true);
/// for (name, value) in download.headers() {
///     println!("{name}: {value}");
/// }
/// let mut body = Vec::new();
/// download.send(&mut body)?;
/// # Ok::<(), zipbundle_core::ArchiverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Download {
    path: PathBuf,
    file_name: String,
    disposition: Disposition,
    content_length: u64,
    delete_after_send: bool,
}

impl Download {
    /// Prepares `path` for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] if `path` is not an existing
    /// regular file.
    pub fn prepare<P: AsRef<Path>>(path: P, disposition: Disposition) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArchiverError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content_length = fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            disposition,
            content_length,
            delete_after_send: false,
        })
    }

    /// Removes the file once [`send`](Self::send) has streamed it.
    #[must_use]
    pub fn delete_after_send(mut self, delete: bool) -> Self {
        self.delete_after_send = delete;
        self
    }

    /// Path of the file being delivered.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        ZIP_CONTENT_TYPE
    }

    /// Value of the `Content-Length` header.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Value of the `Content-Disposition` header.
    ///
    /// Carries an ASCII fallback `filename` and, when the name is not plain
    /// ASCII, an RFC 5987 encoded `filename*`.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        let fallback = ascii_file_name(&self.file_name);
        if fallback == self.file_name {
            format!("{}; filename=\"{fallback}\"", self.disposition)
        } else {
            format!(
                "{}; filename=\"{fallback}\"; filename*=UTF-8''{}",
                self.disposition,
                percent_encode(&self.file_name)
            )
        }
    }

    /// Response headers as name/value pairs.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type().to_string()),
            ("Content-Disposition", self.content_disposition()),
            ("Content-Length", self.content_length.to_string()),
        ]
    }

    /// Streams the file into `writer` and returns the bytes sent.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] if the file disappeared since
    /// [`prepare`](Self::prepare), or an I/O error while copying or deleting.
    pub fn send<W: Write>(self, writer: &mut W) -> Result<u64> {
        let mut file = File::open(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ArchiverError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                ArchiverError::Io(e)
            }
        })?;

        let sent = io::copy(&mut file, writer)?;
        writer.flush()?;
        drop(file);

        if self.delete_after_send {
            fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "removed delivered file");
        }

        Ok(sent)
    }
}

/// Transliterates a file name to printable ASCII for header fallbacks.
///
/// Common Latin letters with diacritics map to their base letters, German
/// umlauts and ligatures to two-letter forms. Anything else outside
/// printable ASCII, plus `"`, `\` and `%`, becomes `_`.
///
/// # Examples
///
/// ```
/// use zipbundle_core::delivery::ascii_file_name;
///
/// assert_eq!(ascii_file_name("Übersicht_Café.zip"), "Uebersicht_Cafe.zip");
/// assert_eq!(ascii_file_name("straße.zip"), "strasse.zip");
/// assert_eq!(ascii_file_name("报告.zip"), "__.zip");
/// ```
#[must_use]
pub fn ascii_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars() {
        match c {
            '"' | '\\' | '%' => out.push('_'),
            ' '..='~' => out.push(c),
            _ => out.push_str(transliterate(c).unwrap_or("_")),
        }
    }

    out
}

fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ä' | 'æ' => "ae",
        'ö' | 'œ' => "oe",
        'ü' => "ue",
        'Ä' | 'Æ' => "Ae",
        'Ö' | 'Œ' => "Oe",
        'Ü' => "Ue",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'ã' | 'å' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Å' => "A",
        'ç' => "c",
        'Ç' => "C",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ñ' => "n",
        'Ñ' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ø' => "O",
        'ù' | 'ú' | 'û' => "u",
        'Ù' | 'Ú' | 'Û' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        _ => return None,
    };
    Some(ascii)
}

/// Percent-encodes everything except RFC 5987 `attr-char`s.
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);

    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn archive(temp: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_prepare_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Download::prepare(temp.path().join("gone.zip"), Disposition::Attachment);
        assert!(matches!(result, Err(ArchiverError::NotFound { .. })));

        let result = Download::prepare(temp.path(), Disposition::Attachment);
        assert!(matches!(result, Err(ArchiverError::NotFound { .. })));
    }

    #[test]
    fn test_headers_for_ascii_name() {
        let temp = TempDir::new().unwrap();
        let path = archive(&temp, "bundle.zip", b"PK\x05\x06");

        let download = Download::prepare(&path, Disposition::Attachment).unwrap();
        let headers = download.headers();

        assert_eq!(headers[0], ("Content-Type", "application/zip".to_string()));
        assert_eq!(
            headers[1],
            (
                "Content-Disposition",
                "attachment; filename=\"bundle.zip\"".to_string()
            )
        );
        assert_eq!(headers[2], ("Content-Length", "4".to_string()));
    }

    #[test]
    fn test_disposition_for_unicode_name() {
        let temp = TempDir::new().unwrap();
        let path = archive(&temp, "Übersicht.zip", b"data");

        let download = Download::prepare(&path, Disposition::Inline).unwrap();
        assert_eq!(
            download.content_disposition(),
            "inline; filename=\"Uebersicht.zip\"; filename*=UTF-8''%C3%9Cbersicht.zip"
        );
    }

    #[test]
    fn test_send_streams_and_keeps_file() {
        let temp = TempDir::new().unwrap();
        let path = archive(&temp, "bundle.zip", b"archive bytes");

        let mut body = Vec::new();
        let sent = Download::prepare(&path, Disposition::Attachment)
            .unwrap()
            .send(&mut body)
            .unwrap();

        assert_eq!(sent, 13);
        assert_eq!(body, b"archive bytes");
        assert!(path.exists());
    }

    #[test]
    fn test_send_deletes_when_requested() {
        let temp = TempDir::new().unwrap();
        let path = archive(&temp, "bundle.zip", b"archive bytes");

        let mut body = Vec::new();
        Download::prepare(&path, Disposition::Attachment)
            .unwrap()
            .delete_after_send(true)
            .send(&mut body)
            .unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_send_after_file_vanished() {
        let temp = TempDir::new().unwrap();
        let path = archive(&temp, "bundle.zip", b"x");
        let download = Download::prepare(&path, Disposition::Attachment).unwrap();
        fs::remove_file(&path).unwrap();

        let result = download.send(&mut Vec::new());
        assert!(matches!(result, Err(ArchiverError::NotFound { .. })));
    }

    #[test]
    fn test_ascii_file_name_escapes_header_characters() {
        assert_eq!(ascii_file_name("a\"b\\c%d.zip"), "a_b_c_d.zip");
        assert_eq!(ascii_file_name("plain name.zip"), "plain name.zip");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a b.zip"), "a%20b.zip");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }
}
