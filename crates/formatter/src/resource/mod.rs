// ABOUTME: Resource handling module for loading Word HTML exports from disk.
// ABOUTME: Validates the input path, reads the bytes and decodes them using BOM, meta charset or detection.

use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::FormatError;

/// File extensions accepted as Word HTML exports.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["htm", "html"];

/// How far into the document a charset declaration is looked for.
const CHARSET_SNIFF_LIMIT: usize = 1024;

static CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([a-z0-9_:.\-]+)"#).unwrap());

/// Read and decode an HTML export.
///
/// Fails with `InvalidInput` for unsupported extensions or directories,
/// `InputNotFound` when nothing exists at `path`, and `Read` for other I/O errors.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, FormatError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    validate_extension(path)?;

    if path.is_dir() {
        return Err(FormatError::invalid_input(
            shown,
            "ReadSource",
            Some(anyhow::anyhow!("path is a directory")),
        ));
    }

    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FormatError::input_not_found(shown.clone(), "ReadSource", Some(e.into()))
        } else {
            FormatError::read(shown.clone(), "ReadSource", Some(e.into()))
        }
    })?;

    debug!(path = %shown, bytes = bytes.len(), "read source");
    Ok(decode_bytes(&bytes))
}

/// Reject paths whose extension is not one of [`ACCEPTED_EXTENSIONS`].
pub fn validate_extension(path: &Path) -> Result<(), FormatError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ref e) if ACCEPTED_EXTENSIONS.contains(&e.as_str()) => Ok(()),
        _ => Err(FormatError::invalid_input(
            path.display().to_string(),
            "ReadSource",
            Some(anyhow::anyhow!(
                "expected one of: {}",
                ACCEPTED_EXTENSIONS.join(", ")
            )),
        )),
    }
}

/// Decode raw bytes to a String.
///
/// A byte order mark wins, then a `charset=` declaration near the top of the
/// document, then chardetng's guess.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    if let Some(encoding) = sniff_charset(bytes) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Find a declared charset in the first [`CHARSET_SNIFF_LIMIT`] bytes.
fn sniff_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let label = CHARSET_RE.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}
