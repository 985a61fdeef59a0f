// ABOUTME: Lookup of Word bookmark tokens (_Toc followed by digits) inside heading markup.
// ABOUTME: Only the first token is returned even when a heading carries several.

use once_cell::sync::Lazy;
use regex::Regex;

// Word bookmark names, e.g. `_Toc480125411`
static TOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)_toc[0-9]*").unwrap());

/// Returns the first bookmark token in `markup` with its original casing, or an empty string.
pub fn extract_toc(markup: &str) -> String {
    TOC_RE
        .find(markup)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
