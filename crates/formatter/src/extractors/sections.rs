// ABOUTME: Section extraction for Word exports, which wrap body content in WordSection1..N divs.
// ABOUTME: Serializes every section-marked element, ordered by section number then document position.

use tracing::debug;

use crate::dom::Document;

/// Class prefix Word puts on its content regions.
pub const SECTION_CLASS_PREFIX: &str = "WordSection";

/// Number of sections searched by default.
pub const DEFAULT_SECTION_COUNT: usize = 5;

/// Serialize every `WordSection1..=section_count` element into one string.
pub fn extract_sections(doc: &Document, section_count: usize) -> String {
    extract_sections_with_prefix(doc, SECTION_CLASS_PREFIX, section_count)
}

/// Serialize every element whose class contains `{prefix}{i}` for `i` in `1..=section_count`.
///
/// Sections are emitted in ascending `i`; matches for the same `i` keep document order.
/// Matching is substring containment, so `WordSection1` also matches `WordSection12`.
pub fn extract_sections_with_prefix(doc: &Document, prefix: &str, section_count: usize) -> String {
    let mut output = String::new();

    for i in 1..=section_count {
        let token = format!("{}{}", prefix, i);
        let nodes = doc.query_by_class_token(&token);
        if !nodes.is_empty() {
            debug!(section = %token, matches = nodes.len(), "extracting section");
        }
        for node in nodes {
            output.push_str(&doc.serialize(node));
        }
    }

    output
}
