// ABOUTME: Heading demotion: every h1..hN element is replaced by one level deeper, keeping attributes and children.
// ABOUTME: Headings already at the deepest configured level are left alone and reported as clamped.

use std::collections::HashSet;

use tracing::warn;

use super::tree::{Document, Element, NodeId};

/// Deepest heading level handled by default.
pub const DEFAULT_MAX_HEADING_LEVEL: u8 = 20;

/// Outcome of a renumbering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberReport {
    pub renamed: usize,
    pub clamped: usize,
}

/// Tag names `h1` through `h{max_level}`.
pub fn heading_tag_names(max_level: u8) -> HashSet<String> {
    (1..=max_level).map(|i| format!("h{}", i)).collect()
}

/// Numeric suffix of a heading tag, e.g. `h3` -> 3.
pub fn heading_level(tag: &str) -> Option<u8> {
    let digits = tag.strip_prefix('h')?;
    digits.parse().ok()
}

/// Demote every heading up to `max_level` by one level, in document order.
pub fn increment_heading_levels(doc: &mut Document, max_level: u8) -> RenumberReport {
    let mut report = RenumberReport::default();

    for id in doc.query_by_tag_names(&heading_tag_names(max_level)) {
        let Some(tag) = doc.element(id).map(|el| el.name.clone()) else {
            continue;
        };
        let Some(level) = heading_level(&tag) else {
            continue;
        };

        if level >= max_level {
            warn!(tag = %tag, max_level, "heading already at deepest level, left unrenamed");
            report.clamped += 1;
            continue;
        }

        if rename_element(doc, id, &format!("h{}", level + 1)).is_some() {
            report.renamed += 1;
        }
    }

    report
}

/// Replace an element with a new one named `name` carrying the same attributes and children.
///
/// The children are moved, not copied. The old node is discarded.
/// Returns the new node, or `None` if `id` is not an attached element.
pub fn rename_element(doc: &mut Document, id: NodeId, name: &str) -> Option<NodeId> {
    doc.parent(id)?;
    let attrs = doc.element(id)?.attrs.clone();

    let renamed = doc.create_element(Element {
        name: name.to_string(),
        attrs,
    });
    doc.reparent_children(id, renamed);
    if doc.replace(id, renamed) {
        Some(renamed)
    } else {
        None
    }
}
