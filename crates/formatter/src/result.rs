// ABOUTME: Output records of the formatter: HeadingDescriptor for tables of contents and QuickGuide.
// ABOUTME: Both serialize with serde so callers can hand them straight to a template or API.

use serde::{Deserialize, Serialize};

/// One entry of the heading index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingDescriptor {
    #[serde(rename = "header", alias = "tag")]
    pub tag: String,
    pub level: u8,
    pub name: String,
    pub content: String,
    pub toc: String,
}

/// A cleaned fragment together with the heading index of its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickGuide {
    pub html: String,
    pub headings: Vec<HeadingDescriptor>,
}

impl QuickGuide {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Headings that carry a Word bookmark and can therefore be linked to.
    pub fn linkable_headings(&self) -> impl Iterator<Item = &HeadingDescriptor> {
        self.headings.iter().filter(|h| !h.toc.is_empty())
    }
}
