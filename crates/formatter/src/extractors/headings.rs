// ABOUTME: Heading index extraction: one descriptor per h1..hN element for building a table of contents.
// ABOUTME: Each descriptor carries tag, level, plain-text name, inner markup and the first bookmark token.

use crate::dom::headings::{heading_level, heading_tag_names};
use crate::dom::Document;
use crate::extractors::text::strip_tags;
use crate::extractors::toc::extract_toc;
use crate::result::HeadingDescriptor;

/// Describe every heading up to `max_level`, in document order.
///
/// `level` is the tag's numeric suffix minus one, so it reflects whatever
/// renumbering has already been applied to `doc`.
pub fn build_heading_index(doc: &Document, max_level: u8) -> Vec<HeadingDescriptor> {
    doc.query_by_tag_names(&heading_tag_names(max_level))
        .into_iter()
        .filter_map(|id| {
            let tag = doc.element(id)?.name.clone();
            let level = heading_level(&tag)?.saturating_sub(1);
            let content = doc.inner_markup(id);
            Some(HeadingDescriptor {
                name: strip_tags(&content).trim().to_string(),
                toc: extract_toc(&content),
                tag,
                level,
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::headings::{increment_heading_levels, DEFAULT_MAX_HEADING_LEVEL};

    #[test]
    fn describes_formatted_heading() {
        let doc = Document::parse("<h2>Some <b>Bold</b> Text</h2>");
        let index = build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL);
        assert_eq!(
            index,
            vec![HeadingDescriptor {
                tag: "h2".to_string(),
                level: 1,
                name: "Some Bold Text".to_string(),
                content: "Some <b>Bold</b> Text".to_string(),
                toc: String::new(),
            }]
        );
    }

    #[test]
    fn picks_up_word_bookmarks() {
        let doc = Document::parse(
            r#"<h1><a name="_Toc480125411"></a><a name="_Toc480125999"></a>  Getting started </h1><p>x</p><h3>No anchor</h3>"#,
        );
        let index = build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL);
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].tag, "h1");
        assert_eq!(index[0].level, 0);
        assert_eq!(index[0].name, "Getting started");
        assert_eq!(index[0].toc, "_Toc480125411");
        assert_eq!(index[1].level, 2);
        assert_eq!(index[1].toc, "");
    }

    #[test]
    fn levels_follow_renumbering() {
        let mut doc = Document::parse("<h1>Title</h1>");
        let before = build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL);
        increment_heading_levels(&mut doc, DEFAULT_MAX_HEADING_LEVEL);
        let after = build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL);
        assert_eq!(before[0].level, 0);
        assert_eq!(after[0].tag, "h2");
        assert_eq!(after[0].level, 1);
    }

    #[test]
    fn attribute_values_do_not_leak_into_name() {
        let doc = Document::parse(r#"<h2><img alt="before > after" src="x.png">Setup</h2>"#);
        let index = build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL);
        assert_eq!(index[0].name, "Setup");
    }

    #[test]
    fn no_headings_yields_empty_index() {
        let doc = Document::parse("<p>just text</p>");
        assert!(build_heading_index(&doc, DEFAULT_MAX_HEADING_LEVEL).is_empty());
    }
}
