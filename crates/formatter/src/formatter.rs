// ABOUTME: The Formatter pipeline that turns a Word HTML export into an embeddable quick guide fragment.
// ABOUTME: Provides run(), heading_index() and process() over in-memory text, plus *_file variants.

use std::path::Path;

use aho_corasick::{AhoCorasick, MatchKind};
use tracing::{debug, warn};

use crate::dom::{add_attributes, increment_heading_levels, remove_attributes, Document};
use crate::error::FormatError;
use crate::extractors::headings::build_heading_index;
use crate::extractors::sections::extract_sections_with_prefix;
use crate::options::{FormatterBuilder, Options};
use crate::resource::read_source;
use crate::result::{HeadingDescriptor, QuickGuide};

/// Converts Word "Save As HTML" output into cleaned quick guide markup.
///
/// Every call parses its own [`Document`]; nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct Formatter {
    opts: Options,
    artifacts: Option<AhoCorasick>,
}

impl Formatter {
    /// Create a new FormatterBuilder for configuring the formatter.
    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Create a new Formatter with the given options.
    pub fn new(opts: Options) -> Self {
        let artifacts = if opts.blank_artifacts.is_empty() {
            None
        } else {
            AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostFirst)
                .build(&opts.blank_artifacts)
                .map_err(|e| warn!("blank artifact matcher unavailable, using plain replace: {}", e))
                .ok()
        };
        Self { opts, artifacts }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Remove every byte-exact occurrence of the configured blank-paragraph artifacts.
    pub fn strip_blank_artifacts(&self, raw: &str) -> String {
        match &self.artifacts {
            Some(ac) => {
                let blanks = vec![""; self.opts.blank_artifacts.len()];
                ac.replace_all(raw, &blanks)
            }
            None => self
                .opts
                .blank_artifacts
                .iter()
                .fold(raw.to_string(), |text, artifact| {
                    if artifact.is_empty() {
                        text
                    } else {
                        text.replace(artifact.as_str(), "")
                    }
                }),
        }
    }

    /// Strip artifacts and parse into a fresh document.
    pub fn parse(&self, raw: &str) -> Result<Document, FormatError> {
        let text = self.strip_blank_artifacts(raw);
        let doc = Document::parse_with(&text, &self.opts.parse)?;
        debug!(
            bytes = text.len(),
            recovered = doc.recovered_errors(),
            first = doc.diagnostics().first().map(String::as_str).unwrap_or(""),
            "parsed document"
        );
        Ok(doc)
    }

    /// Produce the cleaned quick guide fragment.
    ///
    /// Headings are demoted one level, `img` size attributes are dropped and
    /// presentation classes added, then the WordSection regions are serialized.
    pub fn run(&self, raw: &str) -> Result<String, FormatError> {
        let mut doc = self.parse(raw)?;

        let report = increment_heading_levels(&mut doc, self.opts.max_heading_level);
        debug!(
            renamed = report.renamed,
            clamped = report.clamped,
            "renumbered headings"
        );

        let removed = remove_attributes(&mut doc, "img", self.opts.image_remove_attributes.as_slice());
        let touched = add_attributes(&mut doc, "img", self.opts.image_add_attributes.as_slice());
        debug!(removed, images = touched, "rewrote image attributes");

        Ok(extract_sections_with_prefix(
            &doc,
            &self.opts.section_class_prefix,
            self.opts.section_count,
        ))
    }

    /// Heading index of the unrenumbered source, in document order.
    pub fn heading_index(&self, raw: &str) -> Result<Vec<HeadingDescriptor>, FormatError> {
        let doc = self.parse(raw)?;
        Ok(build_heading_index(&doc, self.opts.max_heading_level))
    }

    /// Both outputs in one call. The index is taken before renumbering.
    pub fn process(&self, raw: &str) -> Result<QuickGuide, FormatError> {
        let headings = self.heading_index(raw)?;
        let html = self.run(raw)?;
        Ok(QuickGuide { html, headings })
    }

    /// [`Formatter::run`] over a file on disk.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<String, FormatError> {
        let path = path.as_ref();
        let raw = read_source(path)?;
        self.run(&raw)
            .map_err(|e| e.with_path(path.display().to_string()))
    }

    /// [`Formatter::heading_index`] over a file on disk.
    pub fn heading_index_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<HeadingDescriptor>, FormatError> {
        let path = path.as_ref();
        let raw = read_source(path)?;
        self.heading_index(&raw)
            .map_err(|e| e.with_path(path.display().to_string()))
    }

    /// [`Formatter::process`] over a file on disk.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<QuickGuide, FormatError> {
        let path = path.as_ref();
        let raw = read_source(path)?;
        self.process(&raw)
            .map_err(|e| e.with_path(path.display().to_string()))
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WORD_BLANK_PARAGRAPH;

    #[test]
    fn run_demotes_headings_inside_sections() {
        let raw = format!(
            "{}<h1>Title</h1><div class=\"WordSection1\"><h2>Sub</h2></div>",
            WORD_BLANK_PARAGRAPH
        );
        let html = Formatter::default().run(&raw).unwrap();
        assert_eq!(html, r#"<div class="WordSection1"><h3>Sub</h3></div>"#);
    }

    #[test]
    fn run_rewrites_images() {
        let raw = r#"<div class="WordSection1"><img width="600" height="400" src="image001.png"></div>"#;
        let html = Formatter::default().run(raw).unwrap();
        assert_eq!(
            html,
            r#"<div class="WordSection1"><img src="image001.png" class="img-responsive img-rounded"></div>"#
        );
    }

    #[test]
    fn run_without_sections_is_empty() {
        let html = Formatter::default().run("<h1>Loose</h1><p>text</p>").unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn strip_only_removes_exact_artifact() {
        let formatter = Formatter::default();
        let near_miss = "<p class=MsoNormal><span lang=EN-US style='mso-ansi-language:EN-US'>&nbsp;</span></p>";
        let raw = format!("a{}b{}c{}", WORD_BLANK_PARAGRAPH, near_miss, WORD_BLANK_PARAGRAPH);
        assert_eq!(formatter.strip_blank_artifacts(&raw), format!("ab{}c", near_miss));
    }

    #[test]
    fn strip_with_no_artifacts_is_identity() {
        let formatter = Formatter::builder().blank_artifacts(Vec::<String>::new()).build();
        let raw = format!("x{}y", WORD_BLANK_PARAGRAPH);
        assert_eq!(formatter.strip_blank_artifacts(&raw), raw);
    }

    #[test]
    fn heading_index_sees_unrenumbered_tree() {
        let formatter = Formatter::default();
        let raw = r#"<div class="WordSection1"><h1><a name="_Toc1"></a>Intro</h1></div>"#;
        let index = formatter.heading_index(raw).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].tag, "h1");
        assert_eq!(index[0].level, 0);
        assert_eq!(index[0].name, "Intro");
        assert_eq!(index[0].toc, "_Toc1");
    }

    #[test]
    fn process_returns_both_outputs() {
        let raw = r#"<div class="WordSection1"><h1>Intro</h1></div>"#;
        let guide = Formatter::default().process(raw).unwrap();
        assert_eq!(guide.html, r#"<div class="WordSection1"><h2>Intro</h2></div>"#);
        assert_eq!(guide.headings[0].tag, "h1");
    }

    #[test]
    fn strict_mode_rejects_malformed_input() {
        let formatter = Formatter::builder().recover_from_malformed_input(false).build();
        let err = formatter.run("<div class=\"WordSection1\"></span>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn strict_mode_accepts_export_without_doctype() {
        let formatter = Formatter::builder().recover_from_malformed_input(false).build();
        let raw = "<html><head></head><body><div class=WordSection1><h1>Fine</h1></div></body></html>";
        assert_eq!(
            formatter.run(raw).unwrap(),
            r#"<div class="WordSection1"><h2>Fine</h2></div>"#
        );
    }

    #[test]
    fn custom_options_flow_through() {
        let formatter = Formatter::builder()
            .max_heading_level(2)
            .section_count(1)
            .image_remove_attributes(["src"])
            .image_attribute("class", ["a", "b"])
            .build();
        let raw = r#"<div class="WordSection1"><h2>Deep</h2><img src="x.png" width="1"></div><div class="WordSection2">skip</div>"#;
        let html = formatter.run(raw).unwrap();
        assert_eq!(
            html,
            r#"<div class="WordSection1"><h2>Deep</h2><img width="1" class="b"></div>"#
        );
    }
}
