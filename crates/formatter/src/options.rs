// ABOUTME: Configuration options for the formatter including ParseOptions, Options, and FormatterBuilder.
// ABOUTME: FormatterBuilder provides a fluent API for constructing Formatter instances with custom settings.

use crate::dom::headings::DEFAULT_MAX_HEADING_LEVEL;
use crate::extractors::sections::{DEFAULT_SECTION_COUNT, SECTION_CLASS_PREFIX};
use crate::formatter::Formatter;

/// Empty `MsoNormal` paragraph that Word emits between blocks.
pub const WORD_BLANK_PARAGRAPH: &str =
    "<p class=MsoNormal><span lang=EN-GB style='mso-ansi-language:EN-GB'>&nbsp;</span></p>";

/// Class Word-exported images receive so they scale inside the host page.
pub const IMAGE_PRESENTATION_CLASS: &str = "img-responsive img-rounded";

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// When true, parser diagnostics are counted and logged but never fail the parse.
    pub recover_from_malformed_input: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover_from_malformed_input: true,
        }
    }
}

/// Configuration options for the formatter pipeline.
#[derive(Debug, Clone)]
pub struct Options {
    pub max_heading_level: u8,
    pub section_count: usize,
    pub section_class_prefix: String,
    pub blank_artifacts: Vec<String>,
    pub image_remove_attributes: Vec<String>,
    pub image_add_attributes: Vec<(String, Vec<String>)>,
    pub parse: ParseOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_heading_level: DEFAULT_MAX_HEADING_LEVEL,
            section_count: DEFAULT_SECTION_COUNT,
            section_class_prefix: SECTION_CLASS_PREFIX.to_string(),
            blank_artifacts: vec![WORD_BLANK_PARAGRAPH.to_string()],
            image_remove_attributes: vec!["height".to_string(), "width".to_string()],
            image_add_attributes: vec![(
                "class".to_string(),
                vec![IMAGE_PRESENTATION_CLASS.to_string()],
            )],
            parse: ParseOptions::default(),
        }
    }
}

/// Builder for constructing Formatter instances with custom configuration.
#[derive(Debug, Clone)]
pub struct FormatterBuilder {
    opts: Options,
}

impl FormatterBuilder {
    /// Create a new FormatterBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the deepest heading level that is renumbered and indexed.
    pub fn max_heading_level(mut self, level: u8) -> Self {
        self.opts.max_heading_level = level;
        self
    }

    /// Set how many numbered sections are extracted.
    pub fn section_count(mut self, count: usize) -> Self {
        self.opts.section_count = count;
        self
    }

    /// Set the class prefix that marks a content section.
    pub fn section_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.opts.section_class_prefix = prefix.into();
        self
    }

    /// Add another byte-exact snippet to strip before parsing.
    pub fn blank_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.opts.blank_artifacts.push(artifact.into());
        self
    }

    /// Replace the snippets stripped before parsing.
    pub fn blank_artifacts<I, S>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.blank_artifacts = artifacts.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the attributes removed from every `img`.
    pub fn image_remove_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.image_remove_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set an attribute on every `img`. Values are applied in order, last one wins.
    pub fn image_attribute<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.opts.image_add_attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.opts.image_add_attributes.push((name, values)),
        }
        self
    }

    /// Enable or disable recovery from malformed markup.
    pub fn recover_from_malformed_input(mut self, recover: bool) -> Self {
        self.opts.parse.recover_from_malformed_input = recover;
        self
    }

    /// Build the Formatter with the configured options.
    pub fn build(self) -> Formatter {
        Formatter::new(self.opts)
    }
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
