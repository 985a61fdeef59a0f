// ABOUTME: Main library entry point for the quick guide formatter.
// ABOUTME: Re-exports the public API: Formatter, FormatterBuilder, Options, QuickGuide, HeadingDescriptor, FormatError.

//! Quick guide formatter - cleans word-processor "Save As HTML" exports.
//!
//! Word wraps real content in `WordSection<N>` divs, uses `h1` for its own
//! headings and sprinkles empty filler paragraphs through the export. This
//! crate strips the filler, demotes every heading one level so the result can
//! sit under a host page's own `h1`, makes images responsive, and returns only
//! the section markup. A heading index with Word's `_Toc` bookmarks is
//! available for building a table of contents.
//!
//! # Example
//!
//! ```no_run
//! use quickguide_formatter::{FormatError, Formatter};
//!
//! fn main() -> Result<(), FormatError> {
//!     let formatter = Formatter::builder().build();
//!     let guide = formatter.process_file("exports/guide.htm")?;
//!     println!("{}", guide.html);
//!     for heading in &guide.headings {
//!         println!("{} {}", heading.toc, heading.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod extractors;
pub mod formatter;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::dom::{Document, RenumberReport};
pub use crate::error::{ErrorCode, FormatError};
pub use crate::extractors::toc::extract_toc;
pub use crate::formatter::Formatter;
pub use crate::options::{FormatterBuilder, Options, ParseOptions};
pub use crate::resource::read_source;
pub use crate::result::{HeadingDescriptor, QuickGuide};
