// ABOUTME: Extractors module for pulling publishable content and heading metadata out of a document.
// ABOUTME: Contains section extraction, the heading index, bookmark token lookup and tag stripping.

pub mod headings;
pub mod sections;
pub mod text;
pub mod toc;
