//! Highlighting pipeline
//!
//! Snippets of the example language go through three pure stages and one
//! page-facing stage:
//!
//! 1. [scanning]: source text into an exhaustive token sequence
//! 2. [classifying]: tokens plus a [Vocabulary] into render categories
//! 3. [rendering]: classified tokens into escaped HTML with category spans
//! 4. [driver]: finds highlightable nodes on a page and replaces their content
//!
//! The first three stages never fail and keep no state between calls, so the
//! output is a deterministic function of the source and the vocabulary.

pub mod classifying;
pub mod driver;
pub mod rendering;
pub mod scanning;
pub mod token;

pub use classifying::{classify, Vocabulary};
pub use driver::{Driver, HighlightReport, HtmlPage, Page, Readiness};
pub use rendering::{escape_html, render};
pub use scanning::{tokenize, Scanner};
pub use token::{detokenize, Classified, RenderCategory, Token, TokenCategory};

/// Run the full pipeline on one snippet.
pub fn highlight(source: &str, vocabulary: &Vocabulary) -> String {
    let tokens = tokenize(source);
    let classified = classify(&tokens, vocabulary);
    render(&classified)
}
