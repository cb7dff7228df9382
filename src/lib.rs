//! # glint
//!
//! Inline syntax highlighting for snippets of a small example language embedded
//! in statically generated pages.
//!
//! A snippet is scanned into tokens, identifiers are classified against
//! per-snippet keyword and type vocabularies, and the result is rendered as
//! escaped HTML with Pygments-compatible span classes. The [highlight::driver]
//! applies this to every marked element of a page.
//!
//! See [highlight] for the pipeline, [config] for the configuration layer.

pub mod config;
pub mod error;
pub mod highlight;

pub use error::{GlintError, Result};
pub use highlight::{highlight, Vocabulary};
