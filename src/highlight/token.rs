//! Token types shared by the scanner, classifier and renderer.
//!
//!     A token is the minimal lexical unit of a snippet: a scanner category plus
//!     the exact source substring it covers. Tokens borrow their text from the
//!     source, so a token sequence is only valid while the source is alive.
//!
//!     Render categories are a second, derived layer. They are computed by the
//!     classifier for one run and paired with the token, never written back.

use serde::Serialize;

/// Scanner-level category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Comment,
    String,
    Number,
    Ident,
    Punctuation,
    Operator,
    Whitespace,
    Fallback,
}

/// A categorized slice of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub category: TokenCategory,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(category: TokenCategory, text: &'a str) -> Self {
        Self { category, text }
    }

    pub fn is_whitespace(&self) -> bool {
        self.category == TokenCategory::Whitespace
    }
}

/// Display classification that selects a token's CSS wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderCategory {
    Keyword,
    Type,
    Call,
    Comment,
    String,
    Number,
    Punctuation,
    Operator,
    Plain,
}

impl RenderCategory {
    /// CSS class used to wrap tokens of this category.
    ///
    /// The names follow the Pygments short class names, so existing themes
    /// style the output without extra CSS. `Plain` tokens are not wrapped.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            RenderCategory::Comment => Some("c1"),
            RenderCategory::String => Some("s"),
            RenderCategory::Number => Some("mi"),
            RenderCategory::Keyword => Some("k"),
            RenderCategory::Type => Some("kt"),
            RenderCategory::Call => Some("nf"),
            RenderCategory::Punctuation => Some("p"),
            RenderCategory::Operator => Some("o"),
            RenderCategory::Plain => None,
        }
    }
}

impl From<TokenCategory> for RenderCategory {
    /// Render category of a token before identifier refinement.
    fn from(category: TokenCategory) -> Self {
        match category {
            TokenCategory::Comment => RenderCategory::Comment,
            TokenCategory::String => RenderCategory::String,
            TokenCategory::Number => RenderCategory::Number,
            TokenCategory::Punctuation => RenderCategory::Punctuation,
            TokenCategory::Operator => RenderCategory::Operator,
            TokenCategory::Ident | TokenCategory::Whitespace | TokenCategory::Fallback => {
                RenderCategory::Plain
            }
        }
    }
}

/// A token paired with the render category assigned to it for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classified<'a> {
    pub token: Token<'a>,
    pub category: RenderCategory,
}

/// Concatenate token texts back into source text.
pub fn detokenize(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}
