//! Classifier
//!
//! Assigns a render category to every token of a scanned snippet. Only
//! identifiers are refined; every other token renders as its scanner category.
//!
//! Identifier precedence, first match wins:
//!
//!     1. Keyword  the text is in the keyword set
//!     2. Type     the text is in the type set
//!     3. Call     the next non-whitespace token is the punctuation `(`
//!     4. Plain    otherwise
//!
//! The lookahead skips whitespace tokens only and never consumes anything. When
//! it runs off the end of the sequence the identifier cannot be a call.

use super::token::{Classified, RenderCategory, Token, TokenCategory};
use std::collections::HashSet;

/// Keyword and type names used to classify identifiers of one snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    keywords: HashSet<String>,
    types: HashSet<String>,
}

impl Vocabulary {
    pub fn new<K, T>(keywords: K, types: T) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a vocabulary from comma-separated lists such as `"let, fn"`.
    ///
    /// Entries are trimmed and empty entries are dropped.
    pub fn from_lists(keywords: &str, types: &str) -> Self {
        Self::new(split_list(keywords), split_list(types))
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_type(&self, word: &str) -> bool {
        self.types.contains(word)
    }
}

/// Split a comma-separated attribute value into its non-empty, trimmed entries.
pub fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Classify every token of the sequence.
pub fn classify<'a>(tokens: &[Token<'a>], vocabulary: &Vocabulary) -> Vec<Classified<'a>> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| Classified {
            token: *token,
            category: categorize(tokens, index, vocabulary),
        })
        .collect()
}

fn categorize(tokens: &[Token<'_>], index: usize, vocabulary: &Vocabulary) -> RenderCategory {
    let token = &tokens[index];
    if token.category != TokenCategory::Ident {
        return token.category.into();
    }

    if vocabulary.is_keyword(token.text) {
        RenderCategory::Keyword
    } else if vocabulary.is_type(token.text) {
        RenderCategory::Type
    } else if opens_call(&tokens[index + 1..]) {
        RenderCategory::Call
    } else {
        RenderCategory::Plain
    }
}

fn opens_call(rest: &[Token<'_>]) -> bool {
    rest.iter()
        .find(|token| !token.is_whitespace())
        .is_some_and(|token| token.category == TokenCategory::Punctuation && token.text == "(")
}
