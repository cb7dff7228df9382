//! Scanner
//!
//! Turns a snippet into an exhaustive, ordered token sequence.
//!
//! Rule Table
//!
//!     Tokenization is driven by an ordered table of (category, recognizer) pairs.
//!     At each position the rules are tried in order and the first one that
//!     recognizes a non-empty prefix wins. This is priority order, not longest
//!     match:
//!
//!         1. line comment      `//...` or `#...` up to the end of the line
//!         2. string literal    `"..."`, must find its closing quote
//!         3. number            digits, optionally `.` and more digits
//!         4. identifier        letter or `_`, then letters, digits, `_`
//!         5. punctuation       one of `()[]{}:;,.`
//!         6. operator          `=`
//!         7. whitespace        one or more whitespace characters
//!
//!     When no rule matches, a single-character Fallback token is emitted. Every
//!     step therefore advances by at least one character: the scanner cannot get
//!     stuck and has no error states. An unterminated string never matches rule 2,
//!     so its opening quote degrades to Fallback and scanning resumes after it.
//!
//! Invariants
//!
//!     - Concatenating the token texts reproduces the source exactly.
//!     - The number of tokens never exceeds the number of characters.

use super::token::{Token, TokenCategory};

/// Returns the byte length of the prefix it recognizes, if any.
type Recognizer = fn(&str) -> Option<usize>;

const RULES: &[(TokenCategory, Recognizer)] = &[
    (TokenCategory::Comment, line_comment),
    (TokenCategory::String, string_literal),
    (TokenCategory::Number, number),
    (TokenCategory::Ident, identifier),
    (TokenCategory::Punctuation, punctuation),
    (TokenCategory::Operator, operator),
    (TokenCategory::Whitespace, whitespace),
];

const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ':', ';', ',', '.'];

/// Tokenize a snippet.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).collect()
}

/// Iterator over the tokens of a source string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.source[self.pos..];
        let first = rest.chars().next()?;

        let (category, len) = RULES
            .iter()
            .find_map(|(category, recognize)| {
                recognize(rest)
                    .filter(|&len| len > 0)
                    .map(|len| (*category, len))
            })
            .unwrap_or((TokenCategory::Fallback, first.len_utf8()));

        self.pos += len;
        Some(Token::new(category, &rest[..len]))
    }
}

fn line_comment(s: &str) -> Option<usize> {
    if !(s.starts_with("//") || s.starts_with('#')) {
        return None;
    }
    Some(s.find(['\n', '\r']).unwrap_or(s.len()))
}

fn string_literal(s: &str) -> Option<usize> {
    let body = s.strip_prefix('"')?;
    body.find('"').map(|close| close + 2)
}

fn number(s: &str) -> Option<usize> {
    let int_len = ascii_digits(s);
    if int_len == 0 {
        return None;
    }
    let frac_len = s[int_len..]
        .strip_prefix('.')
        .map(ascii_digits)
        .filter(|&digits| digits > 0)
        .map_or(0, |digits| digits + 1);
    Some(int_len + frac_len)
}

fn identifier(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    Some(
        s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(s.len()),
    )
}

fn punctuation(s: &str) -> Option<usize> {
    s.chars()
        .next()
        .filter(|c| PUNCTUATION.contains(c))
        .map(char::len_utf8)
}

fn operator(s: &str) -> Option<usize> {
    s.starts_with('=').then_some(1)
}

fn whitespace(s: &str) -> Option<usize> {
    Some(s.find(|c: char| !c.is_whitespace()).unwrap_or(s.len()))
}

fn ascii_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
