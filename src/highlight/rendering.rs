//! Renderer
//!
//! Serializes a classified token sequence as HTML. Every token is escaped and,
//! unless it renders as plain text, wrapped in `<span class="X">` where `X` comes
//! from [`RenderCategory::css_class`]. Tokens are emitted strictly in order and
//! adjacent tokens of the same category are never merged.
//!
//! String Interpolation
//!
//!     String tokens get a second, independent scan of their interior for `{expr}`
//!     markers. Matching is non-greedy, up to the first `}` on the same line, and
//!     not recursive: nested braces inside a marker are not parsed. The marker's
//!     expression is wrapped in an identifier span (`n`) with the braces kept
//!     around it. A `{` without a closing `}` stays literal text.

use super::token::{Classified, RenderCategory, TokenCategory};
use once_cell::sync::Lazy;
use regex::Regex;

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(.*?)\}").unwrap());

const INTERPOLATION_CLASS: &str = "n";

/// Render a classified sequence as one HTML string.
pub fn render(classified: &[Classified<'_>]) -> String {
    let mut html = String::new();
    for item in classified {
        let body = if item.token.category == TokenCategory::String {
            render_string_body(item.token.text)
        } else {
            escape_html(item.token.text)
        };
        push_wrapped(&mut html, item.category, &body);
    }
    html
}

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn push_wrapped(html: &mut String, category: RenderCategory, body: &str) {
    match category.css_class() {
        Some(class) => push_span(html, class, body),
        None => html.push_str(body),
    }
}

fn push_span(html: &mut String, class: &str, body: &str) {
    html.push_str("<span class=\"");
    html.push_str(class);
    html.push_str("\">");
    html.push_str(body);
    html.push_str("</span>");
}

/// Render a string literal with its quotes, highlighting interpolation markers.
fn render_string_body(literal: &str) -> String {
    let Some(interior) = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return escape_html(literal);
    };

    let mut body = String::from("&quot;");
    let mut last = 0;
    for marker in INTERPOLATION.captures_iter(interior) {
        let (Some(whole), Some(expr)) = (marker.get(0), marker.get(1)) else {
            continue;
        };
        body.push_str(&escape_html(&interior[last..whole.start()]));
        body.push('{');
        push_span(&mut body, INTERPOLATION_CLASS, &escape_html(expr.as_str()));
        body.push('}');
        last = whole.end();
    }
    body.push_str(&escape_html(&interior[last..]));
    body.push_str("&quot;");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::token::Token;

    fn one(category: TokenCategory, render: RenderCategory, text: &str) -> String {
        render_tokens(&[(category, render, text)])
    }

    fn render_tokens(items: &[(TokenCategory, RenderCategory, &str)]) -> String {
        let classified: Vec<_> = items
            .iter()
            .map(|&(category, render_category, text)| Classified {
                token: Token::new(category, text),
                category: render_category,
            })
            .collect();
        render(&classified)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > \"d\""), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_html("plain 'text'"), "plain 'text'");
    }

    #[test]
    fn test_wraps_by_category() {
        assert_eq!(
            one(TokenCategory::Ident, RenderCategory::Keyword, "let"),
            r#"<span class="k">let</span>"#
        );
        assert_eq!(
            one(TokenCategory::Number, RenderCategory::Number, "42"),
            r#"<span class="mi">42</span>"#
        );
        assert_eq!(one(TokenCategory::Ident, RenderCategory::Plain, "x"), "x");
    }

    #[test]
    fn test_fallback_is_escaped_but_unwrapped() {
        assert_eq!(one(TokenCategory::Fallback, RenderCategory::Plain, "<"), "&lt;");
    }

    #[test]
    fn test_comment_is_escaped_inside_span() {
        assert_eq!(
            one(TokenCategory::Comment, RenderCategory::Comment, "// a<b"),
            r#"<span class="c1">// a&lt;b</span>"#
        );
    }

    #[test]
    fn test_adjacent_tokens_are_not_merged() {
        assert_eq!(
            render_tokens(&[
                (TokenCategory::Punctuation, RenderCategory::Punctuation, "("),
                (TokenCategory::Punctuation, RenderCategory::Punctuation, ")"),
            ]),
            r#"<span class="p">(</span><span class="p">)</span>"#
        );
    }

    #[test]
    fn test_string_with_interpolation() {
        assert_eq!(
            one(TokenCategory::String, RenderCategory::String, r#""hello {name}""#),
            r#"<span class="s">&quot;hello {<span class="n">name</span>}&quot;</span>"#
        );
    }

    #[test]
    fn test_string_with_several_markers() {
        assert_eq!(
            render_string_body(r#""{a} & {b<c}""#),
            r#"&quot;{<span class="n">a</span>} &amp; {<span class="n">b&lt;c</span>}&quot;"#
        );
    }

    #[test]
    fn test_empty_string_and_empty_marker() {
        assert_eq!(render_string_body(r#""""#), "&quot;&quot;");
        assert_eq!(
            render_string_body(r#""{}""#),
            r#"&quot;{<span class="n"></span>}&quot;"#
        );
    }

    #[test]
    fn test_nested_braces_are_not_parsed() {
        assert_eq!(
            render_string_body(r#""{a{b}c}""#),
            r#"&quot;{<span class="n">a{b</span>}c}&quot;"#
        );
    }

    #[test]
    fn test_unbalanced_brace_stays_literal() {
        assert_eq!(render_string_body(r#""open { here""#), "&quot;open { here&quot;");
    }

    #[test]
    fn test_marker_does_not_span_lines() {
        assert_eq!(render_string_body("\"{a\nb}\""), "&quot;{a\nb}&quot;");
    }
}
