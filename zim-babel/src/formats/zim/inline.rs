//! Inline markup tokenizer
//!
//! Scans a line left to right and cuts it into [`Inline`] nodes. At every
//! position the most specific span is tried first: images, links, verbatim,
//! then the paired emphasis markers. Links, images and verbatim spans are
//! opaque: their interiors are never rescanned, and a closing emphasis marker
//! is never looked for inside them.
//!
//! Bare URLs are opaque as well, so the `//` of `https://host/a//b` never
//! opens emphasis. A marker without a matching closer is plain text.

use super::reference::{parse_image, parse_link};
use crate::ir::nodes::{Inline, MalformedSpan};
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-z][A-Za-z0-9+.-]*://[^\s*~\[\]{}<>"']+"#).unwrap());

/// Paired markers that wrap nested inline content
const PAIRED: &[(&str, fn(Vec<Inline>) -> Inline)] = &[
    ("**", Inline::Strong),
    ("//", Inline::Emphasis),
    ("__", Inline::Underline),
    ("~~", Inline::Strike),
];

/// Tokenize one line of Zim text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < text.len() {
        if let Some(len) = bare_url(text, pos) {
            literal.push_str(&text[pos..pos + len]);
            pos += len;
            continue;
        }
        if let Some((node, end)) = match_span(text, pos) {
            flush(&mut literal, &mut nodes);
            nodes.push(node);
            pos = end;
            continue;
        }
        let Some(ch) = text[pos..].chars().next() else {
            break;
        };
        literal.push(ch);
        pos += ch.len_utf8();
    }

    flush(&mut literal, &mut nodes);
    nodes
}

fn flush(literal: &mut String, nodes: &mut Vec<Inline>) {
    if !literal.is_empty() {
        nodes.push(Inline::Text(std::mem::take(literal)));
    }
}

/// Try every span kind at `pos`; returns the node and the byte offset after it.
fn match_span(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let rest = &text[pos..];

    if rest.starts_with("{{") && !rest.starts_with("{{{") {
        let close = find_from(text, pos + 2, "}}")?;
        let inner = &text[pos + 2..close];
        let end = close + 2;
        let node = match parse_image(inner) {
            Some(image) => Inline::Image(image),
            None => Inline::Malformed(MalformedSpan {
                raw: text[pos..end].to_string(),
                is_image: true,
            }),
        };
        return Some((node, end));
    }

    if rest.starts_with("[[") {
        let close = find_from(text, pos + 2, "]]")?;
        let inner = &text[pos + 2..close];
        let end = close + 2;
        let node = match parse_link(inner) {
            Some(link) => Inline::Link(link),
            None => Inline::Malformed(MalformedSpan {
                raw: text[pos..end].to_string(),
                is_image: false,
            }),
        };
        return Some((node, end));
    }

    if rest.starts_with("''") {
        let close = find_from(text, pos + 2, "''")?;
        if close == pos + 2 {
            return None;
        }
        return Some((Inline::Verbatim(text[pos + 2..close].to_string()), close + 2));
    }

    if rest.starts_with("^{") || rest.starts_with("_{") {
        let close = find_from(text, pos + 2, "}")?;
        if close == pos + 2 {
            return None;
        }
        let children = parse_inline(&text[pos + 2..close]);
        let node = if rest.starts_with('^') {
            Inline::Superscript(children)
        } else {
            Inline::Subscript(children)
        };
        return Some((node, close + 1));
    }

    for (marker, wrap) in PAIRED {
        if !rest.starts_with(marker) || !opens(text, pos, marker) {
            continue;
        }
        let start = pos + marker.len();
        if let Some(close) = find_closer(text, start, marker) {
            let children = parse_inline(&text[start..close]);
            return Some((wrap(children), close + marker.len()));
        }
    }

    None
}

/// Length of a bare URL starting at `pos`, if one starts there.
fn bare_url(text: &str, pos: usize) -> Option<usize> {
    if text[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    BARE_URL.find(&text[pos..]).map(|m| m.end())
}

/// Byte offset of `needle` at or after `from`.
fn find_from(text: &str, from: usize, needle: &str) -> Option<usize> {
    text.get(from..)?.find(needle).map(|i| from + i)
}

/// An opener must be followed by non-space content. `//` directly after a
/// colon is a URL scheme separator, not emphasis.
fn opens(text: &str, pos: usize, marker: &str) -> bool {
    let after = text[pos + marker.len()..].chars().next();
    if after.map_or(true, char::is_whitespace) {
        return false;
    }
    !(marker == "//" && text[..pos].ends_with(':'))
}

/// A closer must follow non-space content, and for `//` not a colon.
fn closes(text: &str, pos: usize, marker: &str) -> bool {
    match text[..pos].chars().next_back() {
        Some(prev) if prev.is_whitespace() => false,
        Some(':') if marker == "//" => false,
        Some(_) => true,
        None => false,
    }
}

/// Find the closing `marker` for a span whose content starts at `start`,
/// skipping over opaque spans.
fn find_closer(text: &str, start: usize, marker: &str) -> Option<usize> {
    let mut pos = start;
    while pos < text.len() {
        let rest = &text[pos..];
        let skip = if rest.starts_with("[[") {
            find_from(text, pos + 2, "]]").map(|close| close + 2)
        } else if rest.starts_with("{{") {
            find_from(text, pos + 2, "}}").map(|close| close + 2)
        } else if rest.starts_with("''") {
            find_from(text, pos + 2, "''").map(|close| close + 2)
        } else {
            bare_url(text, pos).map(|len| pos + len)
        };
        if let Some(next) = skip {
            pos = next;
            continue;
        }
        if pos > start && rest.starts_with(marker) && closes(text, pos, marker) {
            return Some(pos);
        }
        pos += rest.chars().next().map_or(1, char::len_utf8);
    }
    None
}
