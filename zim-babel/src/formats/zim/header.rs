//! Page header block
//!
//! Zim page files start with a few `Key: value` lines ended by a blank line:
//!
//! ```text
//! Content-Type: text/x-zim-wiki
//! Wiki-Format: zim 0.6
//! Creation-Date: 2024-03-01T09:15:42+01:00
//! ```
//!
//! Stripping is best effort. A leading run of `Key: value` lines only counts
//! as a header when it names `Content-Type` or `Wiki-Format`, so a body that
//! happens to start with `Note: remember milk` is left alone.

use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type Zim writes into the `Content-Type` header of every page
pub const ZIM_CONTENT_TYPE: &str = "text/x-zim-wiki";

static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9-]*):\s*(.*?)\s*$").unwrap());

/// Parsed header fields, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<(String, String)>,
}

impl Header {
    /// Case-insensitive field lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }

    pub fn wiki_format(&self) -> Option<&str> {
        self.get("Wiki-Format")
    }

    pub fn creation_date(&self) -> Option<&str> {
        self.get("Creation-Date")
    }
}

/// A page split into its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPage<'a> {
    pub header: Header,
    pub body: &'a str,
    /// Number of source lines consumed by the header and its blank line
    pub body_line_offset: usize,
}

/// Split raw page text into header and body.
pub fn split(raw: &str) -> SplitPage<'_> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut fields = Vec::new();
    let mut offset = 0;
    let mut consumed_lines = 0;
    let mut terminated = false;

    for line in raw.split_inclusive('\n') {
        let content = line.trim_end_matches(&['\n', '\r'][..]);
        if content.trim().is_empty() {
            offset += line.len();
            consumed_lines += 1;
            terminated = true;
            break;
        }
        match HEADER_LINE.captures(content) {
            Some(caps) => {
                fields.push((caps[1].to_string(), caps[2].to_string()));
                offset += line.len();
                consumed_lines += 1;
            }
            None => break,
        }
    }

    let ends_cleanly = terminated || offset == raw.len();
    let header = Header { fields };
    let recognised = ends_cleanly
        && (header.content_type().is_some() || header.wiki_format().is_some());

    if recognised {
        SplitPage {
            header,
            body: &raw[offset..],
            body_line_offset: consumed_lines,
        }
    } else {
        SplitPage {
            header: Header::default(),
            body: raw,
            body_line_offset: 0,
        }
    }
}
