//! YAML front matter for translated notes

use crate::formats::zim::header::Header;
use crate::notebook::page::Page;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path};

#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: String,
    zim_page: String,
    zim_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zim_wiki_format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zim_content_type: Option<&'a str>,
    /// Every header field, sorted by key
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    zim_headers: BTreeMap<&'a str, &'a str>,
}

/// Render the `---` delimited block for `page`, followed by a blank line.
///
/// Header values are copied verbatim, so the creation date keeps Zim's
/// timestamp format. Returns `None` if YAML serialization fails, in which
/// case the note simply has no front matter.
pub fn render(page: &Page, header: &Header) -> Option<String> {
    let front_matter = FrontMatter {
        title: page.path.title(),
        zim_page: page.path.name(),
        zim_source: slashed(&page.source),
        created: non_empty(header.creation_date()),
        zim_wiki_format: non_empty(header.wiki_format()),
        zim_content_type: non_empty(header.content_type()),
        zim_headers: header.fields().collect(),
    };
    match serde_yaml::to_string(&front_matter) {
        Ok(yaml) => Some(format!("---\n{yaml}---\n\n")),
        Err(err) => {
            log::warn!("{}: could not write front matter: {err}", page.path);
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Notebook-relative path with `/` separators on every platform
fn slashed(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
