//! Link and attachment resolution against the page index.
//!
//! Page references are looked up with [`PageIndex::lookup`]; the first
//! candidate wins. Attachment paths are resolved against the page's own
//! attachment folder (`Projects/Alpha/` for `Projects:Alpha`) and written back
//! relative to the folder holding the translated note, which is where
//! Obsidian resolves `./` embeds from.

use crate::ir::nodes::{AddressMode, Reference};
use crate::notebook::index::PageIndex;
use crate::notebook::page::PagePath;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Outcome of resolving a page reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(PagePath),
    /// URL or file path, passed through as written
    External(String),
    Unresolved,
}

/// A notebook file referenced from a page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Attachment {
    /// Target as written in the page (`./img.png`)
    pub target: String,
    /// Notebook-relative location (`Projects/Alpha/img.png`)
    pub path: PathBuf,
}

impl Attachment {
    /// Path to write in the translated note of `page`, relative to the
    /// folder holding that note.
    pub fn embed_path(&self, page: &PagePath) -> String {
        let relative =
            pathdiff::diff_paths(&self.path, page.directory()).unwrap_or_else(|| self.path.clone());
        let slashed = to_slash(&relative);
        if slashed.starts_with("../") {
            slashed
        } else {
            format!("./{slashed}")
        }
    }
}

pub struct LinkResolver<'a> {
    index: &'a PageIndex,
}

impl<'a> LinkResolver<'a> {
    pub fn new(index: &'a PageIndex) -> Self {
        Self { index }
    }

    pub fn resolve(&self, reference: &Reference, current: &PagePath) -> Resolution {
        self.resolve_checked(reference, current).0
    }

    /// Like [`LinkResolver::resolve`], also telling whether other pages at the
    /// same depth matched as well.
    pub fn resolve_checked(&self, reference: &Reference, current: &PagePath) -> (Resolution, bool) {
        if let AddressMode::External(_) = reference.mode {
            return (Resolution::External(reference.target.clone()), false);
        }
        if reference.segments.is_empty() {
            // `[[#section]]`
            return (Resolution::Page(current.clone()), false);
        }

        let candidates = self
            .index
            .lookup(reference.segments.as_slice(), &reference.mode, current);
        let Some(first) = candidates.first() else {
            log::debug!("Unresolved link '{}' on page '{current}'", reference.raw);
            return (Resolution::Unresolved, false);
        };

        let ambiguous = candidates
            .get(1)
            .is_some_and(|second| second.depth() == first.depth());
        if ambiguous {
            log::debug!(
                "Link '{}' on page '{current}' matches {} pages, using '{first}'",
                reference.raw,
                candidates.len()
            );
        }
        (Resolution::Page((*first).clone()), ambiguous)
    }

    /// Resolve a file target (`./img.png`, `../shared/logo.png`, `img.png`)
    /// written on page `current` to a notebook file.
    ///
    /// Returns `None` for targets that leave the notebook.
    pub fn resolve_attachment(&self, target: &str, current: &PagePath) -> Option<Attachment> {
        let path = join_within(&current.attachment_dir(), target)?;
        Some(Attachment {
            target: target.to_string(),
            path,
        })
    }
}

/// Apply a `/` separated relative path to `base`, refusing to climb above the
/// notebook root.
fn join_within(base: &Path, target: &str) -> Option<PathBuf> {
    let mut parts: Vec<&str> = base
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    for part in target.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            part => parts.push(part),
        }
    }

    let named = target
        .split(is_separator)
        .filter(|part| !part.is_empty() && *part != ".")
        .last()
        .is_some_and(|part| part != "..");
    if !named || parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str().map(str::to_string),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
