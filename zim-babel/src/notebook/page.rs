//! Page identities
//!
//! A Zim page lives at `Projects/My_Page.txt` and is addressed in wiki text as
//! `Projects:My Page`. [`PagePath`] keeps the file-stem segments, since those
//! are what the output vault uses, and derives every other spelling from them.

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// File extension of Zim page sources
pub const PAGE_EXTENSION: &str = "txt";

/// File extension of translated pages
pub const MARKDOWN_EXTENSION: &str = "md";

/// Hierarchical address of a page, in file-stem form.
///
/// The empty path is the notebook root, which is a namespace and never a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PagePath {
    segments: Vec<String>,
}

impl PagePath {
    /// The notebook root namespace
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::<String>::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Parse a colon-separated page name (`Projects:Alpha`).
    ///
    /// Spaces are stored as underscores so the result matches the file-stem
    /// form produced by [`PagePath::from_source_file`].
    pub fn parse(name: &str) -> Self {
        Self::new(
            name.split(':')
                .map(|s| s.trim().replace(' ', "_"))
                .filter(|s| !s.is_empty()),
        )
    }

    /// Derive a page path from a notebook-relative `.txt` path.
    ///
    /// Returns `None` for paths that are not page sources or that leave the
    /// notebook (`..`, absolute paths).
    pub fn from_source_file(relative: &Path) -> Option<Self> {
        if relative.extension().and_then(|e| e.to_str()) != Some(PAGE_EXTENSION) {
            return None;
        }
        let stem = relative.with_extension("");
        let mut segments = Vec::new();
        for component in stem.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Last segment in file-stem form
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<PagePath> {
        if self.is_root() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Enclosing namespaces from the parent outward, ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = PagePath> + '_ {
        (0..self.segments.len()).rev().map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    pub fn join<S: AsRef<str>>(&self, more: &[S]) -> PagePath {
        let mut segments = self.segments.clone();
        segments.extend(more.iter().map(|s| s.as_ref().to_string()));
        Self::new(segments)
    }

    /// Normalised lookup key: trimmed, underscores as spaces, lowercase.
    pub fn key(&self) -> Vec<String> {
        self.segments.iter().map(|s| normalize_segment(s)).collect()
    }

    /// Colon-separated wiki name (`Projects:My Page`)
    pub fn name(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.replace('_', " "))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Human title of the page: the leaf with underscores as spaces.
    pub fn title(&self) -> String {
        self.leaf().map(|s| s.replace('_', " ")).unwrap_or_default()
    }

    /// Target used in Obsidian wikilinks (`Projects/My_Page`)
    pub fn link_path(&self) -> String {
        self.segments.join("/")
    }

    /// Notebook-relative source file (`Projects/My_Page.txt`)
    pub fn source_file(&self) -> PathBuf {
        self.file_with_extension(PAGE_EXTENSION)
    }

    /// Vault-relative output file (`Projects/My_Page.md`)
    pub fn markdown_file(&self) -> PathBuf {
        self.file_with_extension(MARKDOWN_EXTENSION)
    }

    /// Folder holding the page's attachments and sub-pages (`Projects/My_Page`)
    pub fn attachment_dir(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Folder holding the page file itself (`Projects`)
    pub fn directory(&self) -> PathBuf {
        self.parent()
            .map(|p| p.attachment_dir())
            .unwrap_or_default()
    }

    fn file_with_extension(&self, ext: &str) -> PathBuf {
        let mut path = self.attachment_dir();
        if let Some(leaf) = self.leaf() {
            // set_extension would clobber dotted stems such as `v1.2`
            path.set_file_name(format!("{leaf}.{ext}"));
        }
        path
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Normalise one name segment for comparison.
pub fn normalize_segment(segment: &str) -> String {
    segment.trim().replace('_', " ").to_lowercase()
}

/// A single notebook page: its identity, where it came from and its raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub path: PagePath,
    /// Notebook-relative source file
    pub source: PathBuf,
    pub text: String,
}

impl Page {
    pub fn new(path: PagePath, text: impl Into<String>) -> Self {
        let source = path.source_file();
        Self {
            path,
            source,
            text: text.into(),
        }
    }

    /// Convenience constructor from a colon-separated name.
    pub fn from_name(name: &str, text: impl Into<String>) -> Self {
        Self::new(PagePath::parse(name), text)
    }
}
