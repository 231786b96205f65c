//! Notebook discovery
//!
//! Walks a Zim notebook folder and sorts its files into pages and
//! attachments. A `.txt` file is only a page when its first line declares
//! the Zim wiki content type; anything else, including plain text notes
//! dropped into the tree, is copied as an attachment.

pub mod index;
pub mod page;

use crate::error::ConvertError;
use crate::formats::zim::header::ZIM_CONTENT_TYPE;
use index::PageIndex;
use page::{Page, PagePath};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Zim's notebook configuration file, not part of the content
const NOTEBOOK_CONFIG: &str = "notebook.zim";

/// Zim's index cache folder
const CACHE_DIR: &str = ".zim";

/// The pages and attachments of a notebook on disk.
#[derive(Debug, Clone)]
pub struct Notebook {
    root: PathBuf,
    pages: Vec<Page>,
    attachments: Vec<PathBuf>,
}

impl Notebook {
    /// Scan the notebook at `root`. Entries are visited in file name order,
    /// so the result is the same on every run.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ConvertError::NotADirectory(root));
        }

        let mut pages = Vec::new();
        let mut attachments = Vec::new();

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry));
        for entry in walker {
            let entry = entry.map_err(|e| ConvertError::Walk(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&root)
                .map_err(|e| ConvertError::Walk(e.to_string()))?
                .to_path_buf();

            match read_page(entry.path(), &relative)? {
                Some(page) => pages.push(page),
                None => attachments.push(relative),
            }
        }

        log::info!(
            "Found {} pages and {} other files in {}",
            pages.len(),
            attachments.len(),
            root.display()
        );
        Ok(Self {
            root,
            pages,
            attachments,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Notebook-relative paths of every file that is not a page
    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    pub fn index(&self) -> PageIndex {
        PageIndex::build(&self.pages)
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        name == CACHE_DIR
    } else {
        entry.depth() == 1 && name == NOTEBOOK_CONFIG
    }
}

/// Read `path` as a page if it is one.
fn read_page(path: &Path, relative: &Path) -> Result<Option<Page>, ConvertError> {
    let Some(page_path) = PagePath::from_source_file(relative) else {
        return Ok(None);
    };
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    let text = decode(&bytes);
    if !is_zim_page_text(&text) {
        log::debug!("{} is not a Zim page, copying as a file", relative.display());
        return Ok(None);
    }
    Ok(Some(Page {
        path: page_path,
        source: relative.to_path_buf(),
        text,
    }))
}

/// UTF-8 with the byte order mark removed and invalid bytes replaced.
fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

/// Whether the first line is a `Content-Type` header naming Zim wiki markup.
pub fn is_zim_page_text(text: &str) -> bool {
    let first = text.lines().next().unwrap_or("");
    let Some((key, value)) = first.split_once(':') else {
        return false;
    };
    key.trim().eq_ignore_ascii_case("Content-Type")
        && value.to_ascii_lowercase().contains(ZIM_CONTENT_TYPE)
}
