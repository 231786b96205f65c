//! Shared helpers for loading the sample notebook.

use std::path::PathBuf;
use zim_babel::{translate, Notebook, Page, PageIndex, TranslateOptions, TranslationResult};

/// Root of the sample notebook under tests/fixtures.
pub fn sample_notebook() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_notebook")
}

pub fn open_sample() -> Notebook {
    Notebook::open(sample_notebook()).expect("sample notebook should open")
}

/// Translate one page of the sample notebook, by colon name.
pub fn translate_sample(name: &str, front_matter: bool) -> TranslationResult {
    let notebook = open_sample();
    let index = notebook.index();
    let page = find(notebook.pages(), name);
    translate(page, &index, &TranslateOptions { front_matter })
}

pub fn find<'a>(pages: &'a [Page], name: &str) -> &'a Page {
    pages
        .iter()
        .find(|page| page.path.name() == name)
        .unwrap_or_else(|| panic!("no page named {name}"))
}

/// Translate a standalone page against an index of the given page names.
pub fn translate_text(on: &str, text: &str, others: &[&str]) -> TranslationResult {
    let page = Page::from_name(on, text);
    let mut pages: Vec<Page> = others.iter().map(|name| Page::from_name(name, "")).collect();
    pages.push(page.clone());
    let index = PageIndex::build(&pages);
    translate(
        &page,
        &index,
        &TranslateOptions {
            front_matter: false,
        },
    )
}
