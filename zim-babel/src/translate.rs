//! Page translation
//!
//! Translation of one page is a pure function of the page text, its path and
//! the page index. The index must already hold every page of the notebook,
//! otherwise links to pages not yet indexed come out unresolved.

use crate::common::links::Attachment;
use crate::error::Diagnostic;
use crate::formats::markdown::{frontmatter, MarkdownSerializer};
use crate::formats::zim::header;
use crate::formats::zim::line::{classify, fence, Fence};
use crate::notebook::index::PageIndex;
use crate::notebook::page::Page;
use std::collections::BTreeSet;

/// Options that change the translated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Prefix each note with YAML front matter
    pub front_matter: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { front_matter: true }
    }
}

/// Output of translating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub markdown: String,
    /// Notebook files referenced by images and file links
    pub attachments: BTreeSet<Attachment>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslationResult {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// An open `'''` or `{{{code:` block.
struct Block<'a> {
    info: String,
    closer: Fence,
    lines: Vec<&'a str>,
}

impl Block<'_> {
    fn render(&self, out: &mut Vec<String>) {
        let longest = self
            .lines
            .iter()
            .map(|line| leading_backticks(line))
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest.max(2) + 1);
        out.push(format!("{fence}{}", self.info));
        out.extend(self.lines.iter().map(|line| line.to_string()));
        out.push(fence);
    }
}

fn leading_backticks(line: &str) -> usize {
    line.trim_start().chars().take_while(|&c| c == '`').count()
}

/// Translate one page into Markdown.
pub fn translate(page: &Page, index: &PageIndex, options: &TranslateOptions) -> TranslationResult {
    let split = header::split(&page.text);
    let mut serializer = MarkdownSerializer::new(index, &page.path);
    let mut out: Vec<String> = Vec::new();
    let mut block: Option<Block> = None;

    for (number, line) in split.body.lines().enumerate() {
        serializer.at_line(split.body_line_offset + number + 1);

        if let Some(open) = block.as_mut() {
            if fence(line).as_ref() == Some(&open.closer) {
                open.render(&mut out);
                block = None;
            } else {
                open.lines.push(line);
            }
            continue;
        }

        match fence(line) {
            Some(Fence::Quotes) => {
                block = Some(Block {
                    info: String::new(),
                    closer: Fence::Quotes,
                    lines: Vec::new(),
                });
            }
            Some(Fence::CodeOpen { language }) => {
                block = Some(Block {
                    info: language.unwrap_or_default(),
                    closer: Fence::CodeClose,
                    lines: Vec::new(),
                });
            }
            _ => out.push(serializer.line(&classify(line))),
        }
    }

    if let Some(open) = block {
        log::debug!("{}: unterminated verbatim block closed at end of page", page.path);
        open.render(&mut out);
    }

    while out.last().is_some_and(|line| line.trim().is_empty()) {
        out.pop();
    }

    let mut markdown = String::new();
    if options.front_matter {
        if let Some(block) = frontmatter::render(page, &split.header) {
            markdown.push_str(&block);
        }
    }
    if !out.is_empty() {
        markdown.push_str(&out.join("\n"));
        markdown.push('\n');
    }

    let (attachments, diagnostics) = serializer.finish();
    TranslationResult {
        markdown,
        attachments,
        diagnostics,
    }
}
