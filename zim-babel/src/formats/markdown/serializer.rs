//! Markdown serialization (IR → Obsidian Markdown)
//!
//! Renders classified lines and their inline nodes one line at a time, so the
//! output keeps the line structure of the source page. Links and images are
//! resolved here; every attachment and diagnostic met on the way is collected
//! for the caller.

use crate::common::links::{Attachment, LinkResolver, Resolution};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::formats::zim::inline::parse_inline;
use crate::ir::nodes::{AddressMode, ExternalKind, ImageRef, Inline, Line, Reference, TaskState};
use crate::notebook::index::PageIndex;
use crate::notebook::page::PagePath;
use std::collections::BTreeSet;
use std::path::Path;

/// Stateful renderer for the lines of one page.
pub struct MarkdownSerializer<'a> {
    resolver: LinkResolver<'a>,
    page: &'a PagePath,
    line: usize,
    attachments: BTreeSet<Attachment>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> MarkdownSerializer<'a> {
    pub fn new(index: &'a PageIndex, page: &'a PagePath) -> Self {
        Self {
            resolver: LinkResolver::new(index),
            page,
            line: 0,
            attachments: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Set the source line number used for diagnostics.
    pub fn at_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Render one classified line.
    pub fn line(&mut self, line: &Line<'_>) -> String {
        match *line {
            Line::Heading { level, text } => {
                format!("{} {}", "#".repeat(level as usize), self.text(text.trim()))
            }
            Line::Bullet { indent, text } => item(indent, "-", &self.text(text)),
            Line::Task {
                indent,
                state,
                text,
            } => {
                let mut body = self.text(text);
                if matches!(state, TaskState::Migrated | TaskState::MigratedBack) {
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(&format!("<!-- zim: {} -->", state.marker()));
                }
                let checkbox = match state {
                    TaskState::Open => "- [ ]",
                    _ => "- [x]",
                };
                item(indent, checkbox, &body)
            }
            Line::Numbered {
                indent,
                marker,
                text,
            } => format!("{indent}{marker}{}", self.text(text)),
            Line::Rule => "***".to_string(),
            Line::Text(text) => self.text(text),
        }
    }

    /// Tokenize and render inline markup.
    pub fn text(&mut self, text: &str) -> String {
        let nodes = parse_inline(text);
        self.inlines(&nodes)
    }

    pub fn inlines(&mut self, nodes: &[Inline]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.inline(node, &mut out);
        }
        out
    }

    fn inline(&mut self, node: &Inline, out: &mut String) {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(children) => self.wrap(out, "**", children, "**"),
            Inline::Emphasis(children) => self.wrap(out, "*", children, "*"),
            Inline::Underline(children) => self.wrap(out, "<u>", children, "</u>"),
            Inline::Strike(children) => self.wrap(out, "~~", children, "~~"),
            Inline::Superscript(children) => self.wrap(out, "<sup>", children, "</sup>"),
            Inline::Subscript(children) => self.wrap(out, "<sub>", children, "</sub>"),
            Inline::Verbatim(code) => out.push_str(&code_span(code)),
            Inline::Link(reference) => {
                let rendered = self.link(reference);
                out.push_str(&rendered);
            }
            Inline::Image(image) => {
                let rendered = self.image(image);
                out.push_str(&rendered);
            }
            Inline::Malformed(span) => {
                let kind = if span.is_image {
                    DiagnosticKind::EmptyImage
                } else {
                    DiagnosticKind::EmptyLink
                };
                log::warn!(
                    "{}: line {}: no target in '{}'",
                    self.page,
                    self.line,
                    span.raw
                );
                self.report(kind, &span.raw);
                out.push_str(&span.raw);
            }
        }
    }

    fn wrap(&mut self, out: &mut String, open: &str, children: &[Inline], close: &str) {
        out.push_str(open);
        for child in children {
            self.inline(child, out);
        }
        out.push_str(close);
    }

    fn link(&mut self, reference: &Reference) -> String {
        match reference.mode {
            AddressMode::External(ExternalKind::Url) => {
                let display = reference.alias.as_deref().unwrap_or(&reference.target);
                format!("[{display}]({})", destination(&reference.target))
            }
            AddressMode::External(ExternalKind::File) => self.file_link(reference),
            _ => self.page_link(reference),
        }
    }

    fn page_link(&mut self, reference: &Reference) -> String {
        let (resolution, ambiguous) = self.resolver.resolve_checked(reference, self.page);
        let path = match resolution {
            // `[[#anchor]]` stays within the note
            Resolution::Page(_) if reference.segments.is_empty() => String::new(),
            Resolution::Page(page) => {
                if ambiguous {
                    self.report(DiagnosticKind::AmbiguousLink, &reference.raw);
                }
                page.link_path()
            }
            Resolution::External(target) => target,
            Resolution::Unresolved => {
                self.report(DiagnosticKind::UnresolvedLink, &reference.raw);
                match reference.mode {
                    // `+Sub` names a page below this one even when it does not exist yet
                    AddressMode::Child => {
                        self.page.join(reference.segments.as_slice()).link_path()
                    }
                    _ => reference.segments.join("/"),
                }
            }
        };

        let mut target = path.clone();
        if let Some(anchor) = &reference.anchor {
            target.push('#');
            target.push_str(anchor);
        }
        let display = reference
            .alias
            .as_deref()
            .unwrap_or_else(|| reference.leaf());
        if display.is_empty() || display == path {
            format!("[[{target}]]")
        } else {
            format!("[[{target}|{display}]]")
        }
    }

    fn file_link(&mut self, reference: &Reference) -> String {
        let target = &reference.target;
        let display = reference.alias.clone().unwrap_or_else(|| {
            Path::new(target)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(target.as_str())
                .to_string()
        });
        let href = if is_notebook_relative(target) {
            match self.resolver.resolve_attachment(target, self.page) {
                Some(attachment) => {
                    let href = attachment.embed_path(self.page);
                    self.attachments.insert(attachment);
                    href
                }
                None => target.clone(),
            }
        } else {
            target.clone()
        };
        format!("[{display}]({})", destination(&href))
    }

    fn image(&mut self, image: &ImageRef) -> String {
        let attachment = match image.mode {
            AddressMode::External(_) => None,
            _ => self.resolver.resolve_attachment(&image.target, self.page),
        };
        let size = match (image.width, image.height) {
            (Some(width), Some(height)) => format!("|{width}x{height}"),
            (Some(width), None) => format!("|{width}"),
            _ => String::new(),
        };

        match attachment {
            Some(attachment) => {
                let embed = attachment.embed_path(self.page);
                self.attachments.insert(attachment);
                format!("![[{embed}{size}]]")
            }
            None => format!("![{size}]({})", destination(&image.target)),
        }
    }

    fn report(&mut self, kind: DiagnosticKind, raw: &str) {
        self.diagnostics.push(Diagnostic::new(self.line, kind, raw));
    }

    /// Attachments and diagnostics collected so far.
    pub fn finish(self) -> (BTreeSet<Attachment>, Vec<Diagnostic>) {
        (self.attachments, self.diagnostics)
    }
}

fn item(indent: &str, marker: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{indent}{marker}")
    } else {
        format!("{indent}{marker} {body}")
    }
}

fn is_notebook_relative(target: &str) -> bool {
    target.starts_with("./") || target.starts_with("../")
}

/// Link destination, wrapped in `<>` when a bare one would not parse.
fn destination(href: &str) -> String {
    if href.contains(|c| matches!(c, ' ' | '(' | ')')) {
        format!("<{href}>")
    } else {
        href.to_string()
    }
}

/// Inline code span whose fence is longer than any backtick run inside.
pub fn code_span(code: &str) -> String {
    let longest = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}
