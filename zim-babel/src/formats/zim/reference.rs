//! Parsing of link and image targets
//!
//! Zim addresses pages three ways: `:Root:Page` from the notebook root,
//! `+Child` below the current page and a bare `Name` searched through the
//! enclosing namespaces. Everything with a URI scheme or a file system shape
//! is external.

use crate::ir::nodes::{AddressMode, ExternalKind, ImageRef, Reference};
use url::Url;

/// Parse the inside of `[[...]]`.
///
/// Returns `None` when no target can be extracted (`[[]]`, `[[|alias]]`,
/// `[[:]]`), which callers report and keep verbatim.
pub fn parse_link(raw: &str) -> Option<Reference> {
    let (target_part, alias) = match raw.split_once('|') {
        Some((target, alias)) => (target, Some(alias.trim()).filter(|a| !a.is_empty())),
        None => (raw, None),
    };
    let written = target_part.trim();
    if written.is_empty() {
        return None;
    }

    if let Some(kind) = external_kind(written) {
        return Some(Reference {
            raw: raw.to_string(),
            mode: AddressMode::External(kind),
            target: written.to_string(),
            segments: Vec::new(),
            anchor: None,
            alias: alias.map(str::to_string),
        });
    }

    let (path_part, anchor) = match written.split_once('#') {
        Some((path, anchor)) => (path, Some(anchor.trim()).filter(|a| !a.is_empty())),
        None => (written, None),
    };

    let (mode, stripped) = if let Some(rest) = path_part.strip_prefix(':') {
        (AddressMode::Absolute, rest)
    } else if let Some(rest) = path_part.strip_prefix('+') {
        (AddressMode::Child, rest)
    } else {
        (AddressMode::Relative, path_part)
    };

    let segments: Vec<String> = stripped
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    // `[[#section]]` points into the current page; `[[:]]` points nowhere.
    if segments.is_empty() && (anchor.is_none() || mode != AddressMode::Relative) {
        return None;
    }

    Some(Reference {
        raw: raw.to_string(),
        mode,
        target: stripped.trim().to_string(),
        segments,
        anchor: anchor.map(str::to_string),
        alias: alias.map(str::to_string),
    })
}

/// Parse the inside of `{{...}}`.
///
/// Returns `None` when the path is empty.
pub fn parse_image(raw: &str) -> Option<ImageRef> {
    let inner = raw.trim();
    let (path, query) = match inner.split_once('?') {
        Some((path, query)) => (path.trim(), Some(query)),
        None => (inner, None),
    };
    if path.is_empty() || path == "." || path == "./" {
        return None;
    }

    let mut width = None;
    let mut height = None;
    for pair in query.into_iter().flat_map(|q| q.split('&')) {
        match pair.split_once('=') {
            Some(("width", value)) => width = value.trim().parse().ok(),
            Some(("height", value)) => height = value.trim().parse().ok(),
            _ => {}
        }
    }

    let mode = if let Some(kind) = external_kind(path) {
        match kind {
            ExternalKind::File if path.starts_with("./") => AddressMode::Child,
            ExternalKind::File if path.starts_with("../") => AddressMode::Relative,
            kind => AddressMode::External(kind),
        }
    } else {
        AddressMode::Child
    };

    Some(ImageRef {
        raw: raw.to_string(),
        mode,
        target: path.to_string(),
        width,
        height,
    })
}

/// Classify targets that are not notebook pages.
pub fn external_kind(target: &str) -> Option<ExternalKind> {
    if is_url(target) {
        return Some(ExternalKind::Url);
    }
    let file_like = ["./", "../", "/", "~/"]
        .iter()
        .any(|prefix| target.starts_with(prefix))
        || target.starts_with('\\');
    file_like.then_some(ExternalKind::File)
}

/// `Projects:Alpha` parses as a URL with scheme `projects`, so only accept
/// the shapes that are unambiguous in wiki text.
fn is_url(target: &str) -> bool {
    let Ok(url) = Url::parse(target) else {
        return false;
    };
    let scheme = url.scheme();
    scheme.len() > 1 && (target.contains("://") || matches!(scheme, "mailto" | "tel"))
}
