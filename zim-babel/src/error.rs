//! Error and diagnostic types
//!
//! Translation itself never fails: malformed markup is passed through and
//! reported as a [`Diagnostic`]. Only the notebook I/O layer returns
//! [`ConvertError`].

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while reading a notebook or writing a vault
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The notebook root is missing or not a directory
    NotADirectory(PathBuf),
    /// Reading, copying or writing a file failed
    Io { path: PathBuf, message: String },
    /// Walking the notebook tree failed
    Walk(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NotADirectory(path) => {
                write!(f, "src_dir is not a directory: {}", path.display())
            }
            ConvertError::Io { path, message } => write!(f, "{}: {message}", path.display()),
            ConvertError::Walk(msg) => write!(f, "Failed to walk notebook: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// What a [`Diagnostic`] is about
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// `[[]]` or a link with nothing but whitespace and markers inside
    EmptyLink,
    /// `{{}}` or an image without a path
    EmptyImage,
    /// A page reference that matched nothing in the notebook
    UnresolvedLink,
    /// A page reference that matched several pages at the same depth
    AmbiguousLink,
}

/// A per-occurrence note produced while translating a page
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Diagnostic {
    /// 1-based line number in the page file (header included)
    pub line: usize,
    pub kind: DiagnosticKind,
    /// The offending source text, as written
    pub raw: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, raw: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            raw: raw.into(),
        }
    }

    /// Malformed references are warnings; resolution notes are informational.
    pub fn is_warning(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::EmptyLink | DiagnosticKind::EmptyImage
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DiagnosticKind::EmptyLink => "empty link target",
            DiagnosticKind::EmptyImage => "empty image target",
            DiagnosticKind::UnresolvedLink => "unresolved link",
            DiagnosticKind::AmbiguousLink => "ambiguous link",
        };
        write!(f, "line {}: {what}: {}", self.line, self.raw)
    }
}
