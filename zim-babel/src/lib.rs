//! Zim wiki notebooks to Obsidian vaults
//!
//!     This crate translates pages written in Zim's wiki markup into Obsidian flavoured Markdown,
//!     and publishes a whole notebook folder as a vault.
//!
//!     TLDR: For contributors:
//!         - Translation is a pure function of (page text, page path, page index). No I/O happens
//!           below ./translate.rs, which keeps every heuristic testable with plain strings.
//!         - The page index must hold the complete page set before any page is translated.
//!         - Malformed markup never fails a page. It is passed through and reported as a Diagnostic.
//!
//! Architecture
//!
//!     Reading and writing are split around a small IR (./ir/nodes.rs). The Zim reader classifies
//!     each line and tokenizes its inline markup into IR nodes; the Markdown writer renders them,
//!     resolving links and images through ./common/links.rs on the way. The two passes are
//!     independent functions composed by ./translate.rs.
//!
//!     This is a pure lib, that is, it powers zim2obsidian but is shell agnostic: no code here
//!     prints, reads environment variables or exits.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError, Diagnostic
//!     ├── translate.rs            # Page translation
//!     ├── publish.rs              # Notebook → vault pipeline
//!     ├── notebook
//!     │   ├── page.rs             # PagePath, Page
//!     │   ├── index.rs            # PageIndex
//!     │   └── mod.rs              # Notebook discovery
//!     ├── formats
//!     │   ├── zim                 # header, line, inline, reference readers
//!     │   └── markdown            # serializer, front matter
//!     ├── ir                      # Intermediate Representation
//!     └── common                  # Link and attachment resolution
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── <area>.rs
//!     └── fixtures
//!         └── sample_notebook
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Link Resolution
//!
//!     Zim has three ways of addressing a page: `:Root:Page` from the notebook root, `+Child` below
//!     the current page and a bare `Name`. Bare names are searched in the current namespace first
//!     and then in each enclosing namespace up to the root. When several pages of the same depth
//!     match, the one whose normalised path sorts first wins. This is deterministic but arbitrary,
//!     and such links are reported as ambiguous.

pub mod common;
pub mod error;
pub mod formats;
pub mod ir;
pub mod notebook;
pub mod publish;
pub mod translate;

pub use common::links::{Attachment, LinkResolver, Resolution};
pub use error::{ConvertError, Diagnostic, DiagnosticKind};
pub use notebook::index::PageIndex;
pub use notebook::page::{Page, PagePath};
pub use notebook::Notebook;
pub use publish::{convert, ConvertReport, ConvertSpec};
pub use translate::{translate, TranslateOptions, TranslationResult};
