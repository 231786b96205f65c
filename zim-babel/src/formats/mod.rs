//! Format implementations
//!
//! `zim` reads Zim wiki markup into the IR, `markdown` renders the IR as
//! Obsidian flavoured Markdown.

pub mod markdown;
pub mod zim;
