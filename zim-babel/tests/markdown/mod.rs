//! Markdown output tests
//!
//! Whole-page translation of the sample notebook, checked as text and as a
//! parsed CommonMark tree.

mod export;
mod frontmatter;
mod properties;
