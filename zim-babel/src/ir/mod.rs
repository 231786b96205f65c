//! Intermediate Representation (IR) for Zim pages.
//!
//! The Zim reader produces these nodes one line at a time; the Markdown
//! writer consumes them. Neither side knows about the other's syntax, which
//! keeps line classification and inline rewriting testable on their own.

pub mod nodes;
