//! Format independent logic shared by the Zim reader and the Markdown writer.

pub mod links;
