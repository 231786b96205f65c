//! Obsidian Markdown writer
//!
//! Output stays line for line with the source page so that diffs between a
//! notebook and its vault remain readable. Nothing is reflowed: only the
//! markers of each construct change.
//!
//! Obsidian specifics used here:
//! - `[[Folder/Page|display]]` wikilinks, path relative to the vault root
//! - `![[./Folder/file.png|320]]` embeds with a size annotation
//! - `- [ ]` / `- [x]` tasks
//! - YAML front matter between `---` lines

pub mod frontmatter;
pub mod serializer;

pub use serializer::MarkdownSerializer;
