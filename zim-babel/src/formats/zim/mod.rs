//! Zim wiki format reader
//!
//! Zim stores each page as a `text/x-zim-wiki` text file: a short header,
//! a blank line, then a line oriented body. There is no formal grammar, so
//! reading is done with line and token heuristics that fall back to plain
//! text whenever a construct does not match exactly.
//!
//! # Element Mapping Table
//!
//! | Zim Element            | Markdown Equivalent          | Notes                                  |
//! |------------------------|------------------------------|----------------------------------------|
//! | `====== T ======`      | `# T`                        | Level = 7 - number of `=` (2..=6)      |
//! | `* item`               | `- item`                     | Indent copied exactly                  |
//! | `[ ] task`             | `- [ ] task`                 | Bare or bulleted                       |
//! | `[*]` / `[x]`          | `- [x]`                      |                                        |
//! | `[>]` / `[<]`          | `- [x] t <!-- zim: [>] -->`  | Marker kept in a comment               |
//! | `1.` / `a.`            | unchanged                    | Inline markup still rewritten          |
//! | `-----`                | `***`                        |                                        |
//! | `'''` block            | fenced code block            | Contents literal                       |
//! | `{{{code: lang="x"`    | fenced code block, `x`       | Closed by `}}}`                        |
//! | Inline:                |                              |                                        |
//! |   `**b**`              | `**b**`                      |                                        |
//! |   `//i//`              | `*i*`                        | Not after `:` (URLs)                   |
//! |   `__u__`              | `<u>u</u>`                   | No native underline                    |
//! |   `~~s~~`              | `~~s~~`                      |                                        |
//! |   `''v''`              | `` `v` ``                    | Interior never rewritten               |
//! |   `^{x}` / `_{x}`      | `<sup>x</sup>` / `<sub>x</sub>` |                                     |
//! |   `[[Page\|alias]]`    | `[[Path/Page\|alias]]`       | Resolved against the page index        |
//! |   `[[https://x]]`      | `[x](https://x)`             |                                        |
//! |   `{{./a.png?width=N}}`| `![[./Page/a.png\|N]]`       | Recorded as an attachment              |
//!
//! # Lossy Conversions
//!
//! - Cancelled (`[x]`) and done (`[*]`) tasks both become checked tasks
//! - Image `height` without `width` has no Obsidian equivalent and is dropped

pub mod header;
pub mod inline;
pub mod line;
pub mod reference;
