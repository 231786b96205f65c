//! Core data structures for the Intermediate Representation (IR).

/// How a reference target is addressed in the source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// `:Projects:Alpha`, looked up from the notebook root
    Absolute,
    /// `+Alpha`, a direct child of the current page
    Child,
    /// `Alpha`, searched through the enclosing namespaces
    Relative,
    /// Anything that is not a notebook page, passed through
    External(ExternalKind),
}

/// Kinds of targets that live outside the page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    /// Has a URI scheme (`https://`, `file://`, `mailto:`)
    Url,
    /// A file system path (`./doc.pdf`, `../x`, `/abs`, `~/home`)
    File,
}

/// A parsed `[[target#anchor|alias]]` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Everything between the brackets, as written
    pub raw: String,
    pub mode: AddressMode,
    /// Target without its marker (`Projects:Alpha`, `https://x`, `./a.pdf`)
    pub target: String,
    /// Page path segments for page references, empty otherwise
    pub segments: Vec<String>,
    pub anchor: Option<String>,
    pub alias: Option<String>,
}

impl Reference {
    /// Leaf of the written target, used as link text when there is no alias.
    pub fn leaf(&self) -> &str {
        match self.mode {
            AddressMode::External(_) => &self.target,
            _ => self.segments.last().map(String::as_str).unwrap_or(""),
        }
    }
}

/// A parsed `{{target?width=N}}` embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Everything between the braces, as written
    pub raw: String,
    /// `Child` for page attachments, `Relative` for `../` paths, `External`
    /// for everything outside the notebook
    pub mode: AddressMode,
    /// Path without the query string
    pub target: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Inline content of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Underline(Vec<Inline>),
    Strike(Vec<Inline>),
    Superscript(Vec<Inline>),
    Subscript(Vec<Inline>),
    /// Literal content, never rescanned
    Verbatim(String),
    Link(Reference),
    Image(ImageRef),
    /// A bracketed span with no usable target, kept verbatim
    Malformed(MalformedSpan),
}

/// An unusable `[[...]]` or `{{...}}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSpan {
    pub raw: String,
    pub is_image: bool,
}

/// State of a checkbox item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// `[ ]`
    Open,
    /// `[*]`
    Done,
    /// `[x]`
    Cancelled,
    /// `[>]`, moved forward to another page or day
    Migrated,
    /// `[<]`, moved back
    MigratedBack,
}

impl TaskState {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            ' ' => Some(TaskState::Open),
            '*' => Some(TaskState::Done),
            'x' | 'X' => Some(TaskState::Cancelled),
            '>' => Some(TaskState::Migrated),
            '<' => Some(TaskState::MigratedBack),
            _ => None,
        }
    }

    /// The checkbox as written in Zim
    pub fn marker(self) -> &'static str {
        match self {
            TaskState::Open => "[ ]",
            TaskState::Done => "[*]",
            TaskState::Cancelled => "[x]",
            TaskState::Migrated => "[>]",
            TaskState::MigratedBack => "[<]",
        }
    }
}

/// One classified line of page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Heading {
        level: u8,
        text: &'a str,
    },
    Bullet {
        indent: &'a str,
        text: &'a str,
    },
    Task {
        indent: &'a str,
        state: TaskState,
        text: &'a str,
    },
    /// `1. item` or `a. item`, kept as written. `marker` includes the
    /// whitespace that follows it.
    Numbered {
        indent: &'a str,
        marker: &'a str,
        text: &'a str,
    },
    /// Horizontal rule
    Rule,
    Text(&'a str),
}
