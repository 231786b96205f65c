//! Line classification
//!
//! Decides what a single body line is (heading, bullet, task, ...) without
//! looking at its inline markup. Lines that match no rule are plain text, so
//! anything unexpected passes through untouched.

use crate::ir::nodes::{Line, TaskState};
use once_cell::sync::Lazy;
use regex::Regex;

/// `====== Title ======` with the same number of `=` on both sides
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(={2,6})[ \t]*(.*?)[ \t]*(={2,6})[ \t]*$").unwrap());

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*)\* (.*)$").unwrap());

/// A checkbox at the start of the item text, followed by whitespace or nothing
static CHECKBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.)\](?:[ \t]+(.*))?$").unwrap());

static BARE_CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(\[.\](?:[ \t].*)?)$").unwrap());

static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)((?:\d+\.|[a-zA-Z]\.)[ \t]+)(.*)$").unwrap());

static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*-{5,}[ \t]*$").unwrap());

/// Classify one body line. Never fails; unknown shapes become [`Line::Text`].
pub fn classify(line: &str) -> Line<'_> {
    if let Some(heading) = classify_heading(line) {
        return heading;
    }

    if let Some(caps) = BULLET.captures(line) {
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str());
        if let Some((state, rest)) = split_checkbox(text) {
            return Line::Task {
                indent,
                state,
                text: rest,
            };
        }
        return Line::Bullet { indent, text };
    }

    if let Some(caps) = BARE_CHECKBOX.captures(line) {
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let item = caps.get(2).map_or("", |m| m.as_str());
        if let Some((state, text)) = split_checkbox(item) {
            return Line::Task {
                indent,
                state,
                text,
            };
        }
    }

    if let Some(caps) = NUMBERED.captures(line) {
        return Line::Numbered {
            indent: caps.get(1).map_or("", |m| m.as_str()),
            marker: caps.get(2).map_or("", |m| m.as_str()),
            text: caps.get(3).map_or("", |m| m.as_str()),
        };
    }

    if RULE.is_match(line) {
        return Line::Rule;
    }

    Line::Text(line)
}

fn classify_heading(line: &str) -> Option<Line<'_>> {
    let caps = HEADING.captures(line)?;
    let open = caps.get(1)?.as_str();
    let close = caps.get(3)?.as_str();
    let text = caps.get(2)?.as_str();
    if open.len() != close.len() || text.is_empty() {
        return None;
    }
    // The markers must be whole `=` runs; `=======` is not a level 1 heading.
    let leading = equals_run(line.chars());
    let trailing = equals_run(line.trim_end().chars().rev());
    if leading != open.len() || trailing != close.len() {
        return None;
    }
    // Zim counts down: six `=` is the page title, two is the smallest heading.
    let level = (7 - open.len()).clamp(1, 6) as u8;
    Some(Line::Heading { level, text })
}

fn equals_run(chars: impl Iterator<Item = char>) -> usize {
    chars.take_while(|&c| c == '=').count()
}

fn split_checkbox(text: &str) -> Option<(TaskState, &str)> {
    let caps = CHECKBOX.captures(text)?;
    let marker = caps.get(1)?.as_str().chars().next()?;
    let state = TaskState::from_marker(marker)?;
    Some((state, caps.get(2).map_or("", |m| m.as_str())))
}

/// Start or end of a verbatim block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fence {
    /// `'''` on its own line, opening or closing
    Quotes,
    /// `{{{code: lang="python3" ...`
    CodeOpen { language: Option<String> },
    /// `}}}`
    CodeClose,
}

static CODE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{\{code:(.*)$").unwrap());
static CODE_LANG: Lazy<Regex> = Lazy::new(|| Regex::new(r#"lang="([^"]*)""#).unwrap());

/// Recognise a line that opens or closes a verbatim block.
pub fn fence(line: &str) -> Option<Fence> {
    let trimmed = line.trim();
    if trimmed == "'''" {
        return Some(Fence::Quotes);
    }
    if trimmed == "}}}" {
        return Some(Fence::CodeClose);
    }
    let caps = CODE_OPEN.captures(trimmed)?;
    let language = caps
        .get(1)
        .and_then(|attrs| CODE_LANG.captures(attrs.as_str()))
        .and_then(|lang| lang.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|lang| !lang.is_empty());
    Some(Fence::CodeOpen { language })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_count_down_from_six() {
        assert_eq!(
            classify("====== Title ======"),
            Line::Heading {
                level: 1,
                text: "Title"
            }
        );
        assert_eq!(
            classify("===== Section ====="),
            Line::Heading {
                level: 2,
                text: "Section"
            }
        );
        assert_eq!(
            classify("== Small =="),
            Line::Heading {
                level: 5,
                text: "Small"
            }
        );
    }

    #[test]
    fn asymmetric_or_empty_headings_are_text() {
        assert_eq!(classify("=== Sub =="), Line::Text("=== Sub =="));
        assert_eq!(classify("= x ="), Line::Text("= x ="));
        assert_eq!(classify("===="), Line::Text("===="));
    }

    #[test]
    fn overlong_marker_runs_are_text() {
        assert_eq!(
            classify("======= T ======="),
            Line::Text("======= T =======")
        );
        assert_eq!(classify("=== T ===="), Line::Text("=== T ===="));
        assert_eq!(classify("==== T ==="), Line::Text("==== T ==="));
        assert_eq!(
            classify("======= T =======  "),
            Line::Text("======= T =======  ")
        );
    }

    #[test]
    fn bullets_keep_their_indent() {
        assert_eq!(
            classify("\t\t* nested"),
            Line::Bullet {
                indent: "\t\t",
                text: "nested"
            }
        );
        assert_eq!(classify("*bold*"), Line::Text("*bold*"));
    }

    #[test]
    fn checkbox_markers_map_to_states() {
        let cases = [
            ("* [ ] open", TaskState::Open),
            ("* [*] done", TaskState::Done),
            ("* [x] done", TaskState::Cancelled),
            ("* [>] moved", TaskState::Migrated),
            ("* [<] back", TaskState::MigratedBack),
        ];
        for (line, expected) in cases {
            match classify(line) {
                Line::Task { state, .. } => assert_eq!(state, expected, "{line}"),
                other => panic!("{line}: expected task, got {other:?}"),
            }
        }
    }

    #[test]
    fn bare_checkboxes_are_tasks() {
        assert_eq!(
            classify("\t[*] finished"),
            Line::Task {
                indent: "\t",
                state: TaskState::Done,
                text: "finished"
            }
        );
    }

    #[test]
    fn unknown_checkbox_markers_degrade() {
        assert_eq!(
            classify("* [?] maybe"),
            Line::Bullet {
                indent: "",
                text: "[?] maybe"
            }
        );
        assert_eq!(classify("[?] maybe"), Line::Text("[?] maybe"));
        assert_eq!(classify("[link] text"), Line::Text("[link] text"));
    }

    #[test]
    fn numbered_items_and_rules() {
        assert_eq!(
            classify("  2. second"),
            Line::Numbered {
                indent: "  ",
                marker: "2. ",
                text: "second"
            }
        );
        assert_eq!(classify("-----"), Line::Rule);
        assert_eq!(classify("----"), Line::Text("----"));
    }

    #[test]
    fn markdown_output_is_not_reclassified() {
        for line in [
            "# Title",
            "### Sub",
            "- item",
            "\t- [x] done",
            "- [ ] open",
            "*emphasis* start",
            "***",
            "```",
            "[[Projects/Alpha|Alpha]]",
        ] {
            assert_eq!(classify(line), Line::Text(line), "{line}");
        }
    }

    #[test]
    fn recognises_fences() {
        assert_eq!(fence("'''"), Some(Fence::Quotes));
        assert_eq!(fence("}}}"), Some(Fence::CodeClose));
        assert_eq!(
            fence(r#"{{{code: lang="python3" linenumbers="True""#),
            Some(Fence::CodeOpen {
                language: Some("python3".to_string())
            })
        );
        assert_eq!(
            fence("{{{code:"),
            Some(Fence::CodeOpen { language: None })
        );
        assert_eq!(fence("'''code'''"), None);
    }
}
