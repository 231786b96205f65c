//! Behavioural properties of page translation

use crate::common::translate_text;
use proptest::prelude::*;
use zim_babel::formats::zim::inline::parse_inline;
use zim_babel::formats::zim::line::classify;
use zim_babel::ir::nodes::Line;

#[test]
fn test_classifier_leaves_converted_lines_alone() {
    let result = translate_text(
        "Home",
        "====== Title ======\n* item\n\t* [ ] task\n* [>] moved\n-----\nplain",
        &[],
    );
    for line in result.markdown.lines() {
        assert_eq!(classify(line), Line::Text(line), "{line}");
    }
}

#[test]
fn test_checkboxes() {
    let result = translate_text("Home", "* [x] done\n* [>] moved", &[]);
    assert_eq!(
        result.markdown,
        "- [x] done\n- [x] moved <!-- zim: [>] -->\n"
    );
}

#[test]
fn test_sibling_resolution() {
    let result = translate_text(
        "Projects:Beta",
        "[[Alpha]]",
        &["Alpha", "Projects", "Projects:Alpha"],
    );
    assert_eq!(result.markdown, "[[Projects/Alpha|Alpha]]\n");
}

#[test]
fn test_unresolved_link_is_kept() {
    let result = translate_text("Home", "[[NoSuchPage]]", &[]);
    assert_eq!(result.markdown, "[[NoSuchPage]]\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.warnings().count(), 0);
}

#[test]
fn test_unresolved_child_link_stays_below_the_page() {
    let result = translate_text("Demo", "[[+Sub]]", &[]);
    assert_eq!(result.markdown, "[[Demo/Sub|Sub]]\n");

    let result = translate_text("Projects:Alpha", "[[+Notes:Todo]]", &["Projects"]);
    assert_eq!(result.markdown, "[[Projects/Alpha/Notes/Todo|Todo]]\n");
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn test_image_width_and_attachment() {
    let result = translate_text("Home", "{{./img.png?width=320}}", &[]);
    assert_eq!(result.markdown, "![[./Home/img.png|320]]\n");
    let targets: Vec<&str> = result
        .attachments
        .iter()
        .map(|a| a.target.as_str())
        .collect();
    assert_eq!(targets, vec!["./img.png"]);
}

#[test]
fn test_verbatim_exclusion() {
    let result = translate_text("Home", "''//not italic//''", &[]);
    assert_eq!(result.markdown, "`//not italic//`\n");
}

proptest! {
    #[test]
    fn inline_parsing_never_panics(text in "[a-zé :/*_~'\\[\\]{}|#+.^-]{0,40}") {
        let _ = parse_inline(&text);
    }

    #[test]
    fn translation_is_deterministic(text in "[a-zA-Z =*/_'\\[\\]{}|\n\t-]{0,80}") {
        let first = translate_text("Projects:Beta", &text, &["Projects:Alpha"]);
        let second = translate_text("Projects:Beta", &text, &["Projects:Alpha"]);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn plain_words_pass_through(text in "[a-zA-Z0-9 ,.]{1,40}") {
        let result = translate_text("Home", &text, &[]);
        prop_assert_eq!(result.markdown.trim_end(), text.trim_end());
    }
}
