//! Export tests for the sample notebook (Zim → Markdown)

use crate::common::{translate_sample, translate_text};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use insta::assert_snapshot;

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
}

fn collect<'a>(node: &'a AstNode<'a>, out: &mut Vec<&'a AstNode<'a>>) {
    out.push(node);
    for child in node.children() {
        collect(child, out);
    }
}

const DEMO: &str = "# Demo

## Formatting
*italic* and **bold** and <u>underlined</u> and ~~struck~~ and `code`.
A URL: https://example.com/path//with//slashes

## Tasks
- [ ] open task
- [x] done task
- [x] cancelled task
- [x] moved task <!-- zim: [>] -->
\t- [ ] nested task

## Media
![[./Demo/image.png|320]]

```
* not a list
//not italic//
```
***
See [[NoSuchPage]] and [[Demo/Sub|Sub]].
Empty: [[]]
";

#[test]
fn test_demo_page() {
    let result = translate_sample("Demo", false);
    assert_eq!(result.markdown, DEMO);
}

#[test]
fn test_demo_page_structure() {
    let result = translate_sample("Demo", false);
    let arena = Arena::new();
    let root = parse_document(&arena, &result.markdown, &comrak_options());
    let mut nodes = Vec::new();
    collect(root, &mut nodes);

    let levels: Vec<u8> = nodes
        .iter()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 2, 2]);

    let code_blocks: Vec<String> = nodes
        .iter()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some(block.literal.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(code_blocks, vec!["* not a list\n//not italic//\n".to_string()]);

    let count = |wanted: fn(&NodeValue) -> bool| {
        nodes
            .iter()
            .filter(|node| wanted(&node.data.borrow().value))
            .count()
    };
    assert_eq!(count(|v| matches!(v, NodeValue::Emph)), 1);
    assert_eq!(count(|v| matches!(v, NodeValue::Strong)), 1);
    assert_eq!(count(|v| matches!(v, NodeValue::Strikethrough)), 1);
    assert_eq!(count(|v| matches!(v, NodeValue::Code(_))), 1);
    assert_eq!(count(|v| matches!(v, NodeValue::ThematicBreak)), 1);
}

#[test]
fn test_home_page() {
    let result = translate_sample("Home", false);
    assert_snapshot!(result.markdown.trim_end(), @r"
# Home
Created Friday 01 March 2024

Welcome to the **sample** notebook.

- [[Projects]] overview
- [[Demo|the demo page]]
- Manual: [manual.pdf](./Home/manual.pdf)
- Site: [Zim](https://zim-wiki.org)
");
}

#[test]
fn test_child_links() {
    let result = translate_sample("Projects", false);
    assert_snapshot!(result.markdown.trim_end(), @r"
# Projects
- [[Projects/Alpha|Alpha]]
- [[Projects/Beta|Beta]]
");
}

#[test]
fn test_sibling_links() {
    let alpha = translate_sample("Projects:Alpha", false);
    assert_snapshot!(alpha.markdown.trim_end(), @r"
# Alpha
Sibling: [[Projects/Beta|Beta]]
Home: [[Home#welcome]]
");

    let beta = translate_sample("Projects:Beta", false);
    assert_snapshot!(beta.markdown.trim_end(), @r"
# Beta
Back to [[Projects/Alpha|Alpha]].
![[./shared/diagram.png|200x100]]
");
}

#[test]
fn test_links_parse_as_links() {
    let result = translate_sample("Home", false);
    let arena = Arena::new();
    let root = parse_document(&arena, &result.markdown, &comrak_options());
    let mut nodes = Vec::new();
    collect(root, &mut nodes);

    let urls: Vec<String> = nodes
        .iter()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Link(link) => Some(link.url.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(urls, vec!["./Home/manual.pdf", "https://zim-wiki.org"]);
}

#[test]
fn test_destinations_with_spaces_stay_links() {
    let result = translate_text("Home", "[[./my manual (v2).pdf]]", &[]);
    assert_eq!(
        result.markdown,
        "[my manual (v2).pdf](<./Home/my manual (v2).pdf>)\n"
    );

    let arena = Arena::new();
    let root = parse_document(&arena, &result.markdown, &comrak_options());
    let mut nodes = Vec::new();
    collect(root, &mut nodes);
    assert!(nodes.iter().any(|node| matches!(
        &node.data.borrow().value,
        NodeValue::Link(link) if link.url == "./Home/my manual (v2).pdf"
    )));
}

#[test]
fn test_headings_follow_zim_levels() {
    let result = translate_text(
        "Home",
        "====== Title ======\n===== Two =====\n==== Three ====\n=== Four ===\n== Five ==",
        &[],
    );
    assert_snapshot!(result.markdown.trim_end(), @r"
# Title
## Two
### Three
#### Four
##### Five
");
}
