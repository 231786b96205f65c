//! Front matter tests

use crate::common::translate_sample;

fn front_matter(markdown: &str) -> serde_yaml::Value {
    let rest = markdown.strip_prefix("---\n").expect("front matter opens");
    let (yaml, _) = rest.split_once("\n---\n\n").expect("front matter closes");
    serde_yaml::from_str(yaml).expect("front matter is YAML")
}

#[test]
fn test_front_matter_fields() {
    let result = translate_sample("Home", true);
    let value = front_matter(&result.markdown);
    assert_eq!(value["title"].as_str(), Some("Home"));
    assert_eq!(value["created"].as_str(), Some("2024-03-01T09:15:42+01:00"));
    assert_eq!(value["zim_page"].as_str(), Some("Home"));
    assert_eq!(value["zim_wiki_format"].as_str(), Some("zim 0.6"));
    assert!(result.markdown.contains("---\n\n# Home\n"));
}

#[test]
fn test_front_matter_keeps_source_and_headers() {
    let result = translate_sample("Home", true);
    let value = front_matter(&result.markdown);
    assert_eq!(value["zim_source"].as_str(), Some("Home.txt"));
    assert_eq!(value["zim_content_type"].as_str(), Some("text/x-zim-wiki"));

    let headers = value["zim_headers"].as_mapping().expect("headers are a map");
    assert_eq!(headers.len(), 3);
    assert_eq!(
        value["zim_headers"]["Creation-Date"].as_str(),
        Some("2024-03-01T09:15:42+01:00")
    );
    assert_eq!(
        value["zim_headers"]["Content-Type"].as_str(),
        Some("text/x-zim-wiki")
    );

    let alpha = translate_sample("Projects:Alpha", true);
    let value = front_matter(&alpha.markdown);
    assert_eq!(value["zim_source"].as_str(), Some("Projects/Alpha.txt"));
}

#[test]
fn test_front_matter_without_creation_date() {
    let result = translate_sample("Projects:Alpha", true);
    let value = front_matter(&result.markdown);
    assert_eq!(value["title"].as_str(), Some("Alpha"));
    assert_eq!(value["zim_page"].as_str(), Some("Projects:Alpha"));
    assert!(value.get("created").is_none());
}

#[test]
fn test_front_matter_can_be_disabled() {
    let result = translate_sample("Home", false);
    assert!(result.markdown.starts_with("# Home\n"));
}
