//! Link resolution across the sample notebook

use crate::common::{find, open_sample};
use zim_babel::formats::zim::reference::parse_link;
use zim_babel::{LinkResolver, PagePath, Resolution};

#[test]
fn test_sample_pages_are_discovered() {
    let notebook = open_sample();
    let names: Vec<String> = notebook.pages().iter().map(|p| p.path.name()).collect();
    assert_eq!(
        names,
        vec!["Demo", "Home", "Projects:Alpha", "Projects:Beta", "Projects"]
    );
    assert_eq!(notebook.attachments().len(), 4);
    assert!(notebook
        .attachments()
        .iter()
        .all(|path| !path.ends_with("notebook.zim")));
}

#[test]
fn test_resolution_from_sample_pages() {
    let notebook = open_sample();
    let index = notebook.index();
    let resolver = LinkResolver::new(&index);
    let beta = &find(notebook.pages(), "Projects:Beta").path;

    let cases = [
        ("Alpha", Resolution::Page(PagePath::parse("Projects:Alpha"))),
        ("Home", Resolution::Page(PagePath::parse("Home"))),
        (":Demo", Resolution::Page(PagePath::parse("Demo"))),
        ("+Alpha", Resolution::Unresolved),
        ("Demo:Missing", Resolution::Unresolved),
    ];
    for (link, expected) in cases {
        let reference = parse_link(link).unwrap();
        assert_eq!(resolver.resolve(&reference, beta), expected, "{link}");
    }
}

#[test]
fn test_attachment_sets() {
    let notebook = open_sample();
    let index = notebook.index();
    for page in notebook.pages() {
        let result = zim_babel::translate(page, &index, &Default::default());
        for attachment in &result.attachments {
            assert!(
                notebook.attachments().contains(&attachment.path),
                "{} references missing {}",
                page.path,
                attachment.path.display()
            );
        }
    }
}
