//! Publishing the sample notebook into a vault

use crate::common::sample_notebook;
use std::fs;
use tempfile::TempDir;
use zim_babel::{convert, ConvertSpec, TranslateOptions};

#[test]
fn test_convert_writes_pages_and_attachments() {
    let output = TempDir::new().unwrap();
    let report = convert(&ConvertSpec::new(sample_notebook(), output.path())).unwrap();

    assert_eq!(report.pages_converted, 5);
    assert_eq!(report.attachments_copied, 4);
    for page in [
        "Home.md",
        "Demo.md",
        "Projects.md",
        "Projects/Alpha.md",
        "Projects/Beta.md",
    ] {
        assert!(output.path().join(page).is_file(), "{page}");
    }
    assert_eq!(
        fs::read(output.path().join("Demo/image.png")).unwrap(),
        fs::read(sample_notebook().join("Demo/image.png")).unwrap()
    );
    assert!(output.path().join("Projects/notes.txt").is_file());
    assert!(!output.path().join("notebook.zim").exists());
    assert!(!output.path().join("Home.txt").exists());
}

#[test]
fn test_convert_reports_malformed_links() {
    let output = TempDir::new().unwrap();
    let report = convert(&ConvertSpec::new(sample_notebook(), output.path())).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Demo.txt"));
    assert!(report.warnings[0].contains("empty link target: [[]]"));
}

#[test]
fn test_demo_page_contains_expected_conversions() {
    let output = TempDir::new().unwrap();
    convert(&ConvertSpec::new(sample_notebook(), output.path())).unwrap();
    let demo = fs::read_to_string(output.path().join("Demo.md")).unwrap();

    assert!(demo.starts_with("---\ntitle: Demo\n"));
    assert!(demo.contains("![[./Demo/image.png|320]]"));
    assert!(demo.contains("- [ ] open task"));
    assert!(demo.contains("\t- [ ] nested task"));
    assert!(demo.contains("*italic*"));
}

#[test]
fn test_no_front_matter() {
    let output = TempDir::new().unwrap();
    let spec = ConvertSpec::new(sample_notebook(), output.path()).with_translate_options(
        TranslateOptions {
            front_matter: false,
        },
    );
    convert(&spec).unwrap();
    let home = fs::read_to_string(output.path().join("Home.md")).unwrap();
    assert!(home.starts_with("# Home\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let output = TempDir::new().unwrap();
    let vault = output.path().join("vault");
    let spec = ConvertSpec::new(sample_notebook(), &vault).with_dry_run(true);
    let report = convert(&spec).unwrap();

    assert_eq!(report.pages_converted, 5);
    assert_eq!(report.attachments_copied, 4);
    assert_eq!(report.planned.len(), 5);
    assert!(report.planned.contains(&vault.join("Projects/Alpha.md")));
    assert!(!vault.exists());
}

#[test]
fn test_second_run_skips_existing_files() {
    let output = TempDir::new().unwrap();
    let spec = ConvertSpec::new(sample_notebook(), output.path());
    convert(&spec).unwrap();

    let again = convert(&spec).unwrap();
    assert_eq!(again.pages_converted, 0);
    assert_eq!(again.attachments_copied, 0);
    assert_eq!(again.skipped.len(), 9);

    let forced = convert(&spec.clone().with_overwrite(true)).unwrap();
    assert_eq!(forced.pages_converted, 5);
    assert_eq!(forced.attachments_copied, 4);
}
