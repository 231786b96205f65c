//! Vault publishing pipeline.
//!
//! Converts a whole notebook folder into an Obsidian vault: non-page files
//! are copied byte for byte and every page is translated to
//! `<output>/<page path>.md`. The page index is built from the complete page
//! set before the first page is translated.
//!
//! Failures on a single file are collected as report warnings and the run
//! carries on; only an unreadable notebook aborts the conversion.
//!
//! ```ignore
//! let spec = ConvertSpec::new("~/Notebooks/Notes", "~/Vault")
//!     .with_overwrite(true)
//!     .with_dry_run(false);
//! let report = convert(&spec)?;
//! ```

use crate::error::ConvertError;
use crate::notebook::Notebook;
use crate::translate::{translate, TranslateOptions};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies a notebook conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSpec {
    /// Notebook root folder
    pub source: PathBuf,
    /// Vault folder, created when missing
    pub output: PathBuf,
    /// Replace files that already exist in the vault
    pub overwrite: bool,
    /// Plan only, write nothing
    pub dry_run: bool,
    pub translate: TranslateOptions,
}

impl ConvertSpec {
    pub fn new(source: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            overwrite: false,
            dry_run: false,
            translate: TranslateOptions::default(),
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_translate_options(mut self, options: TranslateOptions) -> Self {
        self.translate = options;
        self
    }
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    /// Pages written, or that would be written on a dry run
    pub pages_converted: usize,
    /// Files copied, or that would be copied on a dry run
    pub attachments_copied: usize,
    /// Output paths of the translated pages
    pub planned: Vec<PathBuf>,
    /// Existing destinations left alone because overwriting was off
    pub skipped: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Convert the notebook described by `spec`.
pub fn convert(spec: &ConvertSpec) -> Result<ConvertReport, ConvertError> {
    let notebook = Notebook::open(&spec.source)?;
    let index = notebook.index();
    let mut report = ConvertReport::default();

    if !spec.dry_run {
        fs::create_dir_all(&spec.output).map_err(|e| ConvertError::io(&spec.output, e))?;
    }

    for relative in notebook.attachments() {
        let destination = spec.output.join(relative);
        if destination.exists() && !spec.overwrite {
            log::debug!("Skipping existing {}", destination.display());
            report.skipped.push(destination);
            continue;
        }
        if !spec.dry_run {
            let source = notebook.root().join(relative);
            if let Err(err) = copy_file(&source, &destination) {
                report.warnings.push(err.to_string());
                continue;
            }
        }
        report.attachments_copied += 1;
    }

    let files: BTreeSet<&PathBuf> = notebook.attachments().iter().collect();
    for page in notebook.pages() {
        let result = translate(page, &index, &spec.translate);
        for diagnostic in result.warnings() {
            report
                .warnings
                .push(format!("{}: {diagnostic}", page.source.display()));
        }
        for attachment in &result.attachments {
            if !files.contains(&attachment.path) {
                report.warnings.push(format!(
                    "{}: missing attachment {}",
                    page.source.display(),
                    attachment.target
                ));
            }
        }

        let destination = spec.output.join(page.path.markdown_file());
        if spec.dry_run {
            report.planned.push(destination);
            report.pages_converted += 1;
            continue;
        }
        if destination.exists() && !spec.overwrite {
            log::debug!("Skipping existing {}", destination.display());
            report.skipped.push(destination);
            continue;
        }
        match write_file(&destination, &result.markdown) {
            Ok(()) => {
                report.planned.push(destination);
                report.pages_converted += 1;
            }
            Err(err) => report.warnings.push(err.to_string()),
        }
    }

    log::info!(
        "Converted {} pages and copied {} files into {}",
        report.pages_converted,
        report.attachments_copied,
        spec.output.display()
    );
    Ok(report)
}

fn ensure_parent(path: &Path) -> Result<(), ConvertError> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e)),
        None => Ok(()),
    }
}

fn copy_file(source: &Path, destination: &Path) -> Result<(), ConvertError> {
    ensure_parent(destination)?;
    fs::copy(source, destination).map_err(|e| ConvertError::io(source, e))?;
    Ok(())
}

fn write_file(destination: &Path, contents: &str) -> Result<(), ConvertError> {
    ensure_parent(destination)?;
    fs::write(destination, contents).map_err(|e| ConvertError::io(destination, e))
}
