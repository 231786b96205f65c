//! Shared configuration loader for zim2obsidian.
//!
//! `defaults/zim.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. The CLI layers an optional user file and
//! its own flags on top of those defaults via [`Loader`] before deserializing
//! into [`ZimConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use zim_babel::TranslateOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/zim.default.toml");

/// Name of the optional per-directory configuration file
pub const USER_CONFIG_FILE: &str = "zim2obsidian.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ZimConfig {
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Options that change the translated text.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub front_matter: bool,
}

impl From<&ConvertConfig> for TranslateOptions {
    fn from(config: &ConvertConfig) -> Self {
        TranslateOptions {
            front_matter: config.front_matter,
        }
    }
}

/// Options for writing the vault.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub overwrite: bool,
}

/// Builds a [`ZimConfig`] from `zim.default.toml`, then any `zim2obsidian.toml`
/// files, then command line flags. Later layers win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file named with `--config`; it must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a `zim2obsidian.toml` that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `convert.front_matter` for `--no-frontmatter`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Unknown keys are ignored; wrong types are an error.
    pub fn build(self) -> Result<ZimConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration with no user file and no flags applied.
pub fn load_defaults() -> Result<ZimConfig, ConfigError> {
    Loader::new().build()
}
