//! Configuration loading for the bbdown CLI.
//!
//! `defaults/bbdown.default.toml` is embedded into the binary. A user file
//! passed with `--config` is layered on top before deserializing into
//! [`BbdownConfig`].

use std::collections::BTreeMap;
use std::path::Path;

use bbdown::ConverterOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/bbdown.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BbdownConfig {
    pub markdown: MarkdownConfig,
}

/// Markdown output knobs, mirrors [`ConverterOptions`]
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub strong_delimiter: String,
    pub em_delimiter: String,
    pub underline_delimiter: String,
    pub strikethrough_delimiter: String,
    pub bullet_list_marker: char,
    pub fence: String,
    #[serde(default)]
    pub language_aliases: BTreeMap<String, String>,
}

impl From<MarkdownConfig> for ConverterOptions {
    fn from(config: MarkdownConfig) -> Self {
        ConverterOptions {
            strong_delimiter: config.strong_delimiter,
            em_delimiter: config.em_delimiter,
            underline_delimiter: config.underline_delimiter,
            strikethrough_delimiter: config.strikethrough_delimiter,
            bullet_list_marker: config.bullet_list_marker,
            fence: config.fence,
            language_aliases: config.language_aliases.into_iter().collect(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for `--set`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BbdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
