//! Shared configuration loader for the wikitext tools.
//!
//! `defaults/wikitext.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`WikitextConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use wikitext_parser::{HtmlOptions, LanguageConfiguration};

const DEFAULT_TOML: &str = include_str!("../defaults/wikitext.default.toml");

/// Top-level configuration consumed by wikitext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WikitextConfig {
    pub parser: ParserConfig,
    pub language: LanguageConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Fallback dialect when the input gives no hint.
    pub dialect: String,
}

/// Mirrors the options a dialect accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub internal_link_pattern: String,
    pub wiki_word_linking: bool,
    pub auto_linking: bool,
    /// Empty when no Trac server is configured.
    pub server_url: String,
}

impl From<&LanguageConfig> for LanguageConfiguration {
    fn from(config: &LanguageConfig) -> Self {
        LanguageConfiguration {
            internal_link_pattern: Some(config.internal_link_pattern.clone()),
            wiki_word_linking: Some(config.wiki_word_linking),
            auto_linking: Some(config.auto_linking),
            server_url: Some(config.server_url.clone()),
        }
    }
}

impl From<LanguageConfig> for LanguageConfiguration {
    fn from(config: LanguageConfig) -> Self {
        LanguageConfiguration {
            internal_link_pattern: Some(config.internal_link_pattern),
            wiki_word_linking: Some(config.wiki_word_linking),
            auto_linking: Some(config.auto_linking),
            server_url: Some(config.server_url),
        }
    }
}

/// HTML output knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub emit_as_document: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub custom_css: Option<String>,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        HtmlOptions {
            emit_as_document: config.emit_as_document,
            title: non_empty(&config.title),
            custom_css: non_empty(&config.custom_css),
            supported_blocks: None,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WikitextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WikitextConfig, ConfigError> {
    Loader::new().build()
}
