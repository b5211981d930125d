//! Dialect registry for dialect discovery and selection
//!
//! This module provides a centralized registry for all available dialects.
//! Dialects can be registered and retrieved by name or detected from a file extension.

use crate::builder::DocumentBuilder;
use crate::error::WikitextError;
use crate::markup::{LanguageConfiguration, MarkupLanguage};
use crate::parser::MarkupParser;
use std::collections::HashMap;

/// Registry of markup dialects
///
/// # Examples
///
/// ```ignore
/// let registry = DialectRegistry::default();
/// let html = registry.parse_to_html("'''bold'''", "tracwiki")?;
/// ```
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: HashMap<String, MarkupLanguage>,
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        DialectRegistry {
            dialects: HashMap::new(),
        }
    }

    /// Register a dialect
    ///
    /// If a dialect with the same name already exists, it will be replaced.
    pub fn register(&mut self, language: MarkupLanguage) {
        self.dialects.insert(language.name().to_string(), language);
    }

    /// Get a dialect by name
    pub fn get(&self, name: &str) -> Result<&MarkupLanguage, WikitextError> {
        self.dialects
            .get(name)
            .ok_or_else(|| WikitextError::DialectNotFound(name.to_string()))
    }

    /// Check if a dialect exists
    pub fn has(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// List all available dialect names (sorted)
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<_> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a dialect from a filename based on its extension
    pub fn detect_dialect_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        let mut matches: Vec<&MarkupLanguage> = self
            .dialects
            .values()
            .filter(|language| language.file_extensions().iter().any(|e| *e == extension))
            .collect();
        matches.sort_by(|a, b| a.name().cmp(b.name()));
        matches.first().map(|language| language.name().to_string())
    }

    /// A configured copy of the named dialect
    pub fn configured(
        &self,
        name: &str,
        config: &LanguageConfiguration,
    ) -> Result<MarkupLanguage, WikitextError> {
        self.get(name)?.configured(config)
    }

    /// Parse source text with the named dialect into `builder`
    pub fn parse(
        &self,
        source: &str,
        dialect: &str,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), WikitextError> {
        let language = self.get(dialect)?;
        MarkupParser::new(language).parse(source, builder)?;
        Ok(())
    }

    /// Parse source text with the named dialect into an HTML fragment
    pub fn parse_to_html(&self, source: &str, dialect: &str) -> Result<String, WikitextError> {
        let language = self.get(dialect)?;
        Ok(MarkupParser::new(language).parse_to_html(source)?)
    }

    /// Create a registry with the built-in dialects
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for language in crate::dialects::builtin() {
            registry.register(language);
        }
        registry
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
