//! Markup language (dialect) descriptor
//!
//! A dialect is a composition: an ordered list of block rules, an ordered list of span rules, a
//! macro table, an escape convention and a handful of options. Dialects are plain values built by
//! the constructors in [`crate::dialects`]; adding a dialect means adding a constructor, not a
//! new type hierarchy.
//!
//! A configured `MarkupLanguage` is immutable during parsing and holds no per-document state, so
//! one instance can be shared by any number of concurrent parses.

pub(crate) mod block;
pub(crate) mod macros;
pub(crate) mod span;

use crate::error::WikitextError;
use block::BlockRule;
use macros::Macro;
use span::SpanRule;
use url::Url;

/// Options consulted by span and macro recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOptions {
    /// Template for internal links; `{0}` is replaced by the page name.
    pub internal_link_pattern: String,
    pub wiki_word_linking: bool,
    /// Raw URL detection and WikiWord linking.
    pub auto_linking: bool,
    /// Base URL for ticket, changeset, report, milestone and source links, without a trailing
    /// slash. Those recognizers never match while it is unset.
    pub server_url: Option<String>,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            internal_link_pattern: "{0}".to_string(),
            wiki_word_linking: true,
            auto_linking: true,
            server_url: None,
        }
    }
}

/// Overrides applied to a dialect before use. `None` leaves the dialect's value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageConfiguration {
    pub internal_link_pattern: Option<String>,
    pub wiki_word_linking: Option<bool>,
    pub auto_linking: Option<bool>,
    /// An empty string clears the server URL.
    pub server_url: Option<String>,
}

/// How a dialect escapes markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    /// The marker suppresses the opening token of whatever span rule would match right after it.
    Token(char),
    /// The marker turns the following ASCII punctuation character into literal text.
    Punctuation(char),
}

impl Escape {
    pub(crate) fn marker(self) -> char {
        match self {
            Escape::Token(marker) | Escape::Punctuation(marker) => marker,
        }
    }
}

/// A configured dialect.
#[derive(Debug, Clone)]
pub struct MarkupLanguage {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) extensions: Vec<String>,
    pub(crate) blocks: Vec<BlockRule>,
    pub(crate) spans: Vec<SpanRule>,
    pub(crate) macros: Vec<Macro>,
    pub(crate) escape: Option<Escape>,
    /// Collect `[id]: url` definitions before parsing.
    pub(crate) link_definitions: bool,
    pub(crate) options: LanguageOptions,
}

impl MarkupLanguage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn file_extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn options(&self) -> &LanguageOptions {
        &self.options
    }

    /// Whether bare URLs in text become links.
    pub fn is_detecting_raw_hyperlinks(&self) -> bool {
        self.options.auto_linking && self.spans.contains(&SpanRule::RawUrl)
    }

    /// Apply configuration overrides in place.
    ///
    /// Every override is validated before any is applied, so on error the options are unchanged.
    pub fn configure(&mut self, config: &LanguageConfiguration) -> Result<(), WikitextError> {
        let mut options = self.options.clone();
        if let Some(pattern) = &config.internal_link_pattern {
            if !pattern.contains("{0}") {
                return Err(WikitextError::InvalidLinkPattern(pattern.clone()));
            }
            options.internal_link_pattern = pattern.clone();
        }
        if let Some(enabled) = config.wiki_word_linking {
            options.wiki_word_linking = enabled;
        }
        if let Some(enabled) = config.auto_linking {
            options.auto_linking = enabled;
        }
        if let Some(raw) = &config.server_url {
            options.server_url = server_url(raw)?;
        }
        self.options = options;
        Ok(())
    }

    /// A configured copy, leaving `self` untouched.
    pub fn configured(&self, config: &LanguageConfiguration) -> Result<Self, WikitextError> {
        let mut language = self.clone();
        language.configure(config)?;
        Ok(language)
    }

    pub(crate) fn internal_link(&self, page: &str) -> String {
        self.options.internal_link_pattern.replace("{0}", page)
    }

    /// `server_url` joined with `path`, or `None` when no server is configured.
    pub(crate) fn server_link(&self, path: &str) -> Option<String> {
        self.options
            .server_url
            .as_ref()
            .map(|server| format!("{server}{path}"))
    }

    pub(crate) fn find_macro(&self, name: &str) -> Option<Macro> {
        self.macros.iter().copied().find(|m| m.name() == name)
    }
}

/// A validated server URL without its trailing slash; blank clears it.
fn server_url(raw: &str) -> Result<Option<String>, WikitextError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed).map_err(|source| WikitextError::InvalidServerUrl {
        url: trimmed.to_string(),
        source,
    })?;
    Ok(Some(trimmed.trim_end_matches('/').to_string()))
}
