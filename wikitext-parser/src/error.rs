//! Error types for the parser, its builders and dialect configuration.
//!
//! Recognition misses (a construct that almost matches) are never errors: they fall through to
//! literal text. The only runtime failures are builder failures, which the parser forwards
//! untouched, and invalid dialect configuration.

use thiserror::Error;

/// Failure reported by a [`DocumentBuilder`](crate::builder::DocumentBuilder).
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Unbalanced event stream: {0}")]
    Unbalanced(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("{0}")]
    Custom(String),
}

/// Errors surfaced by the library API (registry lookup, configuration, parsing).
#[derive(Debug, Error)]
pub enum WikitextError {
    #[error("Dialect '{0}' not found")]
    DialectNotFound(String),
    #[error("Invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Internal link pattern '{0}' has no {{0}} placeholder")]
    InvalidLinkPattern(String),
    #[error(transparent)]
    Build(#[from] BuilderError),
}
