//! Built-in dialects
//!
//! Each dialect is a constructor returning an unconfigured [`MarkupLanguage`]. Configure the
//! result with [`MarkupLanguage::configure`] before parsing when the defaults do not fit.

pub mod markdown;
pub mod tracwiki;

use crate::markup::MarkupLanguage;

/// Every built-in dialect with default options.
pub fn builtin() -> Vec<MarkupLanguage> {
    vec![tracwiki::language(), markdown::language()]
}
