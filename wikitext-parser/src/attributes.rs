//! The attribute bag carried by blocks, spans and images.
//!
//! Only a fixed set of keys is recognized. Dialects set values by name and unknown names are
//! dropped, so a recognizer never has to validate option names itself.

use serde::Serialize;

/// Semantic properties attached to a block, span or image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property by name.
    ///
    /// Returns `false`, leaving the bag untouched, when `key` is not a recognized property.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Look up a property by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = canonical_key(key)?;
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// All set properties, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("id", &self.id),
            ("cssClass", &self.css_class),
            ("cssStyle", &self.css_style),
            ("language", &self.language),
            ("title", &self.title),
            ("href", &self.href),
            ("width", &self.width),
            ("height", &self.height),
            ("align", &self.align),
            ("border", &self.border),
            ("alt", &self.alt),
            ("start", &self.start),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match canonical_key(key)? {
            "id" => &mut self.id,
            "cssClass" => &mut self.css_class,
            "cssStyle" => &mut self.css_style,
            "language" => &mut self.language,
            "title" => &mut self.title,
            "href" => &mut self.href,
            "width" => &mut self.width,
            "height" => &mut self.height,
            "align" => &mut self.align,
            "border" => &mut self.border,
            "alt" => &mut self.alt,
            _ => &mut self.start,
        };
        Some(slot)
    }
}

fn canonical_key(key: &str) -> Option<&'static str> {
    let canonical = match key {
        "id" => "id",
        "class" | "cssClass" | "css_class" => "cssClass",
        "style" | "cssStyle" | "css_style" => "cssStyle",
        "language" | "lang" => "language",
        "title" => "title",
        "href" => "href",
        "width" => "width",
        "height" => "height",
        "align" => "align",
        "border" => "border",
        "alt" => "alt",
        "start" => "start",
        _ => return None,
    };
    Some(canonical)
}
