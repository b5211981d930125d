//! Markdown inline recognizers other than code spans and emphasis, which are plain delimiters.

use crate::attributes::Attributes;
use crate::markup::span::{self, captures_from, Content, Emission, SpanContext, SpanMatch};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static AUTO_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:((?:https?|ftp)://[^>\s]+)|(?:mailto:)?([^@<>\s:/]+@[^@<>\s]+\.[^@<>\s]+))>")
        .unwrap()
});
static INLINE_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(\s*<?([^)\s>]*)>?(?:\s+["']([^"']*)["'])?\s*\)"#).unwrap()
});
static REFERENCE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\] ?\[([^\]]*)\]").unwrap());
// Labels may contain backslash-escaped brackets.
static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[((?:\\.|[^\]\\])*)\]\(\s*<?([^)\s>]*)>?(?:\s+["']([^"']*)["'])?\s*\)"#).unwrap()
});
static REFERENCE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[((?:\\.|[^\]\\])+)\](?: ?\[([^\]]*)\])?").unwrap());
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}\n").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkdownSpan {
    /// `<http://example.com>`, `<user@example.com>`
    AutoLink,
    /// `![alt](src "title")`
    InlineImage,
    /// `![alt][id]`
    ReferenceImage,
    /// `[text](href "title")`
    InlineLink,
    /// `[text][id]`, `[text][]`, `[text]`
    ReferenceLink,
    /// `&amp;`, `&#169;`
    Entity,
    /// Two or more spaces before a newline.
    LineBreak,
}

impl MarkdownSpan {
    pub(crate) fn find(self, text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
        match self {
            MarkdownSpan::AutoLink => {
                let caps = AUTO_LINK.captures_at(text, from)?;
                let emission = match (caps.get(1), caps.get(2)) {
                    (Some(url), _) => span::link(
                        url.as_str(),
                        None,
                        Content::Text(url.as_str().to_string()),
                    ),
                    (None, Some(address)) => span::link(
                        format!("mailto:{}", address.as_str()),
                        None,
                        Content::Text(address.as_str().to_string()),
                    ),
                    (None, None) => return None,
                };
                whole(&caps, emission)
            }
            MarkdownSpan::InlineImage => {
                let caps = INLINE_IMAGE.captures_at(text, from)?;
                let emission = image(&caps[2], &caps[1], caps.get(3).map(|m| m.as_str()));
                whole(&caps, emission)
            }
            MarkdownSpan::ReferenceImage => {
                let caps = captures_from(&REFERENCE_IMAGE, text, from, |caps| {
                    cx.links.get(reference_id(caps)).is_some()
                })?;
                let definition = cx.links.get(reference_id(&caps))?;
                let emission = image(&definition.url, &caps[1], definition.title.as_deref());
                whole(&caps, emission)
            }
            MarkdownSpan::InlineLink => {
                let caps = INLINE_LINK.captures_at(text, from)?;
                let label = caps.get(1)?;
                let emission = span::link(
                    &caps[2],
                    caps.get(3).map(|m| m.as_str().to_string()),
                    Content::Markup(label.range()),
                );
                whole(&caps, emission)
            }
            MarkdownSpan::ReferenceLink => {
                let caps = captures_from(&REFERENCE_LINK, text, from, |caps| {
                    cx.links.get(reference_id(caps)).is_some()
                })?;
                let definition = cx.links.get(reference_id(&caps))?;
                let label = caps.get(1)?;
                let emission = span::link(
                    definition.url.as_str(),
                    definition.title.clone(),
                    Content::Markup(label.range()),
                );
                whole(&caps, emission)
            }
            MarkdownSpan::Entity => {
                let caps = ENTITY.captures_at(text, from)?;
                whole(&caps, Emission::Entity(caps[1].to_string()))
            }
            MarkdownSpan::LineBreak => {
                let found = LINE_BREAK.find_at(text, from)?;
                Some(SpanMatch {
                    start: found.start(),
                    end: found.end(),
                    emission: Emission::LineBreak,
                })
            }
        }
    }
}

/// The reference id of a reference link or image: the second bracket, or the label when the
/// second bracket is empty or missing.
fn reference_id<'t>(caps: &Captures<'t>) -> &'t str {
    match caps.get(2) {
        Some(id) if !id.as_str().trim().is_empty() => id.as_str(),
        _ => caps.get(1).map_or("", |m| m.as_str()),
    }
}

fn image(url: &str, alt: &str, title: Option<&str>) -> Emission {
    let mut attributes = Attributes::new();
    attributes.alt = Some(alt.to_string());
    attributes.title = title.map(str::to_string);
    Emission::Image {
        url: url.to_string(),
        attributes,
    }
}

fn whole(caps: &Captures<'_>, emission: Emission) -> Option<SpanMatch> {
    let whole = caps.get(0)?;
    Some(SpanMatch {
        start: whole.start(),
        end: whole.end(),
        emission,
    })
}
