//! Span recognition
//!
//! Inline text is scanned left to right. At every position each span rule of the dialect looks
//! for its next occurrence; the earliest match wins and ties go to the rule listed first. Text
//! before the match is emitted as characters, the match is emitted as events, and scanning
//! resumes after it. Span content that is itself markup is scanned recursively with the same
//! rules.
//!
//! Escapes come in two flavors (see [`Escape`]): a token escape suppresses the opening token of
//! whatever rule would match right after the marker, a punctuation escape turns the next ASCII
//! punctuation character into literal text. In both cases the marker itself is dropped.

use super::macros;
use super::{Escape, MarkupLanguage};
use crate::attributes::Attributes;
use crate::builder::{DocumentBuilder, SpanType};
use crate::dialects::markdown::links::LinkDefinitions;
use crate::dialects::markdown::spans::MarkdownSpan;
use crate::dialects::tracwiki::spans::TracSpan;
use crate::error::BuilderError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

// Arguments run to the first `)]]`, so they may contain parentheses but not `]`.
static MACRO_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(\w+)(?:\(([^\]]*?)\))?\]\]").unwrap());
static RAW_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:https?|ftp)://[^\s<>"\[\]]+"#).unwrap());

/// Characters stripped from the end of a bare URL.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\''];

/// One inline recognizer of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanRule {
    /// `[[Name(args)]]` macro calls.
    Macro,
    /// Text between an opening and a closing token.
    Delimited(Delimiter),
    Trac(TracSpan),
    Markdown(MarkdownSpan),
    /// Bare `http://`, `https://` and `ftp://` URLs.
    RawUrl,
}

impl SpanRule {
    fn find(&self, text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
        match self {
            SpanRule::Macro => find_macro(text, from, cx),
            SpanRule::Delimited(delimiter) => delimiter.find(text, from, cx.language.escape),
            SpanRule::Trac(span) => span.find(text, from, cx),
            SpanRule::Markdown(span) => span.find(text, from, cx),
            SpanRule::RawUrl => find_raw_url(text, from, cx),
        }
    }

    /// Length of this rule's opening token at `at`, used by token escapes.
    fn token_len(&self, text: &str, at: usize, cx: &SpanContext<'_>) -> Option<usize> {
        let rest = &text[at..];
        match self {
            SpanRule::Macro => rest.starts_with("[[").then_some(2),
            SpanRule::Delimited(delimiter) => {
                rest.starts_with(delimiter.open).then_some(delimiter.open.len())
            }
            _ => self
                .find(text, at, cx)
                .filter(|found| found.start == at)
                .map(|found| found.end - at),
        }
    }
}

/// Opening and closing tokens of a delimited span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delimiter {
    pub(crate) open: &'static str,
    pub(crate) close: &'static str,
    pub(crate) span_type: SpanType,
    /// Content is literal text rather than nested markup.
    pub(crate) verbatim: bool,
    /// The opener may not be followed by whitespace and the closer may not be preceded by it.
    /// Underscore tokens additionally may not touch a word character on the outside.
    pub(crate) flanking: bool,
    /// Strip one space from each end of the content when both ends have one.
    pub(crate) trim_padding: bool,
}

impl Delimiter {
    pub(crate) fn markup(token: &'static str, span_type: SpanType) -> Self {
        Self {
            open: token,
            close: token,
            span_type,
            verbatim: false,
            flanking: false,
            trim_padding: false,
        }
    }

    pub(crate) fn verbatim(open: &'static str, close: &'static str, span_type: SpanType) -> Self {
        Self {
            open,
            close,
            span_type,
            verbatim: true,
            flanking: false,
            trim_padding: false,
        }
    }

    pub(crate) fn flanking(mut self) -> Self {
        self.flanking = true;
        self
    }

    pub(crate) fn padded(mut self) -> Self {
        self.trim_padding = true;
        self
    }

    fn find(&self, text: &str, from: usize, escape: Option<Escape>) -> Option<SpanMatch> {
        let mut search = from;
        while let Some(offset) = text.get(search..)?.find(self.open) {
            let open = search + offset;
            let content_start = open + self.open.len();
            if self.opener_allowed(text, open, content_start) {
                if let Some(close) = self.find_close(text, content_start, escape) {
                    let mut range = content_start..close;
                    if self.trim_padding {
                        range = trim_padding(text, range);
                    }
                    let content = if self.verbatim {
                        Content::Verbatim(range)
                    } else {
                        Content::Markup(range)
                    };
                    return Some(SpanMatch {
                        start: open,
                        end: close + self.close.len(),
                        emission: Emission::Span {
                            span_type: self.span_type,
                            attributes: Attributes::new(),
                            content,
                        },
                    });
                }
            }
            // tokens are ASCII, so the next byte is a char boundary
            search = open + 1;
        }
        None
    }

    fn opener_allowed(&self, text: &str, open: usize, content_start: usize) -> bool {
        if !self.flanking {
            return true;
        }
        let followed_by_text = text[content_start..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace());
        followed_by_text && !(self.open.starts_with('_') && word_char_before(text, open))
    }

    fn find_close(&self, text: &str, content_start: usize, escape: Option<Escape>) -> Option<usize> {
        let mut search = next_boundary(text, content_start)?;
        while let Some(offset) = text.get(search..)?.find(self.close) {
            let close = search + offset;
            let end = close + self.close.len();
            if self.flanking && self.close.len() == 1 && text[end..].starts_with(self.close) {
                // part of a longer run such as `**`; skip the whole run
                search = end + text[end..].len() - text[end..].trim_start_matches(self.close).len();
                continue;
            }
            let escaped = !self.verbatim && escaped_at(text, close, escape);
            if !escaped && self.closer_allowed(text, close, end) {
                return Some(close);
            }
            search = close + 1;
        }
        None
    }

    fn closer_allowed(&self, text: &str, close: usize, end: usize) -> bool {
        if !self.flanking {
            return true;
        }
        let preceded_by_text = text[..close]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        preceded_by_text && !(self.close.starts_with('_') && word_char_at(text, end))
    }
}

/// Whether the token at `at` is escaped by the marker before it.
///
/// A punctuation marker can itself be escaped, so only an odd run of markers escapes the token.
pub(crate) fn escaped_at(text: &str, at: usize, escape: Option<Escape>) -> bool {
    let before = &text[..at];
    match escape {
        Some(Escape::Token(marker)) => before.ends_with(marker),
        Some(Escape::Punctuation(marker)) => {
            let run = before.len() - before.trim_end_matches(marker).len();
            (run / marker.len_utf8()) % 2 == 1
        }
        None => false,
    }
}

/// A recognized span: the byte range it covers and what to emit for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanMatch {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) emission: Emission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Emission {
    Span {
        span_type: SpanType,
        attributes: Attributes,
        content: Content,
    },
    Image {
        url: String,
        attributes: Attributes,
    },
    LineBreak,
    Entity(String),
    /// The matched text is consumed without output.
    Nothing,
}

/// Content of an emitted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Content {
    /// A range of the scanned text, recognized recursively.
    Markup(Range<usize>),
    /// A range of the scanned text, emitted as-is.
    Verbatim(Range<usize>),
    /// Replacement text, emitted as-is.
    Text(String),
}

/// A hyperlink span.
pub(crate) fn link(href: impl Into<String>, title: Option<String>, content: Content) -> Emission {
    let mut attributes = Attributes::new().with_href(href);
    attributes.title = title;
    Emission::Span {
        span_type: SpanType::Link,
        attributes,
        content,
    }
}

/// Read-only state shared by all span rules during one parse.
pub(crate) struct SpanContext<'a> {
    pub(crate) language: &'a MarkupLanguage,
    pub(crate) links: &'a LinkDefinitions,
}

/// Recognize spans in `text` and emit them, with the text between them, to `builder`.
pub(crate) fn emit_phrases(
    text: &str,
    cx: &SpanContext<'_>,
    builder: &mut dyn DocumentBuilder,
) -> Result<(), BuilderError> {
    let mut literal = String::new();
    let mut pos = 0;
    while pos < text.len() {
        let found = next_match(text, pos, cx);
        let limit = found.as_ref().map_or(text.len(), |m| m.start);
        if let Some((marker, token)) = find_escape(text, pos, limit, cx) {
            literal.push_str(&text[pos..marker]);
            literal.push_str(&text[token.clone()]);
            pos = token.end;
            continue;
        }
        match found {
            Some(found) => {
                literal.push_str(&text[pos..found.start]);
                flush(&mut literal, builder)?;
                log::trace!("span {:?} at {}..{}", found.emission, found.start, found.end);
                pos = found.end;
                emit(found.emission, text, cx, builder)?;
            }
            None => {
                literal.push_str(&text[pos..]);
                break;
            }
        }
    }
    flush(&mut literal, builder)
}

fn next_match(text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
    let mut best: Option<SpanMatch> = None;
    for rule in &cx.language.spans {
        let Some(candidate) = rule.find(text, from, cx) else {
            continue;
        };
        if candidate.end <= candidate.start {
            continue;
        }
        if best.as_ref().map_or(true, |b| candidate.start < b.start) {
            let at_cursor = candidate.start == from;
            best = Some(candidate);
            if at_cursor {
                break;
            }
        }
    }
    best
}

/// The first escape marker in `from..limit` that actually escapes something, with the range of
/// the escaped text.
fn find_escape(
    text: &str,
    from: usize,
    limit: usize,
    cx: &SpanContext<'_>,
) -> Option<(usize, Range<usize>)> {
    let escape = cx.language.escape?;
    let marker = escape.marker();
    let mut search = from;
    while let Some(offset) = text[search..limit].find(marker) {
        let at = search + offset;
        let token_start = at + marker.len_utf8();
        let token_len = match escape {
            Escape::Token(_) => cx
                .language
                .spans
                .iter()
                .find_map(|rule| rule.token_len(text, token_start, cx)),
            Escape::Punctuation(_) => text[token_start..]
                .chars()
                .next()
                .filter(|c| c.is_ascii_punctuation())
                .map(char::len_utf8),
        };
        if let Some(len) = token_len.filter(|len| *len > 0) {
            return Some((at, token_start..token_start + len));
        }
        search = token_start;
    }
    None
}

fn emit(
    emission: Emission,
    text: &str,
    cx: &SpanContext<'_>,
    builder: &mut dyn DocumentBuilder,
) -> Result<(), BuilderError> {
    match emission {
        Emission::Span {
            span_type,
            attributes,
            content,
        } => {
            builder.begin_span(span_type, &attributes)?;
            match content {
                Content::Markup(range) => emit_phrases(&text[range], cx, builder)?,
                Content::Verbatim(range) => characters(&text[range], builder)?,
                Content::Text(value) => characters(&value, builder)?,
            }
            builder.end_span()
        }
        Emission::Image { url, attributes } => builder.image(&attributes, &url),
        Emission::LineBreak => builder.line_break(),
        Emission::Entity(name) => builder.entity_reference(&name),
        Emission::Nothing => Ok(()),
    }
}

fn characters(text: &str, builder: &mut dyn DocumentBuilder) -> Result<(), BuilderError> {
    if text.is_empty() {
        return Ok(());
    }
    builder.characters(text)
}

fn flush(literal: &mut String, builder: &mut dyn DocumentBuilder) -> Result<(), BuilderError> {
    characters(literal, builder)?;
    literal.clear();
    Ok(())
}

fn find_macro(text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
    let caps = MACRO_CALL.captures_at(text, from)?;
    let whole = caps.get(0)?;
    let args = caps.get(2).map(|m| m.as_str());
    Some(SpanMatch {
        start: whole.start(),
        end: whole.end(),
        emission: macros::expand(cx.language, &caps[1], args),
    })
}

fn find_raw_url(text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
    if !cx.language.options.auto_linking {
        return None;
    }
    let caps = captures_from(&RAW_URL, text, from, |caps| {
        caps.get(0).is_some_and(|m| {
            !word_char_before(text, m.start())
                && !m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION).ends_with("://")
        })
    })?;
    let whole = caps.get(0)?;
    let url = whole.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
    Some(SpanMatch {
        start: whole.start(),
        end: whole.start() + url.len(),
        emission: link(url, None, Content::Text(url.to_string())),
    })
}

/// First match of `re` at or after `from` that satisfies `accept`.
///
/// Stands in for lookaround assertions, which the regex crate does not support.
pub(crate) fn captures_from<'t>(
    re: &Regex,
    text: &'t str,
    from: usize,
    accept: impl Fn(&Captures<'t>) -> bool,
) -> Option<Captures<'t>> {
    let mut search = from;
    while search <= text.len() {
        let caps = re.captures_at(text, search)?;
        if accept(&caps) {
            return Some(caps);
        }
        search = next_boundary(text, caps.get(0)?.start())?;
    }
    None
}

/// Whether the character ending right before `at` is alphanumeric.
pub(crate) fn word_char_before(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric)
}

/// Whether the character starting at `at` is alphanumeric.
pub(crate) fn word_char_at(text: &str, at: usize) -> bool {
    text[at..].chars().next().is_some_and(char::is_alphanumeric)
}

fn next_boundary(text: &str, at: usize) -> Option<usize> {
    text[at..].chars().next().map(|c| at + c.len_utf8())
}

fn trim_padding(text: &str, range: Range<usize>) -> Range<usize> {
    let content = &text[range.clone()];
    if content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.trim().is_empty()
    {
        range.start + 1..range.end - 1
    } else {
        range
    }
}
