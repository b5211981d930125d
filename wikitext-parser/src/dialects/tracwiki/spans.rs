//! TracWiki link recognizers
//!
//! Links into a Trac server (tickets, changesets, revision logs, reports, milestones,
//! attachments and the source browser) only match when a server URL is configured. None of them
//! match when preceded by a letter or digit, so `a#1` or `ar1` stay text.

use crate::markup::span::{self, captures_from, word_char_at, word_char_before, Content, Emission, SpanContext, SpanMatch};
use crate::markup::MarkupLanguage;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HYPERLINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[((?:https?|ftp)://[^\s\]]+)(?:\s+([^\]]*))?\]").unwrap());
static INTERNAL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[wiki:([^\s\]]+)(?:\s+([^\]]*))?\]").unwrap());
static REVISION_LOG_SHORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"r(\d+):(\d+)").unwrap());
static REVISION_LOG_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+):(\d+)(?:/([^\]\s]*))?\]").unwrap());
static REVISION_LOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"log:([^\s@]*)@(\d+):(\d+)").unwrap());
static CHANGESET_SHORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"r(\d+)").unwrap());
static CHANGESET_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+)(?:/([^\]\s]*))?\]").unwrap());
static CHANGESET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"changeset:(\d+)(?:/([^\s]*))?").unwrap());
static TICKET_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"comment:(\d+):ticket:(\d+)").unwrap());
static ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"attachment:([^\s:]+):ticket:(\d+)").unwrap());
static TICKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:#|ticket:)(\d+)").unwrap());
static REPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"report:(\d+)").unwrap());
static MILESTONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"milestone:(\S+)").unwrap());
static SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"source:(/[^\s@#]*)(?:@(\d+))?(?:#(L\d+))?").unwrap());
static WIKI_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"wiki:([^\s\[\]]+)").unwrap());
static WIKI_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?:[A-Z][a-z]+)+").unwrap());

/// Characters never treated as the end of a path or milestone name.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TracSpan {
    /// `[http://example.com title]`
    Hyperlink,
    /// `[wiki:Page title]`
    InternalLink,
    /// `r1:3`
    RevisionLogShort,
    /// `[1:3]`, `[1:3/trunk]`
    RevisionLogBracket,
    /// `log:trunk@1:3`
    RevisionLog,
    /// `r1`
    ChangesetShort,
    /// `[1]`, `[1/trunk]`
    ChangesetBracket,
    /// `changeset:1`, `changeset:1/trunk`
    Changeset,
    /// `comment:1:ticket:2`
    TicketComment,
    /// `attachment:file.txt:ticket:1`
    Attachment,
    /// `#1`, `ticket:1`
    Ticket,
    /// `report:1`
    Report,
    /// `milestone:1.0`
    Milestone,
    /// `source:/trunk/file@200#L26`
    Source,
    /// `wiki:Page`
    WikiColon,
    /// `CamelCase` words
    WikiWord,
}

impl TracSpan {
    fn pattern(self) -> &'static Regex {
        match self {
            TracSpan::Hyperlink => &HYPERLINK,
            TracSpan::InternalLink => &INTERNAL_LINK,
            TracSpan::RevisionLogShort => &REVISION_LOG_SHORT,
            TracSpan::RevisionLogBracket => &REVISION_LOG_BRACKET,
            TracSpan::RevisionLog => &REVISION_LOG,
            TracSpan::ChangesetShort => &CHANGESET_SHORT,
            TracSpan::ChangesetBracket => &CHANGESET_BRACKET,
            TracSpan::Changeset => &CHANGESET,
            TracSpan::TicketComment => &TICKET_COMMENT,
            TracSpan::Attachment => &ATTACHMENT,
            TracSpan::Ticket => &TICKET,
            TracSpan::Report => &REPORT,
            TracSpan::Milestone => &MILESTONE,
            TracSpan::Source => &SOURCE,
            TracSpan::WikiColon => &WIKI_COLON,
            TracSpan::WikiWord => &WIKI_WORD,
        }
    }

    fn needs_server(self) -> bool {
        !matches!(
            self,
            TracSpan::Hyperlink | TracSpan::InternalLink | TracSpan::WikiColon | TracSpan::WikiWord
        )
    }

    /// Whether the match may not be followed by a letter or digit.
    fn bounded_after(self) -> bool {
        matches!(
            self,
            TracSpan::RevisionLogShort
                | TracSpan::ChangesetShort
                | TracSpan::Ticket
                | TracSpan::Report
                | TracSpan::WikiWord
        )
    }

    fn enabled(self, language: &MarkupLanguage) -> bool {
        let options = &language.options;
        match self {
            TracSpan::WikiWord => options.auto_linking && options.wiki_word_linking,
            span if span.needs_server() => options.server_url.is_some(),
            _ => true,
        }
    }

    pub(crate) fn find(self, text: &str, from: usize, cx: &SpanContext<'_>) -> Option<SpanMatch> {
        if !self.enabled(cx.language) {
            return None;
        }
        let caps = captures_from(self.pattern(), text, from, |caps| {
            caps.get(0).is_some_and(|m| {
                let bracketed = matches!(self, TracSpan::Hyperlink | TracSpan::InternalLink);
                (bracketed || !word_char_before(text, m.start()))
                    && !(self.bounded_after() && word_char_at(text, m.end()))
            })
        })?;
        let whole = caps.get(0)?;
        let (end, emission) = self.emission(&caps, cx.language)?;
        Some(SpanMatch {
            start: whole.start(),
            end,
            emission,
        })
    }

    /// End of the link (which may drop trailing punctuation) and what to emit for it.
    fn emission(self, caps: &Captures<'_>, language: &MarkupLanguage) -> Option<(usize, Emission)> {
        let whole = caps.get(0)?;
        let group = |index: usize| caps.get(index).map_or("", |m| m.as_str());
        let mut end = whole.end();

        let href = match self {
            TracSpan::Hyperlink => {
                let url = group(1);
                let title = group(2).trim();
                let text = if title.is_empty() { url } else { title };
                return Some((end, span::link(url, None, Content::Text(text.to_string()))));
            }
            TracSpan::InternalLink => {
                let page = group(1);
                let title = group(2).trim();
                let text = if title.is_empty() { page } else { title };
                let href = language.internal_link(page);
                return Some((end, span::link(href, None, Content::Text(text.to_string()))));
            }
            TracSpan::WikiColon | TracSpan::WikiWord => {
                let page = if self == TracSpan::WikiColon {
                    group(1)
                } else {
                    group(0)
                };
                let href = language.internal_link(page);
                return Some((end, span::link(href, None, Content::Text(page.to_string()))));
            }
            TracSpan::RevisionLogShort => {
                language.server_link(&format!("/log/?revs={}-{}", group(1), group(2)))
            }
            TracSpan::RevisionLogBracket => language.server_link(&format!(
                "/log/{}?revs={}-{}",
                group(3).trim_start_matches('/'),
                group(1),
                group(2)
            )),
            TracSpan::RevisionLog => language.server_link(&format!(
                "/log/{}?revs={}-{}",
                group(1).trim_start_matches('/'),
                group(2),
                group(3)
            )),
            TracSpan::ChangesetShort => language.server_link(&format!("/changeset/{}", group(1))),
            TracSpan::ChangesetBracket => language.server_link(&changeset_path(group(1), group(2))),
            TracSpan::Changeset => {
                let path = group(2).trim_end_matches(TRAILING_PUNCTUATION);
                if let Some(m) = caps.get(2) {
                    end = m.start() + path.len();
                    if path.is_empty() {
                        // drop the dangling slash
                        end -= 1;
                    }
                }
                language.server_link(&changeset_path(group(1), path))
            }
            TracSpan::TicketComment => language.server_link(&format!(
                "/ticket/{}#comment:{}",
                group(2),
                group(1)
            )),
            TracSpan::Attachment => language.server_link(&format!(
                "/ticket/{}/{}",
                group(2),
                group(1)
            )),
            TracSpan::Ticket => language.server_link(&format!("/ticket/{}", group(1))),
            TracSpan::Report => language.server_link(&format!("/report/{}", group(1))),
            TracSpan::Milestone => {
                let name = group(1).trim_end_matches(TRAILING_PUNCTUATION);
                if name.is_empty() {
                    return None;
                }
                end = caps.get(1)?.start() + name.len();
                language.server_link(&format!("/milestone/{name}"))
            }
            TracSpan::Source => {
                let mut href = format!("/browser{}", group(1));
                if let Some(revision) = caps.get(2) {
                    href.push_str(&format!("?rev={}", revision.as_str()));
                }
                if let Some(line) = caps.get(3) {
                    href.push_str(&format!("#{}", line.as_str()));
                }
                language.server_link(&href)
            }
        }?;

        let text = &whole.as_str()[..end - whole.start()];
        Some((end, span::link(href, None, Content::Text(text.to_string()))))
    }
}

fn changeset_path(revision: &str, path: &str) -> String {
    if path.is_empty() {
        format!("/changeset/{revision}")
    } else {
        format!("/changeset/{revision}/{}", path.trim_start_matches('/'))
    }
}
