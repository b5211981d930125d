//! TracWiki
//!
//! Block constructs: `= headings =` (with optional `#id`), `{{{` preformatted regions (or code
//! with a `#!lang` first line), `||` tables, indented `*`/`-`/`1.` lists, indented `term::`
//! definition lists, `>` or indented quotes and paragraphs.
//!
//! Span constructs: `[[Macro(args)]]`, `{{{monospace}}}`, `'''bold'''`, `''italic''`, `~~deleted~~`,
//! `__underlined__`, `^superscript^`, `,,subscript,,`, bracketed and bare links, WikiWords and the
//! Trac links (`#1`, `r1`, `[1]`, `changeset:1`, `source:/path` and friends) that resolve against
//! the configured server URL. `!` escapes the construct that follows it.

pub(crate) mod blocks;
pub(crate) mod spans;

use crate::builder::SpanType;
use crate::markup::block::BlockRule;
use crate::markup::macros::Macro;
use crate::markup::span::{Delimiter, SpanRule};
use crate::markup::{Escape, LanguageOptions, MarkupLanguage};
use blocks::TracBlockRule;
use spans::TracSpan;

pub const NAME: &str = "tracwiki";

pub fn language() -> MarkupLanguage {
    let blocks = [
        TracBlockRule::Heading,
        TracBlockRule::Preformatted,
        TracBlockRule::Table,
        TracBlockRule::List,
        TracBlockRule::DefinitionList,
        TracBlockRule::Quote,
        TracBlockRule::Paragraph,
    ];
    let links = [
        TracSpan::Hyperlink,
        TracSpan::InternalLink,
        TracSpan::RevisionLogShort,
        TracSpan::RevisionLogBracket,
        TracSpan::RevisionLog,
        TracSpan::ChangesetShort,
        TracSpan::ChangesetBracket,
        TracSpan::Changeset,
        TracSpan::TicketComment,
        TracSpan::Attachment,
        TracSpan::Ticket,
        TracSpan::Report,
        TracSpan::Milestone,
        TracSpan::Source,
        TracSpan::WikiColon,
        TracSpan::WikiWord,
    ];

    let mut spans = vec![
        SpanRule::Macro,
        SpanRule::Delimited(Delimiter::verbatim("{{{", "}}}", SpanType::Monospace)),
        SpanRule::Delimited(Delimiter::verbatim("{{", "}}", SpanType::Monospace)),
        SpanRule::Delimited(Delimiter::verbatim("`", "`", SpanType::Monospace)),
        SpanRule::Delimited(Delimiter::markup("'''''", SpanType::BoldItalic)),
        SpanRule::Delimited(Delimiter::markup("'''", SpanType::Bold)),
        SpanRule::Delimited(Delimiter::markup("''", SpanType::Italic)),
        SpanRule::Delimited(Delimiter::markup("~~", SpanType::Deleted)),
        SpanRule::Delimited(Delimiter::markup("__", SpanType::Underlined)),
        SpanRule::Delimited(Delimiter::markup("^", SpanType::Superscript)),
        SpanRule::Delimited(Delimiter::markup(",,", SpanType::Subscript)),
    ];
    spans.extend(links.into_iter().map(SpanRule::Trac));
    spans.push(SpanRule::RawUrl);

    MarkupLanguage {
        name: NAME.to_string(),
        description: "Trac wiki markup".to_string(),
        extensions: vec!["trac".to_string(), "tracwiki".to_string()],
        blocks: blocks.into_iter().map(BlockRule::Trac).collect(),
        spans,
        macros: vec![Macro::LineBreak, Macro::Image],
        escape: Some(Escape::Token('!')),
        link_definitions: false,
        options: LanguageOptions::default(),
    }
}
