//! Markdown
//!
//! The classic Markdown syntax: ATX and setext headings, `>` quotes (which may contain any other
//! block), bulleted and numbered lists, indented and fenced code, horizontal rules and
//! paragraphs. Inline: code spans, `<autolinks>`, inline and reference links and images,
//! `**strong**`/`__strong__`, `*emphasis*`/`_emphasis_`, character entities and hard line
//! breaks. A backslash escapes any ASCII punctuation character.

pub(crate) mod blocks;
pub mod links;
pub(crate) mod spans;

use crate::builder::SpanType;
use crate::markup::block::BlockRule;
use crate::markup::span::{Delimiter, SpanRule};
use crate::markup::{Escape, LanguageOptions, MarkupLanguage};
use blocks::MarkdownBlockRule;
use spans::MarkdownSpan;

pub const NAME: &str = "markdown";

pub fn language() -> MarkupLanguage {
    let blocks = [
        MarkdownBlockRule::FencedCode,
        MarkdownBlockRule::Heading,
        MarkdownBlockRule::HorizontalRule,
        MarkdownBlockRule::Quote,
        MarkdownBlockRule::List,
        MarkdownBlockRule::IndentedCode,
        MarkdownBlockRule::Paragraph,
    ];
    let spans = vec![
        SpanRule::Delimited(Delimiter::verbatim("``", "``", SpanType::Code).padded()),
        SpanRule::Delimited(Delimiter::verbatim("`", "`", SpanType::Code).padded()),
        SpanRule::Markdown(MarkdownSpan::AutoLink),
        SpanRule::Markdown(MarkdownSpan::InlineImage),
        SpanRule::Markdown(MarkdownSpan::ReferenceImage),
        SpanRule::Markdown(MarkdownSpan::InlineLink),
        SpanRule::Markdown(MarkdownSpan::ReferenceLink),
        SpanRule::Delimited(Delimiter::markup("**", SpanType::Strong).flanking()),
        SpanRule::Delimited(Delimiter::markup("__", SpanType::Strong).flanking()),
        SpanRule::Delimited(Delimiter::markup("*", SpanType::Emphasis).flanking()),
        SpanRule::Delimited(Delimiter::markup("_", SpanType::Emphasis).flanking()),
        SpanRule::Markdown(MarkdownSpan::Entity),
        SpanRule::Markdown(MarkdownSpan::LineBreak),
    ];

    MarkupLanguage {
        name: NAME.to_string(),
        description: "Markdown".to_string(),
        extensions: vec!["md".to_string(), "markdown".to_string(), "mdown".to_string()],
        blocks: blocks.into_iter().map(BlockRule::Markdown).collect(),
        spans,
        macros: Vec::new(),
        escape: Some(Escape::Punctuation('\\')),
        link_definitions: true,
        options: LanguageOptions::default(),
    }
}
