//! Block recognition
//!
//! A block rule decides whether a line can start its block. Once started, the open block is
//! offered every following line and answers with a [`LineStep`]: it either consumed the line
//! (possibly finishing itself) or rejected it, in which case the block is closed and the line is
//! offered to the next block out, or used to start a new block.

use super::span::{self, SpanContext};
use super::MarkupLanguage;
use crate::attributes::Attributes;
use crate::builder::{BlockType, DocumentBuilder};
use crate::dialects::markdown::blocks::{MarkdownBlock, MarkdownBlockRule};
use crate::dialects::markdown::links::LinkDefinitions;
use crate::dialects::tracwiki::blocks::{TracBlock, TracBlockRule};
use crate::error::BuilderError;
use crate::parser::ParserState;

/// Nesting depth beyond which nested content is emitted as plain paragraph text.
const MAX_NESTING: usize = 32;

/// Outcome of offering a line to an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineStep {
    /// The line was consumed and the block stays open.
    Continue,
    /// The line was consumed and the block is complete.
    Finished,
    /// The line does not belong to the block.
    Rejected,
}

/// Behavior shared by all open blocks.
pub(crate) trait Block {
    /// Consume the line that started the block.
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError>;

    fn next_line(&mut self, cx: &mut BlockContext<'_>, line: &str)
        -> Result<LineStep, BuilderError>;

    /// Emit whatever is still pending and end every block this block began.
    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError>;

    /// Content is literal text, not markup.
    fn is_verbatim(&self) -> bool {
        false
    }
}

/// One block recognizer of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockRule {
    Trac(TracBlockRule),
    Markdown(MarkdownBlockRule),
}

impl BlockRule {
    pub(crate) fn start(&self, line: &str) -> Option<OpenBlock> {
        match self {
            BlockRule::Trac(rule) => rule.start(line).map(OpenBlock::Trac),
            BlockRule::Markdown(rule) => rule.start(line).map(OpenBlock::Markdown),
        }
    }

    /// Whether `line` starts a block that ends an open paragraph.
    pub(crate) fn interrupts_paragraph(&self, line: &str) -> bool {
        match self {
            BlockRule::Trac(rule) => rule.interrupts_paragraph(line),
            BlockRule::Markdown(rule) => rule.interrupts_paragraph(line),
        }
    }
}

/// A started block.
#[derive(Debug)]
pub(crate) enum OpenBlock {
    Trac(TracBlock),
    Markdown(MarkdownBlock),
}

impl Block for OpenBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        match self {
            OpenBlock::Trac(block) => block.open(cx, line),
            OpenBlock::Markdown(block) => block.open(cx, line),
        }
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        match self {
            OpenBlock::Trac(block) => block.next_line(cx, line),
            OpenBlock::Markdown(block) => block.next_line(cx, line),
        }
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        match self {
            OpenBlock::Trac(block) => block.close(cx),
            OpenBlock::Markdown(block) => block.close(cx),
        }
    }

    fn is_verbatim(&self) -> bool {
        match self {
            OpenBlock::Trac(block) => block.is_verbatim(),
            OpenBlock::Markdown(block) => block.is_verbatim(),
        }
    }
}

/// Everything a block needs to emit events.
pub(crate) struct BlockContext<'a> {
    pub(crate) language: &'a MarkupLanguage,
    pub(crate) builder: &'a mut dyn DocumentBuilder,
    pub(crate) links: &'a LinkDefinitions,
    /// Set while a verbatim block is open; span recognition is off.
    pub(crate) verbatim: bool,
    pub(crate) depth: usize,
}

impl<'a> BlockContext<'a> {
    pub(crate) fn new(
        language: &'a MarkupLanguage,
        builder: &'a mut dyn DocumentBuilder,
        links: &'a LinkDefinitions,
    ) -> Self {
        Self {
            language,
            builder,
            links,
            verbatim: false,
            depth: 0,
        }
    }

    pub(crate) fn begin_block(
        &mut self,
        block_type: BlockType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        log::trace!("begin {block_type:?}");
        self.builder.begin_block(block_type, attributes)
    }

    pub(crate) fn begin_plain_block(&mut self, block_type: BlockType) -> Result<(), BuilderError> {
        self.begin_block(block_type, &Attributes::new())
    }

    pub(crate) fn end_block(&mut self) -> Result<(), BuilderError> {
        self.builder.end_block()
    }

    pub(crate) fn characters(&mut self, text: &str) -> Result<(), BuilderError> {
        if text.is_empty() {
            return Ok(());
        }
        self.builder.characters(text)
    }

    pub(crate) fn line_break(&mut self) -> Result<(), BuilderError> {
        self.builder.line_break()
    }

    pub(crate) fn horizontal_rule(&mut self) -> Result<(), BuilderError> {
        self.builder.horizontal_rule()
    }

    /// Emit inline text, recognizing spans unless a verbatim block is open.
    pub(crate) fn emit_markup(&mut self, text: &str) -> Result<(), BuilderError> {
        if self.verbatim {
            return self.characters(text);
        }
        let cx = SpanContext {
            language: self.language,
            links: self.links,
        };
        span::emit_phrases(text, &cx, &mut *self.builder)
    }

    pub(crate) fn can_interrupt_paragraph(&self, line: &str) -> bool {
        self.language
            .blocks
            .iter()
            .any(|rule| rule.interrupts_paragraph(line))
    }

    /// Parse `lines` as a nested document at the current position.
    pub(crate) fn parse_nested(&mut self, lines: &[String]) -> Result<(), BuilderError> {
        let depth = self.depth + 1;
        let mut nested = BlockContext {
            language: self.language,
            builder: &mut *self.builder,
            links: self.links,
            verbatim: false,
            depth,
        };
        if depth > MAX_NESTING {
            log::warn!("nesting deeper than {MAX_NESTING} levels, emitting as text");
            let text = lines.join("\n");
            if text.trim().is_empty() {
                return Ok(());
            }
            nested.begin_plain_block(BlockType::Paragraph)?;
            nested.characters(text.trim())?;
            return nested.end_block();
        }
        let mut state = ParserState::default();
        for line in lines {
            state.process_line(&mut nested, line)?;
        }
        state.close_all(&mut nested)
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width of the leading whitespace of `line`, counting a tab as four columns.
pub(crate) fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
