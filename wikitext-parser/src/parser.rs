//! Line-driven parser
//!
//! The parser splits the source into lines and offers each line to the innermost open block.
//! A block that rejects a line is closed and the line is offered to the block around it; once no
//! open block accepts the line, the dialect's block rules are tried in order to start a new one.
//! At end of input every open block is closed, innermost first.
//!
//! The same machinery is available incrementally through [`ParseSession`], which accepts lines
//! one at a time.

use crate::builder::DocumentBuilder;
use crate::builders::HtmlDocumentBuilder;
use crate::dialects::markdown::links::{self, LinkDefinitions};
use crate::error::BuilderError;
use crate::markup::block::{is_blank, Block, BlockContext, LineStep, OpenBlock};
use crate::markup::MarkupLanguage;

/// Parses documents written in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct MarkupParser<'l> {
    language: &'l MarkupLanguage,
}

impl<'l> MarkupParser<'l> {
    pub fn new(language: &'l MarkupLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> &'l MarkupLanguage {
        self.language
    }

    /// Parse a whole document, bracketed by `begin_document`/`end_document`.
    pub fn parse(
        &self,
        source: &str,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), BuilderError> {
        self.run(source, builder, true)
    }

    /// Parse without the document bracket, for embedding the output in a larger stream.
    pub fn parse_fragment(
        &self,
        source: &str,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), BuilderError> {
        self.run(source, builder, false)
    }

    /// Parse into an HTML fragment.
    pub fn parse_to_html(&self, source: &str) -> Result<String, BuilderError> {
        let mut builder = HtmlDocumentBuilder::fragment();
        self.parse(source, &mut builder)?;
        Ok(builder.into_html())
    }

    /// Start an incremental parse. Emits `begin_document` immediately.
    pub fn session<'b>(
        &self,
        builder: &'b mut dyn DocumentBuilder,
    ) -> Result<ParseSession<'l, 'b>, BuilderError> {
        ParseSession::start(self.language, builder, LinkDefinitions::default(), true)
    }

    fn run(
        &self,
        source: &str,
        builder: &mut dyn DocumentBuilder,
        document: bool,
    ) -> Result<(), BuilderError> {
        log::debug!(
            "parsing {} bytes as {}",
            source.len(),
            self.language.name()
        );
        let (lines, definitions) = if self.language.link_definitions {
            links::extract(source)
        } else {
            (source.lines().collect(), LinkDefinitions::default())
        };
        let mut session = ParseSession::start(self.language, builder, definitions, document)?;
        for line in lines {
            session.push_line(line)?;
        }
        session.finish()
    }
}

/// An incremental parse fed one line at a time.
///
/// Dropping a session without calling [`finish`](ParseSession::finish) leaves the builder with
/// an unbalanced stream.
pub struct ParseSession<'l, 'b> {
    language: &'l MarkupLanguage,
    builder: &'b mut dyn DocumentBuilder,
    links: LinkDefinitions,
    state: ParserState,
    document: bool,
}

impl<'l, 'b> ParseSession<'l, 'b> {
    fn start(
        language: &'l MarkupLanguage,
        builder: &'b mut dyn DocumentBuilder,
        links: LinkDefinitions,
        document: bool,
    ) -> Result<Self, BuilderError> {
        if document {
            builder.begin_document()?;
        }
        Ok(Self {
            language,
            builder,
            links,
            state: ParserState::default(),
            document,
        })
    }

    /// Feed one line, without its line terminator.
    pub fn push_line(&mut self, line: &str) -> Result<(), BuilderError> {
        if self.language.link_definitions && self.state.is_idle() {
            if let Some((id, definition)) = links::parse_definition(line) {
                self.links.insert(&id, definition);
                return Ok(());
            }
        }
        let mut cx = BlockContext::new(self.language, &mut *self.builder, &self.links);
        self.state.process_line(&mut cx, line)
    }

    /// Number of lines fed so far.
    pub fn line_number(&self) -> usize {
        self.state.line_number
    }

    /// Close all open blocks and end the document.
    pub fn finish(mut self) -> Result<(), BuilderError> {
        let mut cx = BlockContext::new(self.language, &mut *self.builder, &self.links);
        self.state.close_all(&mut cx)?;
        if self.document {
            self.builder.end_document()?;
        }
        Ok(())
    }
}

/// The open block stack of one (possibly nested) parse.
#[derive(Debug, Default)]
pub(crate) struct ParserState {
    stack: Vec<OpenBlock>,
    line_number: usize,
    /// Set while the innermost open block is verbatim.
    verbatim: bool,
}

impl ParserState {
    fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn process_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<(), BuilderError> {
        self.line_number += 1;
        while let Some(block) = self.stack.last_mut() {
            cx.verbatim = self.verbatim;
            match block.next_line(cx, line)? {
                LineStep::Continue => return Ok(()),
                LineStep::Finished => return self.close_top(cx),
                LineStep::Rejected => self.close_top(cx)?,
            }
        }
        self.start_block(cx, line)
    }

    fn start_block(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<(), BuilderError> {
        if is_blank(line) {
            return Ok(());
        }
        let Some(mut block) = cx.language.blocks.iter().find_map(|rule| rule.start(line)) else {
            log::warn!("line {} matched no block rule", self.line_number);
            return Ok(());
        };
        log::trace!("line {} starts {:?}", self.line_number, block);
        cx.verbatim = block.is_verbatim();
        match block.open(cx, line)? {
            LineStep::Continue => {
                self.verbatim = cx.verbatim;
                self.stack.push(block);
                Ok(())
            }
            LineStep::Finished | LineStep::Rejected => {
                block.close(cx)?;
                cx.verbatim = self.verbatim;
                Ok(())
            }
        }
    }

    fn close_top(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        if let Some(mut block) = self.stack.pop() {
            cx.verbatim = block.is_verbatim();
            block.close(cx)?;
        }
        self.verbatim = self.stack.last().is_some_and(Block::is_verbatim);
        cx.verbatim = self.verbatim;
        Ok(())
    }

    pub(crate) fn close_all(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        while !self.stack.is_empty() {
            self.close_top(cx)?;
        }
        Ok(())
    }
}
