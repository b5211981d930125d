//! TracWiki block rules

use crate::attributes::Attributes;
use crate::builder::BlockType;
use crate::error::BuilderError;
use crate::markup::block::{indentation, is_blank, Block, BlockContext, LineStep};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(=+)\s*(.+?)\s*=+\s*(?:#(\S+))?\s*$").unwrap());
static PRE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{\{(?:#!(\S+))?\s*$").unwrap());
static PRE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\}\}\}\s*$").unwrap());
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\|\|(.*)\|\|\s*$").unwrap());
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([*-]|(\d+)\.)\s+(.*)$").unwrap());
static DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+(.+?)::(\s.*)?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TracBlockRule {
    Heading,
    Preformatted,
    Table,
    List,
    DefinitionList,
    Quote,
    Paragraph,
}

impl TracBlockRule {
    pub(crate) fn start(self, line: &str) -> Option<TracBlock> {
        let block = match self {
            TracBlockRule::Heading if HEADING.is_match(line) => TracBlock::Heading(HeadingBlock),
            TracBlockRule::Preformatted if PRE_OPEN.is_match(line) => {
                TracBlock::Preformatted(PreformattedBlock::default())
            }
            TracBlockRule::Table if TABLE_ROW.is_match(line) => TracBlock::Table(TableBlock),
            TracBlockRule::List if list_item(line).is_some() => {
                TracBlock::List(ListBlock::default())
            }
            TracBlockRule::DefinitionList if definition(line).is_some() => {
                TracBlock::DefinitionList(DefinitionListBlock::default())
            }
            TracBlockRule::Quote if quote_line(line).is_some() => {
                TracBlock::Quote(QuoteBlock::default())
            }
            TracBlockRule::Paragraph if !is_blank(line) => TracBlock::Paragraph(ParagraphBlock),
            _ => return None,
        };
        Some(block)
    }

    pub(crate) fn interrupts_paragraph(self, line: &str) -> bool {
        self != TracBlockRule::Paragraph && self.start(line).is_some()
    }
}

#[derive(Debug)]
pub(crate) enum TracBlock {
    Heading(HeadingBlock),
    Preformatted(PreformattedBlock),
    Table(TableBlock),
    List(ListBlock),
    DefinitionList(DefinitionListBlock),
    Quote(QuoteBlock),
    Paragraph(ParagraphBlock),
}

impl TracBlock {
    fn inner(&mut self) -> &mut dyn Block {
        match self {
            TracBlock::Heading(block) => block,
            TracBlock::Preformatted(block) => block,
            TracBlock::Table(block) => block,
            TracBlock::List(block) => block,
            TracBlock::DefinitionList(block) => block,
            TracBlock::Quote(block) => block,
            TracBlock::Paragraph(block) => block,
        }
    }
}

impl Block for TracBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        self.inner().open(cx, line)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        self.inner().next_line(cx, line)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        self.inner().close(cx)
    }

    fn is_verbatim(&self) -> bool {
        matches!(self, TracBlock::Preformatted(_))
    }
}

/// `= Heading =`, `== Heading == #id`. A heading is always a single line.
#[derive(Debug)]
pub(crate) struct HeadingBlock;

impl Block for HeadingBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let Some(caps) = HEADING.captures(line) else {
            return Ok(LineStep::Finished);
        };
        let text = caps[2].trim();
        let id = match caps.get(3) {
            Some(id) => id.as_str().to_string(),
            None => text.split_whitespace().collect(),
        };
        cx.begin_block(
            BlockType::heading(caps[1].len()),
            &Attributes::new().with_id(id),
        )?;
        cx.emit_markup(text)?;
        cx.end_block()?;
        Ok(LineStep::Finished)
    }

    fn next_line(&mut self, _: &mut BlockContext<'_>, _: &str) -> Result<LineStep, BuilderError> {
        Ok(LineStep::Rejected)
    }

    fn close(&mut self, _: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        Ok(())
    }
}

/// `{{{` ... `}}}`. A `#!lang` line right after the opener turns the region into code.
#[derive(Debug, Default)]
pub(crate) struct PreformattedBlock {
    started: bool,
}

impl PreformattedBlock {
    fn begin(&mut self, cx: &mut BlockContext<'_>, language: Option<&str>) -> Result<(), BuilderError> {
        self.started = true;
        match language {
            Some(language) => cx.begin_block(
                BlockType::Code,
                &Attributes::new().with_language(language),
            ),
            None => cx.begin_plain_block(BlockType::Preformatted),
        }
    }
}

impl Block for PreformattedBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let language = PRE_OPEN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        if language.is_some() {
            self.begin(cx, language)?;
        }
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if PRE_CLOSE.is_match(line) {
            return Ok(LineStep::Finished);
        }
        if !self.started {
            if let Some(language) = line.strip_prefix("#!") {
                let language = language.trim();
                self.begin(cx, (!language.is_empty()).then_some(language))?;
                return Ok(LineStep::Continue);
            }
            self.begin(cx, None)?;
        }
        cx.characters(line)?;
        cx.characters("\n")?;
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        if !self.started {
            self.begin(cx, None)?;
        }
        cx.end_block()
    }

    fn is_verbatim(&self) -> bool {
        true
    }
}

/// `||cell||cell||` rows; `||=header=||` cells become table headers.
#[derive(Debug)]
pub(crate) struct TableBlock;

impl TableBlock {
    fn row(&self, cx: &mut BlockContext<'_>, line: &str) -> Result<(), BuilderError> {
        let Some(caps) = TABLE_ROW.captures(line) else {
            return Ok(());
        };
        cx.begin_plain_block(BlockType::TableRow)?;
        for cell in caps[1].split("||") {
            let cell = cell.trim();
            let (block_type, text) = match cell
                .strip_prefix('=')
                .and_then(|rest| rest.strip_suffix('='))
            {
                Some(header) => (BlockType::TableHeader, header.trim()),
                None => (BlockType::TableCell, cell),
            };
            cx.begin_plain_block(block_type)?;
            cx.emit_markup(text)?;
            cx.end_block()?;
        }
        cx.end_block()
    }
}

impl Block for TableBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        cx.begin_plain_block(BlockType::Table)?;
        self.row(cx, line)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if !TABLE_ROW.is_match(line) {
            return Ok(LineStep::Rejected);
        }
        self.row(cx, line)?;
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        cx.end_block()
    }
}

struct ListItem<'t> {
    indent: usize,
    ordered: bool,
    number: Option<u64>,
    text: &'t str,
    /// Column where the item text starts.
    text_column: usize,
}

fn list_item(line: &str) -> Option<ListItem<'_>> {
    let caps = LIST_ITEM.captures(line)?;
    let text = caps.get(4)?;
    Some(ListItem {
        indent: indentation(&caps[1]),
        ordered: caps.get(3).is_some(),
        number: caps.get(3).and_then(|n| n.as_str().parse().ok()),
        text: text.as_str().trim_end(),
        text_column: indentation(&line[..text.start()]).max(text.start()),
    })
}

#[derive(Debug)]
struct ListLevel {
    indent: usize,
    ordered: bool,
    text_column: usize,
}

/// Bulleted and numbered lists. Deeper indentation nests a list inside the current item.
#[derive(Debug, Default)]
pub(crate) struct ListBlock {
    levels: Vec<ListLevel>,
}

impl ListBlock {
    fn open_list(&mut self, cx: &mut BlockContext<'_>, item: &ListItem<'_>) -> Result<(), BuilderError> {
        let mut attributes = Attributes::new();
        if let Some(number) = item.number.filter(|n| *n != 1) {
            attributes.start = Some(number.to_string());
        }
        cx.begin_block(BlockType::list(item.ordered), &attributes)?;
        self.levels.push(ListLevel {
            indent: item.indent,
            ordered: item.ordered,
            text_column: item.text_column,
        });
        self.open_item(cx, item)
    }

    fn open_item(&mut self, cx: &mut BlockContext<'_>, item: &ListItem<'_>) -> Result<(), BuilderError> {
        if let Some(level) = self.levels.last_mut() {
            level.text_column = item.text_column;
        }
        cx.begin_plain_block(BlockType::ListItem)?;
        cx.emit_markup(item.text)
    }

    /// End the innermost item and its list.
    fn close_level(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        self.levels.pop();
        cx.end_block()?;
        cx.end_block()
    }

    fn item(&mut self, cx: &mut BlockContext<'_>, item: &ListItem<'_>) -> Result<LineStep, BuilderError> {
        while self.levels.len() > 1
            && self.levels.last().is_some_and(|level| level.indent > item.indent)
        {
            self.close_level(cx)?;
        }
        let Some(top) = self.levels.last() else {
            return Ok(LineStep::Rejected);
        };
        if item.indent > top.indent {
            self.open_list(cx, item)?;
        } else if item.ordered == top.ordered {
            cx.end_block()?;
            self.open_item(cx, item)?;
        } else if self.levels.len() == 1 {
            return Ok(LineStep::Rejected);
        } else {
            self.close_level(cx)?;
            self.open_list(cx, item)?;
        }
        Ok(LineStep::Continue)
    }
}

impl Block for ListBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let Some(item) = list_item(line) else {
            return Ok(LineStep::Finished);
        };
        self.open_list(cx, &item)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if is_blank(line) {
            return Ok(LineStep::Rejected);
        }
        if let Some(item) = list_item(line) {
            return self.item(cx, &item);
        }
        let indent = indentation(line);
        let within_item = self
            .levels
            .last()
            .is_some_and(|level| indent >= 1 && indent <= level.text_column);
        if !within_item {
            return Ok(LineStep::Rejected);
        }
        cx.characters(" ")?;
        cx.emit_markup(line.trim())?;
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        while !self.levels.is_empty() {
            self.close_level(cx)?;
        }
        Ok(())
    }
}

fn definition(line: &str) -> Option<(&str, &str)> {
    let caps = DEFINITION.captures(line)?;
    let term = caps.get(1)?.as_str().trim();
    if term.is_empty() {
        return None;
    }
    let text = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((term, text))
}

/// ` term:: definition` pairs. Indented lines continue the current definition.
#[derive(Debug, Default)]
pub(crate) struct DefinitionListBlock {
    started: bool,
    has_text: bool,
}

impl DefinitionListBlock {
    fn entry(&mut self, cx: &mut BlockContext<'_>, term: &str, text: &str) -> Result<(), BuilderError> {
        cx.begin_plain_block(BlockType::DefinitionTerm)?;
        cx.emit_markup(term)?;
        cx.end_block()?;
        cx.begin_plain_block(BlockType::DefinitionItem)?;
        self.has_text = !text.is_empty();
        cx.emit_markup(text)
    }
}

impl Block for DefinitionListBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let Some((term, text)) = definition(line) else {
            return Ok(LineStep::Finished);
        };
        cx.begin_plain_block(BlockType::DefinitionList)?;
        self.started = true;
        self.entry(cx, term, text)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if line.is_empty() || !line.starts_with(char::is_whitespace) {
            return Ok(LineStep::Rejected);
        }
        if let Some((term, text)) = definition(line) {
            cx.end_block()?;
            self.entry(cx, term, text)?;
            return Ok(LineStep::Continue);
        }
        if list_item(line).is_some() {
            return Ok(LineStep::Rejected);
        }
        let text = line.trim();
        if !text.is_empty() {
            if self.has_text {
                cx.characters(" ")?;
            }
            cx.emit_markup(text)?;
            self.has_text = true;
        }
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        if !self.started {
            return Ok(());
        }
        cx.end_block()?;
        cx.end_block()
    }
}

/// Quote depth and content of a quoted line: `>` markers, or any indentation for depth one.
fn quote_line(line: &str) -> Option<(usize, &str)> {
    if is_blank(line) {
        return None;
    }
    if line.starts_with('>') {
        let rest = line.trim_start_matches(|c: char| c == '>' || c == ' ');
        let depth = line[..line.len() - rest.len()].matches('>').count();
        return Some((depth, rest.trim()));
    }
    line.starts_with(char::is_whitespace)
        .then(|| (1, line.trim()))
}

/// Quoted paragraphs. Lines at the same depth are joined with line breaks.
#[derive(Debug, Default)]
pub(crate) struct QuoteBlock {
    depth: usize,
}

impl QuoteBlock {
    fn enter(&mut self, cx: &mut BlockContext<'_>, depth: usize, text: &str) -> Result<(), BuilderError> {
        if self.depth > 0 {
            cx.end_block()?;
        }
        while self.depth < depth {
            cx.begin_plain_block(BlockType::Quote)?;
            self.depth += 1;
        }
        while self.depth > depth {
            cx.end_block()?;
            self.depth -= 1;
        }
        cx.begin_plain_block(BlockType::Paragraph)?;
        cx.emit_markup(text)
    }
}

impl Block for QuoteBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let Some((depth, text)) = quote_line(line) else {
            return Ok(LineStep::Finished);
        };
        self.enter(cx, depth, text)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        match quote_line(line) {
            None => Ok(LineStep::Rejected),
            Some((depth, text)) if depth == self.depth => {
                cx.line_break()?;
                cx.emit_markup(text)?;
                Ok(LineStep::Continue)
            }
            Some((depth, text)) => {
                self.enter(cx, depth, text)?;
                Ok(LineStep::Continue)
            }
        }
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        if self.depth > 0 {
            cx.end_block()?;
        }
        while self.depth > 0 {
            cx.end_block()?;
            self.depth -= 1;
        }
        Ok(())
    }
}

/// Consecutive text lines, joined with newlines.
#[derive(Debug)]
pub(crate) struct ParagraphBlock;

impl Block for ParagraphBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        cx.begin_plain_block(BlockType::Paragraph)?;
        cx.emit_markup(line)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if is_blank(line) || cx.can_interrupt_paragraph(line) {
            return Ok(LineStep::Rejected);
        }
        cx.characters("\n")?;
        cx.emit_markup(line)?;
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        cx.end_block()
    }
}
