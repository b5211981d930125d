//! Markdown block rules

use crate::attributes::Attributes;
use crate::builder::BlockType;
use crate::error::BuilderError;
use crate::markup::block::{indentation, is_blank, Block, BlockContext, LineStep};
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})(`{3,}|~{3,})[ \t]*([^`\s]*)[^`]*$").unwrap());
static ATX_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").unwrap());
static SETEXT_1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}=+[ \t]*$").unwrap());
static SETEXT_2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}-+[ \t]*$").unwrap());
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)([*+-]|(\d{1,9})[.)])(?:[ \t]+(.*))?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkdownBlockRule {
    FencedCode,
    Heading,
    HorizontalRule,
    Quote,
    List,
    IndentedCode,
    Paragraph,
}

impl MarkdownBlockRule {
    pub(crate) fn start(self, line: &str) -> Option<MarkdownBlock> {
        let block = match self {
            MarkdownBlockRule::FencedCode => MarkdownBlock::FencedCode(FencedCodeBlock::start(line)?),
            MarkdownBlockRule::Heading if ATX_HEADING.is_match(line) => {
                MarkdownBlock::Heading(HeadingBlock)
            }
            MarkdownBlockRule::HorizontalRule if is_thematic_break(line) => {
                MarkdownBlock::HorizontalRule(HorizontalRuleBlock)
            }
            MarkdownBlockRule::Quote if strip_quote(line).is_some() => {
                MarkdownBlock::Quote(QuoteBlock::default())
            }
            MarkdownBlockRule::List => match list_item(line) {
                Some(item) if item.indent <= 3 => MarkdownBlock::List(ListBlock::default()),
                _ => return None,
            },
            MarkdownBlockRule::IndentedCode if strip_code_indent(line).is_some() && !is_blank(line) => {
                MarkdownBlock::IndentedCode(IndentedCodeBlock::default())
            }
            MarkdownBlockRule::Paragraph if !is_blank(line) => {
                MarkdownBlock::Paragraph(ParagraphBlock::default())
            }
            _ => return None,
        };
        Some(block)
    }

    pub(crate) fn interrupts_paragraph(self, line: &str) -> bool {
        match self {
            MarkdownBlockRule::IndentedCode | MarkdownBlockRule::Paragraph => false,
            // only lists that start at one, and have text, end a paragraph
            MarkdownBlockRule::List => list_item(line).is_some_and(|item| {
                item.indent <= 3 && !item.text.is_empty() && item.number.map_or(true, |n| n == 1)
            }),
            rule => rule.start(line).is_some(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum MarkdownBlock {
    FencedCode(FencedCodeBlock),
    Heading(HeadingBlock),
    HorizontalRule(HorizontalRuleBlock),
    Quote(QuoteBlock),
    List(ListBlock),
    IndentedCode(IndentedCodeBlock),
    Paragraph(ParagraphBlock),
}

impl MarkdownBlock {
    fn inner(&mut self) -> &mut dyn Block {
        match self {
            MarkdownBlock::FencedCode(block) => block,
            MarkdownBlock::Heading(block) => block,
            MarkdownBlock::HorizontalRule(block) => block,
            MarkdownBlock::Quote(block) => block,
            MarkdownBlock::List(block) => block,
            MarkdownBlock::IndentedCode(block) => block,
            MarkdownBlock::Paragraph(block) => block,
        }
    }
}

impl Block for MarkdownBlock {
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
        matches!(
            self,
            MarkdownBlock::FencedCode(_) | MarkdownBlock::IndentedCode(_)
        )
    }
}

/// ```` ``` ```` or `~~~` fenced code, with an optional info string naming the language.
#[derive(Debug)]
pub(crate) struct FencedCodeBlock {
    fence: String,
    indent: usize,
}

impl FencedCodeBlock {
    fn start(line: &str) -> Option<Self> {
        let caps = FENCE_OPEN.captures(line)?;
        Some(Self {
            fence: caps[2].to_string(),
            indent: caps[1].len(),
        })
    }

    fn is_closing(&self, line: &str) -> bool {
        let trimmed = line.trim();
        indentation(line) <= 3
            && trimmed.starts_with(self.fence.as_str())
            && trimmed.chars().all(|c| Some(c) == self.fence.chars().next())
    }
}

impl Block for FencedCodeBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let language = FENCE_OPEN
            .captures(line)
            .and_then(|caps| caps.get(3))
            .map(|m| m.as_str())
            .filter(|language| !language.is_empty());
        let attributes = match language {
            Some(language) => Attributes::new().with_language(language),
            None => Attributes::new(),
        };
        cx.begin_block(BlockType::Code, &attributes)?;
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        cx: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if self.is_closing(line) {
            return Ok(LineStep::Finished);
        }
        let strip = indentation(line).min(self.indent);
        let content = line.get(strip..).unwrap_or(line);
        cx.characters(content)?;
        cx.characters("\n")?;
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        cx.end_block()
    }

    fn is_verbatim(&self) -> bool {
        true
    }
}

/// `# Heading` through `###### Heading`, with optional closing hashes.
#[derive(Debug)]
pub(crate) struct HeadingBlock;

impl Block for HeadingBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        let Some(caps) = ATX_HEADING.captures(line) else {
            return Ok(LineStep::Finished);
        };
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        cx.begin_plain_block(BlockType::heading(caps[1].len()))?;
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

/// Three or more `-`, `*` or `_`, optionally separated by spaces.
fn is_thematic_break(line: &str) -> bool {
    if indentation(line) > 3 {
        return false;
    }
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3
        && matches!(marks[0], '-' | '*' | '_')
        && marks.iter().all(|c| *c == marks[0])
}

#[derive(Debug)]
pub(crate) struct HorizontalRuleBlock;

impl Block for HorizontalRuleBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, _: &str) -> Result<LineStep, BuilderError> {
        cx.horizontal_rule()?;
        Ok(LineStep::Finished)
    }

    fn next_line(&mut self, _: &mut BlockContext<'_>, _: &str) -> Result<LineStep, BuilderError> {
        Ok(LineStep::Rejected)
    }

    fn close(&mut self, _: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        Ok(())
    }
}

fn strip_quote(line: &str) -> Option<&str> {
    if indentation(line) > 3 {
        return None;
    }
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// `>` quotes. The quoted lines are parsed as a nested document when the quote closes.
#[derive(Debug, Default)]
pub(crate) struct QuoteBlock {
    lines: Vec<String>,
}

impl Block for QuoteBlock {
    fn open(&mut self, cx: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        cx.begin_plain_block(BlockType::Quote)?;
        if let Some(content) = strip_quote(line) {
            self.lines.push(content.to_string());
        }
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
        if let Some(content) = strip_quote(line) {
            self.lines.push(content.to_string());
            return Ok(LineStep::Continue);
        }
        // lazy continuation of a quoted paragraph
        let continues_text = self.lines.last().is_some_and(|last| !is_blank(last));
        if continues_text && !cx.can_interrupt_paragraph(line) {
            self.lines.push(line.to_string());
            return Ok(LineStep::Continue);
        }
        Ok(LineStep::Rejected)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        let lines = std::mem::take(&mut self.lines);
        cx.parse_nested(&lines)?;
        cx.end_block()
    }
}

struct ListItem<'t> {
    indent: usize,
    ordered: bool,
    number: Option<u64>,
    text: &'t str,
    /// Column where the item text starts.
    content_column: usize,
}

fn list_item(line: &str) -> Option<ListItem<'_>> {
    let caps = LIST_ITEM.captures(line)?;
    let number = caps.get(3);
    let text = caps.get(4);
    let content_column = text.map_or(caps.get(2)?.end() + 1, |m| m.start());
    Some(ListItem {
        indent: caps[1].len(),
        ordered: number.is_some(),
        number: number.and_then(|n| n.as_str().parse().ok()),
        text: text.map_or("", |m| m.as_str().trim_end()),
        content_column,
    })
}

#[derive(Debug)]
struct ListLevel {
    indent: usize,
    ordered: bool,
    content_column: usize,
}

/// Bulleted and numbered lists. Items indented to the content of the current item nest.
#[derive(Debug, Default)]
pub(crate) struct ListBlock {
    levels: Vec<ListLevel>,
    /// A blank line was seen; the list continues only with an item or indented text.
    pending_blank: bool,
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
            content_column: item.content_column,
        });
        self.open_item(cx, item)
    }

    fn open_item(&mut self, cx: &mut BlockContext<'_>, item: &ListItem<'_>) -> Result<(), BuilderError> {
        if let Some(level) = self.levels.last_mut() {
            level.content_column = item.content_column;
        }
        cx.begin_plain_block(BlockType::ListItem)?;
        cx.emit_markup(item.text)
    }

    fn close_level(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        self.levels.pop();
        cx.end_block()?;
        cx.end_block()
    }

    fn item(&mut self, cx: &mut BlockContext<'_>, item: &ListItem<'_>) -> Result<LineStep, BuilderError> {
        while self.levels.len() > 1
            && self
                .levels
                .last()
                .is_some_and(|level| item.indent < level.indent)
        {
            self.close_level(cx)?;
        }
        let Some(top) = self.levels.last() else {
            return Ok(LineStep::Rejected);
        };
        if item.indent >= top.content_column.min(top.indent + 2) {
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
            self.pending_blank = true;
            return Ok(LineStep::Continue);
        }
        if is_thematic_break(line) {
            return Ok(LineStep::Rejected);
        }
        let after_blank = std::mem::take(&mut self.pending_blank);
        if let Some(item) = list_item(line) {
            return self.item(cx, &item);
        }
        let indent = indentation(line);
        let Some(top) = self.levels.last() else {
            return Ok(LineStep::Rejected);
        };
        let continues = if after_blank {
            indent >= top.content_column
        } else {
            indent > 0 || !cx.can_interrupt_paragraph(line)
        };
        if !continues {
            return Ok(LineStep::Rejected);
        }
        cx.characters("\n")?;
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

fn strip_code_indent(line: &str) -> Option<&str> {
    line.strip_prefix("    ").or_else(|| line.strip_prefix('\t'))
}

/// Code indented by four spaces or a tab. Trailing blank lines are not part of the block.
#[derive(Debug, Default)]
pub(crate) struct IndentedCodeBlock {
    lines: Vec<String>,
}

impl Block for IndentedCodeBlock {
    fn open(&mut self, _: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        self.lines
            .push(strip_code_indent(line).unwrap_or(line).to_string());
        Ok(LineStep::Continue)
    }

    fn next_line(
        &mut self,
        _: &mut BlockContext<'_>,
        line: &str,
    ) -> Result<LineStep, BuilderError> {
        if is_blank(line) {
            self.lines
                .push(strip_code_indent(line).unwrap_or_default().to_string());
            return Ok(LineStep::Continue);
        }
        match strip_code_indent(line) {
            Some(content) => {
                self.lines.push(content.to_string());
                Ok(LineStep::Continue)
            }
            None => Ok(LineStep::Rejected),
        }
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        while self.lines.last().is_some_and(|line| is_blank(line)) {
            self.lines.pop();
        }
        cx.begin_plain_block(BlockType::Code)?;
        for line in &self.lines {
            cx.characters(line)?;
            cx.characters("\n")?;
        }
        cx.end_block()
    }

    fn is_verbatim(&self) -> bool {
        true
    }
}

/// Text lines up to a blank line. A setext underline turns the paragraph into a heading.
#[derive(Debug, Default)]
pub(crate) struct ParagraphBlock {
    lines: Vec<String>,
    heading: Option<BlockType>,
}

impl Block for ParagraphBlock {
    fn open(&mut self, _: &mut BlockContext<'_>, line: &str) -> Result<LineStep, BuilderError> {
        self.lines.push(line.trim_start().to_string());
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
        if SETEXT_1.is_match(line) {
            self.heading = Some(BlockType::Heading1);
            return Ok(LineStep::Finished);
        }
        if SETEXT_2.is_match(line) {
            self.heading = Some(BlockType::Heading2);
            return Ok(LineStep::Finished);
        }
        if cx.can_interrupt_paragraph(line) {
            return Ok(LineStep::Rejected);
        }
        self.lines.push(line.trim_start().to_string());
        Ok(LineStep::Continue)
    }

    fn close(&mut self, cx: &mut BlockContext<'_>) -> Result<(), BuilderError> {
        let text = self.lines.join("\n");
        cx.begin_plain_block(self.heading.unwrap_or(BlockType::Paragraph))?;
        cx.emit_markup(text.trim_end())?;
        cx.end_block()
    }
}
