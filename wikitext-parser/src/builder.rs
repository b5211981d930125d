//! Document builder contract
//!
//! The parser never produces output itself: it drives a [`DocumentBuilder`] through an ordered,
//! balanced sequence of calls. Every `begin_*` call is matched by exactly one `end_*` call, and
//! nesting is strict (a span opened inside a block is closed before the block).

use crate::attributes::Attributes;
use crate::error::BuilderError;
use serde::Serialize;

/// Structural block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    BulletedList,
    NumericList,
    ListItem,
    Table,
    TableRow,
    TableCell,
    TableHeader,
    Quote,
    /// Verbatim text without code semantics.
    Preformatted,
    /// Verbatim code, optionally tagged with a language.
    Code,
    DefinitionList,
    DefinitionTerm,
    DefinitionItem,
    Footnote,
    /// Generic container for constructs a dialect passes through.
    Block,
}

impl BlockType {
    /// Heading type for `level`, clamped to 1..=6.
    pub fn heading(level: usize) -> Self {
        match level.clamp(1, 6) {
            1 => BlockType::Heading1,
            2 => BlockType::Heading2,
            3 => BlockType::Heading3,
            4 => BlockType::Heading4,
            5 => BlockType::Heading5,
            _ => BlockType::Heading6,
        }
    }

    pub fn heading_level(self) -> Option<usize> {
        match self {
            BlockType::Heading1 => Some(1),
            BlockType::Heading2 => Some(2),
            BlockType::Heading3 => Some(3),
            BlockType::Heading4 => Some(4),
            BlockType::Heading5 => Some(5),
            BlockType::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn list(ordered: bool) -> Self {
        if ordered {
            BlockType::NumericList
        } else {
            BlockType::BulletedList
        }
    }
}

/// Inline span kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpanType {
    Bold,
    Italic,
    BoldItalic,
    Strong,
    Emphasis,
    Code,
    /// Teletype text.
    Monospace,
    Deleted,
    Underlined,
    Superscript,
    Subscript,
    Link,
    Mark,
    Span,
}

/// Consumer of the structural event stream produced by the parser.
///
/// Errors returned by any method abort the parse and are handed back to the caller as-is.
pub trait DocumentBuilder {
    fn begin_document(&mut self) -> Result<(), BuilderError>;

    fn end_document(&mut self) -> Result<(), BuilderError>;

    fn begin_block(
        &mut self,
        block_type: BlockType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError>;

    fn end_block(&mut self) -> Result<(), BuilderError>;

    fn begin_span(&mut self, span_type: SpanType, attributes: &Attributes)
        -> Result<(), BuilderError>;

    fn end_span(&mut self) -> Result<(), BuilderError>;

    /// Literal text. Builders escape it for their output format.
    fn characters(&mut self, text: &str) -> Result<(), BuilderError>;

    /// A named or numeric character entity, without the `&` and `;` delimiters.
    fn entity_reference(&mut self, name: &str) -> Result<(), BuilderError>;

    fn image(&mut self, attributes: &Attributes, url: &str) -> Result<(), BuilderError>;

    fn line_break(&mut self) -> Result<(), BuilderError>;

    fn horizontal_rule(&mut self) -> Result<(), BuilderError>;

    fn acronym(&mut self, text: &str, definition: &str) -> Result<(), BuilderError>;
}
