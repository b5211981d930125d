//! Event recording builder
//!
//! Records the call sequence as a list of [`Event`]s. Tests assert on the recorded stream, and
//! the CLI prints it (one event per line, or as JSON) for inspecting how a document was parsed.

use crate::attributes::Attributes;
use crate::builder::{BlockType, DocumentBuilder, SpanType};
use crate::error::BuilderError;
use serde::Serialize;
use std::fmt;

/// A single builder call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    BeginDocument,
    EndDocument,
    BeginBlock {
        block_type: BlockType,
        attributes: Attributes,
    },
    EndBlock,
    BeginSpan {
        span_type: SpanType,
        attributes: Attributes,
    },
    EndSpan,
    Characters {
        text: String,
    },
    EntityReference {
        name: String,
    },
    Image {
        url: String,
        attributes: Attributes,
    },
    LineBreak,
    HorizontalRule,
    Acronym {
        text: String,
        definition: String,
    },
}

impl Event {
    pub fn begin_block(block_type: BlockType) -> Self {
        Event::BeginBlock {
            block_type,
            attributes: Attributes::default(),
        }
    }

    pub fn begin_span(span_type: SpanType) -> Self {
        Event::BeginSpan {
            span_type,
            attributes: Attributes::default(),
        }
    }

    pub fn characters(text: impl Into<String>) -> Self {
        Event::Characters { text: text.into() }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::BeginDocument => write!(f, "begin_document()"),
            Event::EndDocument => write!(f, "end_document()"),
            Event::BeginBlock {
                block_type,
                attributes,
            } => {
                write!(f, "begin_block({block_type:?}")?;
                write_attributes(f, attributes)?;
                write!(f, ")")
            }
            Event::EndBlock => write!(f, "end_block()"),
            Event::BeginSpan {
                span_type,
                attributes,
            } => {
                write!(f, "begin_span({span_type:?}")?;
                write_attributes(f, attributes)?;
                write!(f, ")")
            }
            Event::EndSpan => write!(f, "end_span()"),
            Event::Characters { text } => write!(f, "characters({text:?})"),
            Event::EntityReference { name } => write!(f, "entity_reference({name})"),
            Event::Image { url, attributes } => {
                write!(f, "image({url:?}")?;
                write_attributes(f, attributes)?;
                write!(f, ")")
            }
            Event::LineBreak => write!(f, "line_break()"),
            Event::HorizontalRule => write!(f, "horizontal_rule()"),
            Event::Acronym { text, definition } => {
                write!(f, "acronym({text:?}, {definition:?})")
            }
        }
    }
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attributes: &Attributes) -> fmt::Result {
    for (name, value) in attributes.entries() {
        write!(f, ", {name}={value:?}")?;
    }
    Ok(())
}

/// Builder that keeps every event in order.
///
/// Consecutive `characters` calls are merged into a single event and empty text is dropped, so
/// the recorded stream does not depend on how a recognizer happened to split literal text.
#[derive(Debug, Default, Clone)]
pub struct RecordingDocumentBuilder {
    events: Vec<Event>,
}

impl RecordingDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// First span event of the given type, if any.
    pub fn find_span(&self, span_type: SpanType) -> Option<&Event> {
        self.events.iter().find(|event| {
            matches!(event, Event::BeginSpan { span_type: found, .. } if *found == span_type)
        })
    }

    /// First block event of the given type, if any.
    pub fn find_block(&self, block_type: BlockType) -> Option<&Event> {
        self.events.iter().find(|event| {
            matches!(event, Event::BeginBlock { block_type: found, .. } if *found == block_type)
        })
    }

    /// Whether every begin has a matching end, in strict nesting order.
    pub fn is_balanced(&self) -> bool {
        #[derive(PartialEq)]
        enum Open {
            Document,
            Block,
            Span,
        }
        let mut stack = Vec::new();
        for event in &self.events {
            let closing = match event {
                Event::BeginDocument => {
                    stack.push(Open::Document);
                    continue;
                }
                Event::BeginBlock { .. } => {
                    stack.push(Open::Block);
                    continue;
                }
                Event::BeginSpan { .. } => {
                    stack.push(Open::Span);
                    continue;
                }
                Event::EndDocument => Open::Document,
                Event::EndBlock => Open::Block,
                Event::EndSpan => Open::Span,
                _ => continue,
            };
            if stack.pop() != Some(closing) {
                return false;
            }
        }
        stack.is_empty()
    }

    /// One event per line.
    pub fn render(&self) -> String {
        self.events
            .iter()
            .map(|event| format!("{event}\n"))
            .collect()
    }

    fn push(&mut self, event: Event) -> Result<(), BuilderError> {
        self.events.push(event);
        Ok(())
    }
}

impl DocumentBuilder for RecordingDocumentBuilder {
    fn begin_document(&mut self) -> Result<(), BuilderError> {
        self.push(Event::BeginDocument)
    }

    fn end_document(&mut self) -> Result<(), BuilderError> {
        self.push(Event::EndDocument)
    }

    fn begin_block(
        &mut self,
        block_type: BlockType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        self.push(Event::BeginBlock {
            block_type,
            attributes: attributes.clone(),
        })
    }

    fn end_block(&mut self) -> Result<(), BuilderError> {
        self.push(Event::EndBlock)
    }

    fn begin_span(
        &mut self,
        span_type: SpanType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        self.push(Event::BeginSpan {
            span_type,
            attributes: attributes.clone(),
        })
    }

    fn end_span(&mut self) -> Result<(), BuilderError> {
        self.push(Event::EndSpan)
    }

    fn characters(&mut self, text: &str) -> Result<(), BuilderError> {
        if text.is_empty() {
            return Ok(());
        }
        if let Some(Event::Characters { text: last }) = self.events.last_mut() {
            last.push_str(text);
            return Ok(());
        }
        self.push(Event::characters(text))
    }

    fn entity_reference(&mut self, name: &str) -> Result<(), BuilderError> {
        self.push(Event::EntityReference {
            name: name.to_string(),
        })
    }

    fn image(&mut self, attributes: &Attributes, url: &str) -> Result<(), BuilderError> {
        self.push(Event::Image {
            url: url.to_string(),
            attributes: attributes.clone(),
        })
    }

    fn line_break(&mut self) -> Result<(), BuilderError> {
        self.push(Event::LineBreak)
    }

    fn horizontal_rule(&mut self) -> Result<(), BuilderError> {
        self.push(Event::HorizontalRule)
    }

    fn acronym(&mut self, text: &str, definition: &str) -> Result<(), BuilderError> {
        self.push(Event::Acronym {
            text: text.to_string(),
            definition: definition.to_string(),
        })
    }
}
