use crate::attributes::Attributes;
use crate::builder::{BlockType, DocumentBuilder, SpanType};
use crate::error::BuilderError;

/// Builder that discards every event. Useful for validating input or timing the parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDocumentBuilder;

impl DocumentBuilder for NoOpDocumentBuilder {
    fn begin_document(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn begin_block(&mut self, _: BlockType, _: &Attributes) -> Result<(), BuilderError> {
        Ok(())
    }

    fn end_block(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn begin_span(&mut self, _: SpanType, _: &Attributes) -> Result<(), BuilderError> {
        Ok(())
    }

    fn end_span(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn characters(&mut self, _: &str) -> Result<(), BuilderError> {
        Ok(())
    }

    fn entity_reference(&mut self, _: &str) -> Result<(), BuilderError> {
        Ok(())
    }

    fn image(&mut self, _: &Attributes, _: &str) -> Result<(), BuilderError> {
        Ok(())
    }

    fn line_break(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn horizontal_rule(&mut self) -> Result<(), BuilderError> {
        Ok(())
    }

    fn acronym(&mut self, _: &str, _: &str) -> Result<(), BuilderError> {
        Ok(())
    }
}
