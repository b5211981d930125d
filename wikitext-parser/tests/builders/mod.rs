//! Builder behavior driven through the parser: HTML options, error propagation and the
//! structural guarantees every builder relies on.

use crate::common::events;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use wikitext_parser::dialects::{markdown, tracwiki};
use wikitext_parser::{
    Attributes, BlockType, BuilderError, DialectRegistry, DocumentBuilder, Event,
    HtmlDocumentBuilder, HtmlOptions, MarkupParser, NoOpDocumentBuilder,
    RecordingDocumentBuilder, SpanType, WikitextError,
};

/// Records like the recording builder, but refuses text once `limit` events were seen.
struct FailingBuilder {
    inner: RecordingDocumentBuilder,
    limit: usize,
}

impl FailingBuilder {
    fn check(&self) -> Result<(), BuilderError> {
        if self.inner.events().len() >= self.limit {
            return Err(BuilderError::Custom("sink full".to_string()));
        }
        Ok(())
    }
}

impl DocumentBuilder for FailingBuilder {
    fn begin_document(&mut self) -> Result<(), BuilderError> {
        self.inner.begin_document()
    }

    fn end_document(&mut self) -> Result<(), BuilderError> {
        self.inner.end_document()
    }

    fn begin_block(
        &mut self,
        block_type: BlockType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        self.inner.begin_block(block_type, attributes)
    }

    fn end_block(&mut self) -> Result<(), BuilderError> {
        self.inner.end_block()
    }

    fn begin_span(
        &mut self,
        span_type: SpanType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        self.inner.begin_span(span_type, attributes)
    }

    fn end_span(&mut self) -> Result<(), BuilderError> {
        self.inner.end_span()
    }

    fn characters(&mut self, text: &str) -> Result<(), BuilderError> {
        self.check()?;
        self.inner.characters(text)
    }

    fn entity_reference(&mut self, name: &str) -> Result<(), BuilderError> {
        self.inner.entity_reference(name)
    }

    fn image(&mut self, attributes: &Attributes, url: &str) -> Result<(), BuilderError> {
        self.inner.image(attributes, url)
    }

    fn line_break(&mut self) -> Result<(), BuilderError> {
        self.inner.line_break()
    }

    fn horizontal_rule(&mut self) -> Result<(), BuilderError> {
        self.inner.horizontal_rule()
    }

    fn acronym(&mut self, text: &str, definition: &str) -> Result<(), BuilderError> {
        self.inner.acronym(text, definition)
    }
}

#[test]
fn test_builder_error_aborts_the_parse() {
    let language = tracwiki::language();
    let mut builder = FailingBuilder {
        inner: RecordingDocumentBuilder::new(),
        limit: 2,
    };
    let result = MarkupParser::new(&language).parse("first\n\nsecond\n\nthird", &mut builder);

    assert!(matches!(result, Err(BuilderError::Custom(message)) if message == "sink full"));
    // nothing after the failing call was emitted
    assert!(!builder
        .inner
        .events()
        .contains(&Event::characters("second")));
}

#[test]
fn test_builder_error_surfaces_through_registry() {
    let registry = DialectRegistry::default();
    let mut builder = FailingBuilder {
        inner: RecordingDocumentBuilder::new(),
        limit: 0,
    };
    let result = registry.parse("text", "markdown", &mut builder);
    assert!(matches!(
        result,
        Err(WikitextError::Build(BuilderError::Custom(_)))
    ));
}

#[test]
fn test_noop_builder_accepts_everything() {
    let language = markdown::language();
    let mut builder = NoOpDocumentBuilder;
    MarkupParser::new(&language)
        .parse("# T\n\n> q\n\n- a\n\n```\nx\n```", &mut builder)
        .unwrap();
}

#[test]
fn test_fragment_parse_has_no_document_events() {
    let language = tracwiki::language();
    let mut builder = RecordingDocumentBuilder::new();
    MarkupParser::new(&language)
        .parse_fragment("text", &mut builder)
        .unwrap();
    assert_eq!(
        builder.into_events(),
        vec![
            Event::begin_block(BlockType::Paragraph),
            Event::characters("text"),
            Event::EndBlock,
        ]
    );
}

#[test]
fn test_html_document_mode() {
    let language = tracwiki::language();
    let mut builder =
        HtmlDocumentBuilder::new(HtmlOptions::document().with_title("Notes & more"));
    MarkupParser::new(&language).parse("x", &mut builder).unwrap();
    let html = builder.into_html();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Notes &amp; more</title>"));
    assert!(html.contains("<body>\n<p>x</p>\n</body>"));
}

#[test]
fn test_unsupported_blocks_are_flattened() {
    let language = tracwiki::language();
    let options = HtmlOptions::default().with_supported_blocks(vec![BlockType::Heading1]);
    let mut builder = HtmlDocumentBuilder::new(options);
    MarkupParser::new(&language)
        .parse("= T =\n\na\n\nb", &mut builder)
        .unwrap();
    assert_eq!(builder.into_html(), "<h1 id=\"T\">T</h1>a<br><br>b");
}

#[test]
fn test_events_serialize_as_tagged_json() {
    let events = events(&markdown::language(), "*x*");
    let value = serde_json::to_value(&events).unwrap();
    assert_eq!(
        value,
        json!([
            {"event": "begin_document"},
            {"event": "begin_block", "block_type": "Paragraph", "attributes": {}},
            {"event": "begin_span", "span_type": "Emphasis", "attributes": {}},
            {"event": "characters", "text": "x"},
            {"event": "end_span"},
            {"event": "end_block"},
            {"event": "end_document"},
        ])
    );
}

#[test]
fn test_recorded_characters_are_merged() {
    let events = events(&tracwiki::language(), "a !WikiWord b");
    assert!(events.contains(&Event::characters("a WikiWord b")));
}

proptest! {
    #[test]
    fn trac_streams_are_balanced(source in "(?s)[ -~\n\t]{0,200}") {
        let mut builder = RecordingDocumentBuilder::new();
        MarkupParser::new(&tracwiki::language()).parse(&source, &mut builder).unwrap();
        prop_assert!(builder.is_balanced());
    }

    #[test]
    fn markdown_streams_are_balanced(source in "(?s)[ -~\n\t]{0,200}") {
        let mut builder = RecordingDocumentBuilder::new();
        MarkupParser::new(&markdown::language()).parse(&source, &mut builder).unwrap();
        prop_assert!(builder.is_balanced());
    }

    #[test]
    fn unicode_input_never_panics(source in "\\PC{0,120}") {
        for language in [tracwiki::language(), markdown::language()] {
            let mut builder = RecordingDocumentBuilder::new();
            MarkupParser::new(&language).parse(&source, &mut builder).unwrap();
            prop_assert!(builder.is_balanced());
        }
    }

    #[test]
    fn html_output_is_produced_for_any_input(source in "(?s)[ -~\n]{0,120}") {
        let html = MarkupParser::new(&tracwiki::language()).parse_to_html(&source);
        prop_assert!(html.is_ok());
    }
}
