//! Shared helpers for parsing test input.

use wikitext_parser::dialects::{markdown, tracwiki};
use wikitext_parser::{
    Event, LanguageConfiguration, MarkupLanguage, MarkupParser, RecordingDocumentBuilder,
};

pub const TRAC_SERVER: &str = "http://trac.edgewall.org";

/// TracWiki with a server URL, so Trac links resolve.
pub fn trac_with_server() -> MarkupLanguage {
    tracwiki::language()
        .configured(&LanguageConfiguration {
            server_url: Some(TRAC_SERVER.to_string()),
            ..Default::default()
        })
        .expect("valid server url")
}

/// TracWiki with an internal link pattern.
pub fn trac_with_pattern(pattern: &str) -> MarkupLanguage {
    tracwiki::language()
        .configured(&LanguageConfiguration {
            internal_link_pattern: Some(pattern.to_string()),
            ..Default::default()
        })
        .expect("valid link pattern")
}

pub fn html(language: &MarkupLanguage, source: &str) -> String {
    MarkupParser::new(language)
        .parse_to_html(source)
        .expect("html builder never fails on a balanced stream")
}

pub fn trac_html(source: &str) -> String {
    html(&tracwiki::language(), source)
}

pub fn markdown_html(source: &str) -> String {
    html(&markdown::language(), source)
}

pub fn events(language: &MarkupLanguage, source: &str) -> Vec<Event> {
    let mut builder = RecordingDocumentBuilder::new();
    MarkupParser::new(language)
        .parse(source, &mut builder)
        .expect("recording builder never fails");
    assert!(builder.is_balanced(), "unbalanced stream for {source:?}");
    builder.into_events()
}

/// The recorded stream, one event per line.
pub fn rendered_events(language: &MarkupLanguage, source: &str) -> String {
    let mut builder = RecordingDocumentBuilder::new();
    MarkupParser::new(language)
        .parse(source, &mut builder)
        .expect("recording builder never fails");
    builder.render()
}
