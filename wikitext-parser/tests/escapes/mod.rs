//! Escapes across every inline construct of both dialects: an escaped construct shows up as
//! its own literal text, and escaping that text again gives the same result.

use crate::common::{events, trac_with_server};
use pretty_assertions::assert_eq;
use wikitext_parser::dialects::markdown;
use wikitext_parser::{Event, MarkupLanguage};

/// Each dialect with its escape marker and one complete construct per opening token.
fn constructs() -> Vec<(MarkupLanguage, char, Vec<&'static str>)> {
    vec![
        (
            trac_with_server(),
            '!',
            vec![
                "'''x'''", "''x''", "~~x~~", "__x__", "^x^", ",,x,,", "{{{x}}}", "[[BR]]", "#1",
                "r1",
            ],
        ),
        (
            markdown::language(),
            '\\',
            vec!["*x*", "**x**", "_x_", "`x`", "[x](http://example.com)"],
        ),
    ]
}

fn is_inline_markup(event: &Event) -> bool {
    matches!(
        event,
        Event::BeginSpan { .. }
            | Event::LineBreak
            | Event::Image { .. }
            | Event::EntityReference { .. }
    )
}

fn visible_text(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Characters { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_every_opening_token_can_be_escaped() {
    for (language, marker, sources) in constructs() {
        for source in sources {
            assert!(
                events(&language, source).iter().any(is_inline_markup),
                "{source:?} is not recognized by {}",
                language.name()
            );

            let escaped = events(&language, &format!("{marker}{source}"));
            assert!(
                !escaped.iter().any(is_inline_markup),
                "escaped {source:?} still produced markup in {}: {escaped:?}",
                language.name()
            );
            let text = visible_text(&escaped);
            assert_eq!(text, source);

            let again = events(&language, &format!("{marker}{text}"));
            assert_eq!(visible_text(&again), source);
            assert_eq!(again, escaped);
        }
    }
}
