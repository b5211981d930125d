use crate::common::{events, trac_html};
use pretty_assertions::assert_eq;
use wikitext_parser::dialects::tracwiki;
use wikitext_parser::{Event, SpanType};

#[test]
fn test_bold() {
    assert_eq!(trac_html("'''bold text'''"), "<p><b>bold text</b></p>");
}

#[test]
fn test_bold_escaped() {
    assert_eq!(
        trac_html("'''!'''bold text'''"),
        "<p><b>'''bold text</b></p>"
    );
}

#[test]
fn test_italic() {
    assert_eq!(trac_html("''italic text''"), "<p><i>italic text</i></p>");
}

#[test]
fn test_bold_italic() {
    assert_eq!(
        trac_html("'''''bold italic'''''"),
        "<p><b><i>bold italic</i></b></p>"
    );
}

#[test]
fn test_nested_markup() {
    assert_eq!(
        trac_html("'''bold ''italic'' text'''"),
        "<p><b>bold <i>italic</i> text</b></p>"
    );
}

#[test]
fn test_deleted() {
    assert_eq!(trac_html("~~deleted~~"), "<p><del>deleted</del></p>");
    assert_eq!(trac_html("a ~~ b"), "<p>a ~~ b</p>");
}

#[test]
fn test_underlined() {
    assert_eq!(trac_html("__underlined__"), "<p><u>underlined</u></p>");
}

#[test]
fn test_superscript_and_subscript() {
    assert_eq!(trac_html("x^2^"), "<p>x<sup>2</sup></p>");
    assert_eq!(trac_html("H,,2,,O"), "<p>H<sub>2</sub>O</p>");
}

#[test]
fn test_monospace() {
    assert_eq!(trac_html("{{{mono}}}"), "<p><tt>mono</tt></p>");
    assert_eq!(trac_html("`mono`"), "<p><tt>mono</tt></p>");
}

#[test]
fn test_monospace_content_is_literal() {
    assert_eq!(
        trac_html("{{{'''not bold'''}}}"),
        "<p><tt>'''not bold'''</tt></p>"
    );
    assert_eq!(trac_html("`~~x~~`"), "<p><tt>~~x~~</tt></p>");
}

#[test]
fn test_unclosed_markup_is_text() {
    assert_eq!(trac_html("'''never closed"), "<p>'''never closed</p>");
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(trac_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
}

#[test]
fn test_spans_in_headings_and_cells() {
    let events = events(&tracwiki::language(), "||'''x'''||");
    assert!(events.contains(&Event::begin_span(SpanType::Bold)));
    assert!(events.contains(&Event::characters("x")));
}
