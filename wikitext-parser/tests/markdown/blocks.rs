use crate::common::{events, markdown_html, rendered_events};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use wikitext_parser::dialects::markdown;
use wikitext_parser::{BlockType, Event};

#[test]
fn test_paragraphs() {
    assert_eq!(markdown_html("a\nb\n\nc"), "<p>a\nb</p><p>c</p>");
    assert_eq!(markdown_html("   indented start"), "<p>indented start</p>");
}

#[test]
fn test_atx_headings() {
    assert_eq!(markdown_html("# Title\n\nText"), "<h1>Title</h1><p>Text</p>");
    assert_eq!(markdown_html("## Title ##"), "<h2>Title</h2>");
    assert_eq!(markdown_html("###### Six"), "<h6>Six</h6>");
    assert_eq!(markdown_html("####### Seven"), "<p>####### Seven</p>");
}

#[test]
fn test_heading_interrupts_paragraph() {
    assert_eq!(
        markdown_html("text\n# Title"),
        "<p>text</p><h1>Title</h1>"
    );
}

#[test]
fn test_setext_headings() {
    assert_eq!(
        markdown_html("Title\n=====\n\nSub\n---"),
        "<h1>Title</h1><h2>Sub</h2>"
    );
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(markdown_html("***"), "<hr>");
    assert_eq!(markdown_html("a\n\n- - -\n\nb"), "<p>a</p><hr><p>b</p>");
}

#[test]
fn test_fenced_code() {
    assert_eq!(
        markdown_html("```rust\nfn main() {}\n```"),
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
    );
    assert_eq!(
        markdown_html("~~~\n*not emphasis*\n~~~\nafter"),
        "<pre><code>*not emphasis*\n</code></pre><p>after</p>"
    );
}

#[test]
fn test_fenced_code_keeps_definition_lines() {
    assert_eq!(
        markdown_html("```\n[id]: /kept\n```"),
        "<pre><code>[id]: /kept\n</code></pre>"
    );
}

#[test]
fn test_indented_code() {
    assert_eq!(
        markdown_html("    let x = 1;\n\n    x\n\n"),
        "<pre><code>let x = 1;\n\nx\n</code></pre>"
    );
}

#[test]
fn test_indented_line_does_not_interrupt_paragraph() {
    assert_eq!(markdown_html("text\n    more"), "<p>text\nmore</p>");
}

#[test]
fn test_quote() {
    assert_eq!(
        markdown_html("> quoted *text*\n> more\n\npara"),
        "<blockquote><p>quoted <em>text</em>\nmore</p></blockquote><p>para</p>"
    );
}

#[test]
fn test_quote_lazy_continuation() {
    assert_eq!(
        markdown_html("> a\nb"),
        "<blockquote><p>a\nb</p></blockquote>"
    );
}

#[test]
fn test_quote_contains_blocks() {
    assert_eq!(
        markdown_html("> # H\n> - item"),
        "<blockquote><h1>H</h1><ul><li>item</li></ul></blockquote>"
    );
    assert_eq!(
        markdown_html("> > deep"),
        "<blockquote><blockquote><p>deep</p></blockquote></blockquote>"
    );
}

#[test]
fn test_deeply_nested_quotes_stay_balanced() {
    let source = ">".repeat(100) + " bottom";
    let events = events(&markdown::language(), &source);
    assert!(events.contains(&Event::begin_block(BlockType::Quote)));
}

#[test]
fn test_lists() {
    assert_eq!(markdown_html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    assert_eq!(markdown_html("* a\n+ b"), "<ul><li>a</li><li>b</li></ul>");
    assert_eq!(markdown_html("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    assert_eq!(
        markdown_html("3. c\n4. d"),
        "<ol start=\"3\"><li>c</li><li>d</li></ol>"
    );
}

#[test]
fn test_nested_list() {
    assert_eq!(
        markdown_html("- a\n  - b\n- c"),
        "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
    );
}

#[test]
fn test_list_continuation() {
    assert_eq!(
        markdown_html("- a\ncontinued"),
        "<ul><li>a\ncontinued</li></ul>"
    );
    assert_eq!(
        markdown_html("- a\n\nparagraph"),
        "<ul><li>a</li></ul><p>paragraph</p>"
    );
}

#[test]
fn test_list_survives_blank_line_between_items() {
    assert_eq!(
        markdown_html("- a\n\n- b"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_numbers_inside_paragraph_are_text() {
    assert_eq!(
        markdown_html("text\n1999. was a year"),
        "<p>text\n1999. was a year</p>"
    );
}

#[test]
fn test_event_stream_for_quote() {
    assert_snapshot!(rendered_events(&markdown::language(), "> a *b*\n\n---"), @r###"
    begin_document()
    begin_block(Quote)
    begin_block(Paragraph)
    characters("a ")
    begin_span(Emphasis)
    characters("b")
    end_span()
    end_block()
    end_block()
    horizontal_rule()
    end_document()
    "###);
}
