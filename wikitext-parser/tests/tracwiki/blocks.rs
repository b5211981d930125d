//! Block structure: paragraphs, headings, lists, definition lists, quotes, tables and
//! preformatted regions.

use crate::common::{events, rendered_events, trac_html};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use wikitext_parser::dialects::tracwiki;
use wikitext_parser::{BlockType, Event};

#[test]
fn test_paragraphs() {
    let html = trac_html("first para\nnew line\n\nsecond para\n\n\n\n");
    assert_eq!(html, "<p>first para\nnew line</p><p>second para</p>");
}

#[test]
fn test_headings_at_every_level() {
    for level in 1..=6 {
        let delimiter = "=".repeat(level);
        let rest = "\nfirst para\nfirst para line2\n\nsecond para\n\nthird para";
        let body = "<p>first para\nfirst para line2</p><p>second para</p><p>third para</p>";

        let html = trac_html(&format!("{delimiter}heading text{delimiter}{rest}"));
        assert_eq!(
            html,
            format!("<h{level} id=\"headingtext\">heading text</h{level}>{body}")
        );

        let html = trac_html(&format!(
            "{delimiter}heading text{delimiter} #with-id-{level}{rest}"
        ));
        assert_eq!(
            html,
            format!("<h{level} id=\"with-id-{level}\">heading text</h{level}>{body}")
        );

        let html = trac_html(&format!("{delimiter}heading text{delimiter}    {rest}"));
        assert_eq!(
            html,
            format!("<h{level} id=\"headingtext\">heading text</h{level}>{body}")
        );
    }
}

#[test]
fn test_heading_breaking_para() {
    let html = trac_html("=\n== heading ==\npara");
    assert_eq!(html, "<p>=</p><h2 id=\"heading\">heading</h2><p>para</p>");
}

#[test]
fn test_list_unordered() {
    let expected = "<ul><li>a list</li><li>with two lines</li></ul>";
    assert_eq!(trac_html(" * a list\n * with two lines"), expected);
    assert_eq!(trac_html("* a list\n* with two lines"), expected);
    assert_eq!(trac_html("   * a list\n   * with two lines"), expected);
    assert_eq!(trac_html(" - a list\n - with two lines"), expected);
}

#[test]
fn test_list_ordered() {
    let expected = "<ol><li>a list</li><li>with two lines</li></ol>";
    assert_eq!(trac_html(" 1. a list\n 2. with two lines"), expected);
    assert_eq!(trac_html("1. a list\n1. with two lines"), expected);
}

#[test]
fn test_list_ordered_start() {
    assert_eq!(
        trac_html(" 2. with two lines\n 3. three"),
        "<ol start=\"2\"><li>with two lines</li><li>three</li></ol>"
    );
}

#[test]
fn test_list_split_by_blank_line() {
    assert_eq!(
        trac_html(" 1. first\n\n 2. second"),
        "<ol><li>first</li></ol><ol start=\"2\"><li>second</li></ol>"
    );
}

#[test]
fn test_list_nested() {
    assert_eq!(
        trac_html("* Apples\n  * Sauce\n  * Juice\n* Oranges\n* Grapes"),
        "<ul><li>Apples<ul><li>Sauce</li><li>Juice</li></ul></li><li>Oranges</li><li>Grapes</li></ul>"
    );
    assert_eq!(
        trac_html(" 1. a list\n  * nested\n  * nested2\n 1. level1\n\npara"),
        "<ol><li>a list<ul><li>nested</li><li>nested2</li></ul></li><li>level1</li></ol><p>para</p>"
    );
    assert_eq!(
        trac_html(" 1. a\n  1. nested\n 1. level1"),
        "<ol><li>a<ol><li>nested</li></ol></li><li>level1</li></ol>"
    );
}

#[test]
fn test_list_kind_change_at_top_level() {
    assert_eq!(
        trac_html("   1. one\n   * two"),
        "<ol><li>one</li></ol><ul><li>two</li></ul>"
    );
}

#[test]
fn test_list_kind_change_when_nested() {
    assert_eq!(
        trac_html(" * a\n   1. one\n   - two"),
        "<ul><li>a<ol><li>one</li></ol><ul><li>two</li></ul></li></ul>"
    );
}

#[test]
fn test_list_continuation_lines() {
    assert_eq!(
        trac_html(" * an item\n   with 2 lines\n * other\n second line\n * ok?\nAnd a new paragraph"),
        "<ul><li>an item with 2 lines</li><li>other second line</li><li>ok?</li></ul><p>And a new paragraph</p>"
    );
    assert_eq!(
        trac_html("- an item\ncreate paragraph\n- try\n this\n again\n- it\n  is working\n- ok?"),
        "<ul><li>an item</li></ul><p>create paragraph</p><ul><li>try this again</li><li>it is working</li><li>ok?</li></ul>"
    );
    assert_eq!(
        trac_html("    1. item1\n       more\n       lines\n    1. item2"),
        "<ol><li>item1 more lines</li><li>item2</li></ol>"
    );
}

#[test]
fn test_list_overindented_continuation_becomes_quote() {
    assert_eq!(
        trac_html("1. item1\n    wrong: create a quote\n1. item2"),
        "<ol><li>item1</li></ol><blockquote><p>wrong: create a quote</p></blockquote><ol><li>item2</li></ol>"
    );
}

#[test]
fn test_definition_list() {
    assert_eq!(
        trac_html(" item1:: foo.\n item2:: bar.\n"),
        "<dl><dt>item1</dt><dd>foo.</dd><dt>item2</dt><dd>bar.</dd></dl>"
    );
}

#[test]
fn test_definition_list_multiline() {
    assert_eq!(
        trac_html(" first important term:: this\n                        is important\n second term::\n is not important."),
        "<dl><dt>first important term</dt><dd>this is important</dd><dt>second term</dt><dd>is not important.</dd></dl>"
    );
    assert_eq!(
        trac_html("    lorem:: ipsum\n           dolore\n and enough indentation\n    remlo::      relodo"),
        "<dl><dt>lorem</dt><dd>ipsum dolore and enough indentation</dd><dt>remlo</dt><dd>relodo</dd></dl>"
    );
}

#[test]
fn test_definition_list_requires_indentation() {
    let html = trac_html("this:: is\nnot a list\nspace::\nis required.");
    assert!(!html.contains("<dl>"));
    assert!(!html.contains("<dt>"));
    assert!(!html.contains("<dd>"));
}

#[test]
fn test_definition_list_and_paragraph() {
    let html = trac_html(" a:: 1\n 2\nparagraph\n\n b::\n 3\n \n 4\n\n x");
    assert!(html.contains("<dl><dt>a</dt><dd>1 2</dd></dl>"));
    assert!(html.contains("<p>paragraph</p>"));
    assert!(html.contains("<dl><dt>b</dt><dd>3 4</dd></dl>"));
}

#[test]
fn test_preformatted() {
    let expected = "<p>first para</p><pre>\tpreformatted text\n\nspanning multilple lines\n</pre><p>second para</p>";
    assert_eq!(
        trac_html("first para\n\n{{{\n\tpreformatted text\n\nspanning multilple lines\n}}}\nsecond para"),
        expected
    );
    assert_eq!(
        trac_html("first para\n{{{\n\tpreformatted text\n\nspanning multilple lines\n}}}\nsecond para"),
        expected
    );
}

#[test]
fn test_preformatted_content_is_verbatim() {
    assert_eq!(
        trac_html("{{{\n'''not bold''' #1 WikiWord\n}}}"),
        "<pre>'''not bold''' #1 WikiWord\n</pre>"
    );
}

#[test]
fn test_preformatted_with_processor_becomes_code() {
    assert_eq!(
        trac_html("{{{\n#!python\nprint('hi')\n}}}"),
        "<pre><code class=\"language-python\">print('hi')\n</code></pre>"
    );
    assert_eq!(
        trac_html("{{{#!sh\nls\n}}}"),
        "<pre><code class=\"language-sh\">ls\n</code></pre>"
    );
}

#[test]
fn test_unterminated_preformatted_runs_to_end() {
    assert_eq!(trac_html("{{{\ncode"), "<pre>code\n</pre>");
}

#[test]
fn test_quote_block() {
    assert_eq!(
        trac_html(">> second level\n>> second level line 2\n> first level\nnew para\n"),
        "<blockquote><blockquote><p>second level<br>second level line 2</p></blockquote><p>first level</p></blockquote><p>new para</p>"
    );
}

#[test]
fn test_quote_block_following_para() {
    assert_eq!(
        trac_html("normal para\n> quoted\nnew para\n"),
        "<p>normal para</p><blockquote><p>quoted</p></blockquote><p>new para</p>"
    );
    assert_eq!(
        trac_html("normal para\n  quoted\n  first level\nnew para\n"),
        "<p>normal para</p><blockquote><p>quoted<br>first level</p></blockquote><p>new para</p>"
    );
}

#[test]
fn test_table_block() {
    assert_eq!(
        trac_html("normal para\n||a table||row with three||columns||\n||another||row||||\nnew para\n"),
        "<p>normal para</p><table><tr><td>a table</td><td>row with three</td><td>columns</td></tr><tr><td>another</td><td>row</td><td></td></tr></table><p>new para</p>"
    );
}

#[test]
fn test_table_header_cells() {
    let events = events(&tracwiki::language(), "||= Name =||value||");
    assert!(events.contains(&Event::begin_block(BlockType::TableHeader)));
    assert!(events.contains(&Event::characters("Name")));
}

#[test]
fn test_event_stream_for_nested_list() {
    assert_snapshot!(rendered_events(&tracwiki::language(), " 2. two\n   * sub"), @r###"
    begin_document()
    begin_block(NumericList, start="2")
    begin_block(ListItem)
    characters("two")
    begin_block(BulletedList)
    begin_block(ListItem)
    characters("sub")
    end_block()
    end_block()
    end_block()
    end_block()
    end_document()
    "###);
}
