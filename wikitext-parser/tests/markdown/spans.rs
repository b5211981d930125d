use crate::common::markdown_html;
use pretty_assertions::assert_eq;

#[test]
fn test_emphasis_and_strong() {
    assert_eq!(
        markdown_html("*em* and **strong**"),
        "<p><em>em</em> and <strong>strong</strong></p>"
    );
    assert_eq!(
        markdown_html("__strong__ and _em_"),
        "<p><strong>strong</strong> and <em>em</em></p>"
    );
}

#[test]
fn test_intraword_underscores() {
    assert_eq!(markdown_html("snake_case_name"), "<p>snake_case_name</p>");
}

#[test]
fn test_spaced_asterisks_are_text() {
    assert_eq!(markdown_html("2 * 3 * 4"), "<p>2 * 3 * 4</p>");
}

#[test]
fn test_code_spans() {
    assert_eq!(
        markdown_html("`code *x*`"),
        "<p><code>code *x*</code></p>"
    );
    assert_eq!(markdown_html("`` a ` b ``"), "<p><code>a ` b</code></p>");
}

#[test]
fn test_inline_link() {
    assert_eq!(
        markdown_html("[an example](http://example.com/ \"Title\")"),
        "<p><a href=\"http://example.com/\" title=\"Title\">an example</a></p>"
    );
    assert_eq!(
        markdown_html("[**bold** label](/x)"),
        "<p><a href=\"/x\"><strong>bold</strong> label</a></p>"
    );
}

#[test]
fn test_reference_link() {
    assert_eq!(
        markdown_html("[text][id]\n\n[id]: http://example.com/  \"T\""),
        "<p><a href=\"http://example.com/\" title=\"T\">text</a></p>"
    );
    assert_eq!(
        markdown_html("[Example]\n\n[example]: /e"),
        "<p><a href=\"/e\">Example</a></p>"
    );
}

#[test]
fn test_undefined_reference_is_text() {
    assert_eq!(markdown_html("[text][nope]"), "<p>[text][nope]</p>");
}

#[test]
fn test_images() {
    assert_eq!(
        markdown_html("![alt text](/path/img.jpg \"Title\")"),
        "<p><img src=\"/path/img.jpg\" title=\"Title\" alt=\"alt text\"></p>"
    );
    assert_eq!(
        markdown_html("![logo][l]\n\n[l]: /logo.png"),
        "<p><img src=\"/logo.png\" alt=\"logo\"></p>"
    );
}

#[test]
fn test_autolinks() {
    assert_eq!(
        markdown_html("<http://example.com>"),
        "<p><a href=\"http://example.com\">http://example.com</a></p>"
    );
    assert_eq!(
        markdown_html("<me@example.com>"),
        "<p><a href=\"mailto:me@example.com\">me@example.com</a></p>"
    );
}

#[test]
fn test_bare_urls_are_not_linked() {
    assert_eq!(
        markdown_html("see http://example.com"),
        "<p>see http://example.com</p>"
    );
}

#[test]
fn test_backslash_escapes() {
    assert_eq!(markdown_html("\\*not em\\*"), "<p>*not em*</p>");
    assert_eq!(markdown_html("a\\b"), "<p>a\\b</p>");
}

#[test]
fn test_escaped_closers() {
    assert_eq!(markdown_html(r"*a\*b*"), "<p><em>a*b</em></p>");
    assert_eq!(
        markdown_html(r"**x \** y**"),
        "<p><strong>x ** y</strong></p>"
    );
    assert_eq!(markdown_html(r"*a\\*b"), "<p><em>a\\</em>b</p>");
}

#[test]
fn test_escaped_bracket_in_link_label() {
    assert_eq!(
        markdown_html(r"[a\]b](http://example.com)"),
        "<p><a href=\"http://example.com\">a]b</a></p>"
    );
}

#[test]
fn test_entities() {
    assert_eq!(markdown_html("AT&amp;T &copy;"), "<p>AT&amp;T ©</p>");
    assert_eq!(markdown_html("AT&T"), "<p>AT&amp;T</p>");
}

#[test]
fn test_hard_line_break() {
    assert_eq!(markdown_html("one  \ntwo"), "<p>one<br>two</p>");
}
