use crate::common::trac_html;
use pretty_assertions::assert_eq;

#[test]
fn test_line_break() {
    assert_eq!(
        trac_html("normal text[[BR]]normal"),
        "<p>normal text<br>normal</p>"
    );
}

#[test]
fn test_image() {
    assert_eq!(
        trac_html("[[Image(local_attachment.png)]]"),
        "<p><img src=\"local_attachment.png\" border=\"0\"></p>"
    );
}

#[test]
fn test_image_source_with_parentheses() {
    assert_eq!(
        trac_html("[[Image(photo(1).png)]] and [[BR]]"),
        "<p><img src=\"photo(1).png\" border=\"0\"> and <br></p>"
    );
}

#[test]
fn test_image_with_options() {
    assert_eq!(
        trac_html("[[Image(local_attachment.png, title=Title Text, alt=Alt Text, border=5)]]"),
        "<p><img src=\"local_attachment.png\" title=\"Title Text\" alt=\"Alt Text\" border=\"5\"></p>"
    );
}

#[test]
fn test_image_sizes() {
    assert_eq!(
        trac_html("[[Image(local_attachment.png, 100px, height=10%)]]"),
        "<p><img src=\"local_attachment.png\" width=\"100\" height=\"10%\" border=\"0\"></p>"
    );
}

#[test]
fn test_image_float() {
    assert_eq!(
        trac_html("[[Image(local_attachment.png, right)]]"),
        "<p><img src=\"local_attachment.png\" border=\"0\" style=\"float:right;\"></p>"
    );
}

#[test]
fn test_image_invalid_options_are_ignored() {
    assert_eq!(
        trac_html("[[Image(local_attachment.png, border=thick)]]"),
        "<p><img src=\"local_attachment.png\" border=\"0\"></p>"
    );
}

#[test]
fn test_unknown_macro_is_dropped() {
    assert_eq!(trac_html("a [[TitleIndex]] b"), "<p>a  b</p>");
}

#[test]
fn test_escaped_macro() {
    assert_eq!(trac_html("![[BR]]"), "<p>[[BR]]</p>");
}
