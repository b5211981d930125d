//! Hyperlinks, wiki links and links into a Trac server.

use crate::common::{html, trac_html, trac_with_pattern, trac_with_server};
use pretty_assertions::assert_eq;

fn server_html(source: &str) -> String {
    html(&trac_with_server(), source)
}

fn anchor(path: &str, text: &str) -> String {
    format!("<p><a href=\"http://trac.edgewall.org{path}\">{text}</a></p>")
}

#[test]
fn test_hyperlink() {
    assert_eq!(
        trac_html("[http://example.com Example]"),
        "<p><a href=\"http://example.com\">Example</a></p>"
    );
    assert_eq!(
        trac_html("[http://example.com]"),
        "<p><a href=\"http://example.com\">http://example.com</a></p>"
    );
}

#[test]
fn test_raw_url() {
    assert_eq!(
        trac_html("see http://example.com."),
        "<p>see <a href=\"http://example.com\">http://example.com</a>.</p>"
    );
}

#[test]
fn test_internal_link() {
    assert_eq!(
        trac_html("[wiki:WikiStart Start page]"),
        "<p><a href=\"WikiStart\">Start page</a></p>"
    );
    assert_eq!(
        trac_html("wiki:WikiStart"),
        "<p><a href=\"WikiStart\">WikiStart</a></p>"
    );
}

#[test]
fn test_wiki_word() {
    assert_eq!(
        trac_html("a WikiWord here"),
        "<p>a <a href=\"WikiWord\">WikiWord</a> here</p>"
    );
    assert_eq!(
        html(&trac_with_pattern("/wiki/{0}"), "WikiWord"),
        "<p><a href=\"/wiki/WikiWord\">WikiWord</a></p>"
    );
}

#[test]
fn test_wiki_word_negatives() {
    assert_eq!(trac_html("Wiki"), "<p>Wiki</p>");
    assert_eq!(trac_html("WIKIWORD"), "<p>WIKIWORD</p>");
    assert_eq!(trac_html("aWikiWord"), "<p>aWikiWord</p>");
}

#[test]
fn test_wiki_word_escaped() {
    assert_eq!(trac_html("!WikiWord"), "<p>WikiWord</p>");
}

#[test]
fn test_trac_links_without_server_are_text() {
    assert_eq!(trac_html("#1 r1 ticket:1"), "<p>#1 r1 ticket:1</p>");
}

#[test]
fn test_ticket() {
    assert_eq!(server_html("#1"), anchor("/ticket/1", "#1"));
    assert_eq!(server_html("ticket:1"), anchor("/ticket/1", "ticket:1"));
    assert_eq!(server_html("a#1"), "<p>a#1</p>");
}

#[test]
fn test_ticket_comment() {
    assert_eq!(
        server_html("comment:1:ticket:2"),
        anchor("/ticket/2#comment:1", "comment:1:ticket:2")
    );
}

#[test]
fn test_attachment() {
    assert_eq!(
        server_html("attachment:foo.txt:ticket:1"),
        anchor("/ticket/1/foo.txt", "attachment:foo.txt:ticket:1")
    );
}

#[test]
fn test_changeset() {
    assert_eq!(server_html("r1"), anchor("/changeset/1", "r1"));
    assert_eq!(server_html("[1]"), anchor("/changeset/1", "[1]"));
    assert_eq!(server_html("changeset:1"), anchor("/changeset/1", "changeset:1"));
    assert_eq!(
        server_html("changeset:1/trunk"),
        anchor("/changeset/1/trunk", "changeset:1/trunk")
    );
    assert_eq!(server_html("ar1"), "<p>ar1</p>");
}

#[test]
fn test_revision_log() {
    assert_eq!(server_html("r1:3"), anchor("/log/?revs=1-3", "r1:3"));
    assert_eq!(server_html("[1:3]"), anchor("/log/?revs=1-3", "[1:3]"));
    assert_eq!(
        server_html("log:trunk@1:3"),
        anchor("/log/trunk?revs=1-3", "log:trunk@1:3")
    );
}

#[test]
fn test_report_and_milestone() {
    assert_eq!(server_html("report:1"), anchor("/report/1", "report:1"));
    assert_eq!(
        server_html("milestone:1.0"),
        anchor("/milestone/1.0", "milestone:1.0")
    );
}

#[test]
fn test_source() {
    assert_eq!(
        server_html("source:/trunk/COPYING"),
        anchor("/browser/trunk/COPYING", "source:/trunk/COPYING")
    );
    assert_eq!(
        server_html("source:/trunk/COPYING@200#L26"),
        anchor(
            "/browser/trunk/COPYING?rev=200#L26",
            "source:/trunk/COPYING@200#L26"
        )
    );
}

#[test]
fn test_escaped_ticket() {
    assert_eq!(server_html("!#1"), "<p>#1</p>");
}
