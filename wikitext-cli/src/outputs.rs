//! Output formats
//!
//! Every output drives the parser with a different document builder:
//!
//! - `html`: HTML body fragment, or a complete document when `emit_as_document` is set
//! - `events`: the recorded builder calls, one per line (`begin_block(Paragraph)`, ...)
//! - `events-json`: the same stream as a JSON array
//!
//! The event listings are meant for checking how a document was understood, before looking at
//! what a particular builder made of it.

use wikitext_parser::{
    HtmlDocumentBuilder, HtmlOptions, MarkupLanguage, MarkupParser, RecordingDocumentBuilder,
};

/// All available output formats
pub const AVAILABLE_OUTPUTS: &[&str] = &["html", "events", "events-json"];

/// Parse `source` with `language` and render it in the named output format.
///
/// The result always ends with a newline.
pub fn render(
    source: &str,
    language: &MarkupLanguage,
    output: &str,
    html_options: &HtmlOptions,
) -> Result<String, String> {
    let parser = MarkupParser::new(language);
    match output {
        "html" => {
            let mut builder = HtmlDocumentBuilder::new(html_options.clone());
            parser
                .parse(source, &mut builder)
                .map_err(|e| format!("HTML generation failed: {e}"))?;
            let mut html = builder.into_html();
            if !html.ends_with('\n') {
                html.push('\n');
            }
            Ok(html)
        }
        "events" => Ok(record(&parser, source)?.render()),
        "events-json" => {
            let builder = record(&parser, source)?;
            let mut json = serde_json::to_string_pretty(builder.events())
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            json.push('\n');
            Ok(json)
        }
        other => Err(format!(
            "Unknown output format '{other}'. Available: {}",
            AVAILABLE_OUTPUTS.join(", ")
        )),
    }
}

fn record(parser: &MarkupParser<'_>, source: &str) -> Result<RecordingDocumentBuilder, String> {
    let mut builder = RecordingDocumentBuilder::new();
    parser
        .parse(source, &mut builder)
        .map_err(|e| format!("Parse failed: {e}"))?;
    Ok(builder)
}
