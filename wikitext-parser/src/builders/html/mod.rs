//! HTML document builder
//!
//! Builds an HTML DOM from the event stream and serializes it on `end_document`.
//!
//! Block mapping:
//!
//! | Block                 | Element                          |
//! |-----------------------|----------------------------------|
//! | Paragraph             | `<p>`                            |
//! | Heading1..Heading6    | `<h1>`..`<h6>`                   |
//! | BulletedList          | `<ul>`                           |
//! | NumericList           | `<ol>` (`start` when not 1)      |
//! | ListItem              | `<li>`                           |
//! | Table / TableRow      | `<table>` / `<tr>`               |
//! | TableCell / Header    | `<td>` / `<th>`                  |
//! | Quote                 | `<blockquote>`                   |
//! | Preformatted          | `<pre>`                          |
//! | Code                  | `<pre><code class="language-x">` |
//! | DefinitionList        | `<dl>`, `<dt>`, `<dd>`           |
//! | Footnote              | `<p class="footnote">`           |
//! | Block                 | `<div>`                          |
//!
//! Spans map to `b`, `i`, `b>i`, `strong`, `em`, `code`, `tt`, `del`, `u`, `sup`, `sub`, `a`,
//! `mark` and `span`.
//!
//! When [`HtmlOptions::supported_blocks`] restricts the block vocabulary, unsupported blocks
//! produce no element; their content is emitted inline and followed by two line breaks before
//! the next sibling, so adjacent flattened blocks stay visually separated.

mod dom;

use crate::attributes::Attributes;
use crate::builder::{BlockType, DocumentBuilder, SpanType};
use crate::error::BuilderError;
use dom::{append, element, inner_html, text_node};
use markup5ever_rcdom::Handle;

/// Options for HTML output
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap the body in a complete `<!DOCTYPE html>` document.
    pub emit_as_document: bool,
    /// Document title (document mode only).
    pub title: Option<String>,
    /// Inline stylesheet (document mode only).
    pub custom_css: Option<String>,
    /// Restrict output to these block types. `None` supports every block.
    pub supported_blocks: Option<Vec<BlockType>>,
}

impl HtmlOptions {
    pub fn document() -> Self {
        Self {
            emit_as_document: true,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    pub fn with_supported_blocks(mut self, blocks: Vec<BlockType>) -> Self {
        self.supported_blocks = Some(blocks);
        self
    }

    fn supports(&self, block_type: BlockType) -> bool {
        self.supported_blocks
            .as_ref()
            .map_or(true, |blocks| blocks.contains(&block_type))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Block,
    Span,
}

struct Frame {
    kind: FrameKind,
    restore: Handle,
    rendered: bool,
}

/// Builder producing an HTML fragment or document.
pub struct HtmlDocumentBuilder {
    options: HtmlOptions,
    root: Handle,
    current: Handle,
    frames: Vec<Frame>,
    pending_separator: bool,
    output: String,
}

impl HtmlDocumentBuilder {
    pub fn new(options: HtmlOptions) -> Self {
        let root = element("div", vec![]);
        Self {
            options,
            current: root.clone(),
            root,
            frames: Vec::new(),
            pending_separator: false,
            output: String::new(),
        }
    }

    /// Builder emitting a body fragment only.
    pub fn fragment() -> Self {
        Self::new(HtmlOptions::default())
    }

    /// The serialized HTML. Empty until `end_document` has run.
    pub fn html(&self) -> &str {
        &self.output
    }

    pub fn into_html(self) -> String {
        self.output
    }

    fn push_frame(&mut self, kind: FrameKind, outer: Handle, inner: Handle) {
        append(&self.current, outer);
        self.frames.push(Frame {
            kind,
            restore: self.current.clone(),
            rendered: true,
        });
        self.current = inner;
    }

    fn pop_frame(&mut self, kind: FrameKind) -> Result<Frame, BuilderError> {
        let frame = self.frames.pop().ok_or_else(|| {
            BuilderError::Unbalanced(format!("{} end without a matching begin", kind_name(kind)))
        })?;
        if frame.kind != kind {
            return Err(BuilderError::Unbalanced(format!(
                "{} end while a {} is open",
                kind_name(kind),
                kind_name(frame.kind)
            )));
        }
        self.current = frame.restore.clone();
        Ok(frame)
    }

    fn flush_separator(&mut self) {
        if self.pending_separator {
            self.pending_separator = false;
            append(&self.current, element("br", vec![]));
            append(&self.current, element("br", vec![]));
        }
    }
}

impl Default for HtmlDocumentBuilder {
    fn default() -> Self {
        Self::fragment()
    }
}

impl DocumentBuilder for HtmlDocumentBuilder {
    fn begin_document(&mut self) -> Result<(), BuilderError> {
        self.root = element("div", vec![]);
        self.current = self.root.clone();
        self.frames.clear();
        self.pending_separator = false;
        self.output.clear();
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), BuilderError> {
        if !self.frames.is_empty() {
            return Err(BuilderError::Unbalanced(format!(
                "document ended with {} open element(s)",
                self.frames.len()
            )));
        }
        self.pending_separator = false;
        let body = inner_html(&self.root)?;
        self.output = if self.options.emit_as_document {
            wrap_in_document(&body, &self.options)
        } else {
            body
        };
        Ok(())
    }

    fn begin_block(
        &mut self,
        block_type: BlockType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        if !self.options.supports(block_type) {
            self.frames.push(Frame {
                kind: FrameKind::Block,
                restore: self.current.clone(),
                rendered: false,
            });
            return Ok(());
        }
        self.flush_separator();
        let (outer, inner) = block_elements(block_type, attributes);
        self.push_frame(FrameKind::Block, outer, inner);
        Ok(())
    }

    fn end_block(&mut self) -> Result<(), BuilderError> {
        let frame = self.pop_frame(FrameKind::Block)?;
        if !frame.rendered {
            self.pending_separator = true;
        }
        Ok(())
    }

    fn begin_span(
        &mut self,
        span_type: SpanType,
        attributes: &Attributes,
    ) -> Result<(), BuilderError> {
        self.flush_separator();
        let (outer, inner) = span_elements(span_type, attributes);
        self.push_frame(FrameKind::Span, outer, inner);
        Ok(())
    }

    fn end_span(&mut self) -> Result<(), BuilderError> {
        self.pop_frame(FrameKind::Span).map(|_| ())
    }

    fn characters(&mut self, text: &str) -> Result<(), BuilderError> {
        if text.is_empty() {
            return Ok(());
        }
        self.flush_separator();
        append(&self.current, text_node(text));
        Ok(())
    }

    fn entity_reference(&mut self, name: &str) -> Result<(), BuilderError> {
        let entity = format!("&{name};");
        let decoded = html_escape::decode_html_entities(&entity);
        self.characters(&decoded)
    }

    fn image(&mut self, attributes: &Attributes, url: &str) -> Result<(), BuilderError> {
        self.flush_separator();
        let mut attrs = vec![("src", url.to_string())];
        attrs.extend(common_attributes(attributes));
        for (name, value) in [
            ("alt", &attributes.alt),
            ("width", &attributes.width),
            ("height", &attributes.height),
            ("border", &attributes.border),
        ] {
            if let Some(value) = value {
                attrs.push((name, value.clone()));
            }
        }
        match attributes.align.as_deref() {
            Some(side @ ("left" | "right")) => attrs.push(("style", format!("float:{side};"))),
            Some(other) => attrs.push(("align", other.to_string())),
            None => {}
        }
        append(&self.current, element("img", attrs));
        Ok(())
    }

    fn line_break(&mut self) -> Result<(), BuilderError> {
        self.flush_separator();
        append(&self.current, element("br", vec![]));
        Ok(())
    }

    fn horizontal_rule(&mut self) -> Result<(), BuilderError> {
        self.flush_separator();
        append(&self.current, element("hr", vec![]));
        Ok(())
    }

    fn acronym(&mut self, text: &str, definition: &str) -> Result<(), BuilderError> {
        self.flush_separator();
        let acronym = element("acronym", vec![("title", definition.to_string())]);
        append(&acronym, text_node(text));
        append(&self.current, acronym);
        Ok(())
    }
}

fn kind_name(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Block => "block",
        FrameKind::Span => "span",
    }
}

/// id, class, style and title, shared by every element.
fn common_attributes(attributes: &Attributes) -> Vec<(&'static str, String)> {
    [
        ("id", &attributes.id),
        ("class", &attributes.css_class),
        ("style", &attributes.css_style),
        ("title", &attributes.title),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
    .collect()
}

/// Outer and inner element for a block. They differ only for blocks rendered as two elements.
fn block_elements(block_type: BlockType, attributes: &Attributes) -> (Handle, Handle) {
    let mut attrs = common_attributes(attributes);
    let tag = match block_type {
        BlockType::Paragraph => "p",
        BlockType::Heading1 => "h1",
        BlockType::Heading2 => "h2",
        BlockType::Heading3 => "h3",
        BlockType::Heading4 => "h4",
        BlockType::Heading5 => "h5",
        BlockType::Heading6 => "h6",
        BlockType::BulletedList => "ul",
        BlockType::NumericList => {
            if let Some(start) = attributes.start.as_deref().filter(|s| *s != "1") {
                attrs.push(("start", start.to_string()));
            }
            "ol"
        }
        BlockType::ListItem => "li",
        BlockType::Table => "table",
        BlockType::TableRow => "tr",
        BlockType::TableCell => "td",
        BlockType::TableHeader => "th",
        BlockType::Quote => "blockquote",
        BlockType::Preformatted => "pre",
        BlockType::Code => {
            let pre = element("pre", attrs);
            let code_attrs = attributes
                .language
                .as_ref()
                .map(|lang| vec![("class", format!("language-{lang}"))])
                .unwrap_or_default();
            let code = element("code", code_attrs);
            append(&pre, code.clone());
            return (pre, code);
        }
        BlockType::DefinitionList => "dl",
        BlockType::DefinitionTerm => "dt",
        BlockType::DefinitionItem => "dd",
        BlockType::Footnote => {
            if attributes.css_class.is_none() {
                attrs.push(("class", "footnote".to_string()));
            }
            "p"
        }
        BlockType::Block => "div",
    };
    let node = element(tag, attrs);
    (node.clone(), node)
}

fn span_elements(span_type: SpanType, attributes: &Attributes) -> (Handle, Handle) {
    let mut attrs = common_attributes(attributes);
    let tag = match span_type {
        SpanType::Bold => "b",
        SpanType::Italic => "i",
        SpanType::BoldItalic => {
            let bold = element("b", attrs);
            let italic = element("i", vec![]);
            append(&bold, italic.clone());
            return (bold, italic);
        }
        SpanType::Strong => "strong",
        SpanType::Emphasis => "em",
        SpanType::Code => "code",
        SpanType::Monospace => "tt",
        SpanType::Deleted => "del",
        SpanType::Underlined => "u",
        SpanType::Superscript => "sup",
        SpanType::Subscript => "sub",
        SpanType::Link => {
            if let Some(href) = &attributes.href {
                attrs.insert(0, ("href", href.clone()));
            }
            "a"
        }
        SpanType::Mark => "mark",
        SpanType::Span => "span",
    };
    let node = element(tag, attrs);
    (node.clone(), node)
}

/// Wrap the body in a complete HTML document
fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let title = html_escape::encode_text(options.title.as_deref().unwrap_or(""));
    let style = options
        .custom_css
        .as_deref()
        .map(|css| format!("  <style>\n{css}\n  </style>\n"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="generator" content="wikitext-parser">
  <title>{title}</title>
{style}</head>
<body>
{body_html}
</body>
</html>
"#
    )
}
