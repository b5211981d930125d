//! The node tree behind [`HtmlDocumentBuilder`](super::HtmlDocumentBuilder).
//!
//! Nodes are `markup5ever_rcdom` handles, detached from any document: the builder only ever
//! appends, so parent links are never set. Serialization goes through html5ever, which owns
//! escaping and void elements (`<br>`, `<img>`, `<hr>`).

use crate::error::BuilderError;
use html5ever::serialize::{self, SerializeOpts, TraversalScope};
use html5ever::tendril::StrTendril;
use html5ever::{ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn detached(data: NodeData) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    })
}

/// An HTML element; attributes keep the given order.
pub(super) fn element(tag: &str, attrs: Vec<(&str, String)>) -> Handle {
    let attrs = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();
    detached(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub(super) fn text_node(text: &str) -> Handle {
    detached(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

pub(super) fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// The markup of everything below `root`.
pub(super) fn inner_html(root: &Handle) -> Result<String, BuilderError> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..SerializeOpts::default()
    };
    let mut bytes = Vec::new();
    serialize::serialize(&mut bytes, &SerializableHandle::from(root.clone()), opts)
        .map_err(|e| BuilderError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BuilderError::Serialization(e.to_string()))
}
