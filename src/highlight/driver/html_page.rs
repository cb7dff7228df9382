//! [Page] implementation over an HTML document
//!
//! The document is parsed with html5ever into an `RcDom`. Highlightable nodes are
//! elements whose tag is the marker tag and whose `class` list contains the marker
//! class. Marked elements nested inside another marked element are not listed:
//! highlighting the outer one replaces them.

use super::Page;
use crate::config::MarkerConfig;
use crate::error::{GlintError, Result};
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::{Rc, Weak};

/// An HTML document whose marked elements can be highlighted in place.
pub struct HtmlPage {
    dom: RcDom,
}

impl HtmlPage {
    /// Parse a full HTML document. Parsing is error tolerant and never fails.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    /// Serialize the document, including any highlighting applied to it.
    pub fn to_html(&self) -> Result<String> {
        let mut output = Vec::new();
        let document = SerializableHandle::from(self.dom.document.clone());
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        serialize(&mut output, &document, opts)
            .map_err(|e| GlintError::Html(format!("serialization failed: {}", e)))?;

        String::from_utf8(output)
            .map_err(|e| GlintError::Html(format!("UTF-8 conversion failed: {}", e)))
    }
}

impl Page for HtmlPage {
    type Node = Handle;

    fn highlightable_nodes(&self, marker: &MarkerConfig) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_marked(&self.dom.document, marker, &mut found);
        found
    }

    fn read_text(&self, node: &Handle) -> Result<String> {
        ensure_element(node)?;
        let mut text = String::new();
        push_text_content(node, &mut text);
        Ok(text)
    }

    fn read_attribute(&self, node: &Handle, name: &str) -> Result<Option<String>> {
        match &node.data {
            NodeData::Element { attrs, .. } => Ok(attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| attr.value.to_string())),
            _ => Err(GlintError::Node("not an element".to_string())),
        }
    }

    fn replace_content(&mut self, node: &Handle, html: &str) -> Result<()> {
        ensure_element(node)?;
        if !is_attached(node) {
            return Err(GlintError::Node("element is detached from the page".to_string()));
        }

        let fragment = parse_body_fragment(html)?;
        for old in node.children.borrow().iter() {
            old.parent.set(None);
        }
        for new in &fragment {
            new.parent.set(Some(Rc::downgrade(node)));
        }
        *node.children.borrow_mut() = fragment;
        Ok(())
    }
}

fn collect_marked(node: &Handle, marker: &MarkerConfig, found: &mut Vec<Handle>) {
    if is_marked(node, marker) {
        found.push(node.clone());
        return;
    }
    for child in node.children.borrow().iter() {
        collect_marked(child, marker, found);
    }
}

fn is_marked(node: &Handle, marker: &MarkerConfig) -> bool {
    match &node.data {
        NodeData::Element { name, attrs, .. } => {
            &*name.local == marker.tag.as_str()
                && attrs.borrow().iter().any(|attr| {
                    &*attr.name.local == "class"
                        && attr
                            .value
                            .split_ascii_whitespace()
                            .any(|class| class == marker.class)
                })
        }
        _ => false,
    }
}

fn ensure_element(node: &Handle) -> Result<()> {
    match node.data {
        NodeData::Element { .. } => Ok(()),
        _ => Err(GlintError::Node("not an element".to_string())),
    }
}

fn is_attached(node: &Handle) -> bool {
    let parent = node.parent.take();
    let attached = parent.as_ref().and_then(Weak::upgrade).is_some();
    node.parent.set(parent);
    attached
}

fn push_text_content(node: &Handle, text: &mut String) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => push_text_content(child, text),
            _ => {}
        }
    }
}

/// Parse rendered markup as body content and detach the resulting nodes.
fn parse_body_fragment(html: &str) -> Result<Vec<Handle>> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(format!("<body>{}", html));
    let body = find_element(&dom.document, "body")
        .ok_or_else(|| GlintError::Html("rendered markup has no body".to_string()))?;
    let children = body.children.take();
    Ok(children)
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if &*name.local == tag {
            return Some(node.clone());
        }
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}
