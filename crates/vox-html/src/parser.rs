//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the vox arena DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use vox_dom::{Document, DomTree, Namespace, NodeId};

/// Elements whose whitespace-only text is significant
const PRESERVE_WHITESPACE: &[&str] = &["pre", "textarea"];

/// Block-level elements; whitespace between two of them separates nothing
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "ul", "script",
    "style", "template",
];

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Document => {
                self.convert_children(handle, tree, parent);
                return;
            }
            RcNodeData::Doctype { name, .. } => tree.create_doctype(&**name),
            RcNodeData::Text { contents } => tree.create_text(&**contents.borrow()),
            RcNodeData::Comment { contents } => tree.create_comment(&**contents),
            RcNodeData::Element { name, attrs, .. } => {
                let ns = Namespace::from_url(&*name.ns);
                let id = tree.create_element_ns(ns, &*name.local);
                for attr in attrs.borrow().iter() {
                    // Only element ids are passed, so this cannot fail
                    let _ = tree.set_attribute(id, &*attr.name.local, &*attr.value);
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!("dropping parsed node {}: {}", id, err);
            return;
        }

        self.convert_children(handle, tree, id);
    }

    /// Convert the children of `handle`, dropping whitespace that only
    /// separates block content
    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let children = handle.children.borrow();
        for (i, child) in children.iter().enumerate() {
            if is_whitespace_text(child) {
                let prev = i.checked_sub(1).and_then(|p| children.get(p));
                let next = children.get(i + 1);
                if !keeps_whitespace(tree, parent, prev, next) {
                    continue;
                }
            }
            self.convert_node(child, tree, parent);
        }
    }
}

fn is_whitespace_text(handle: &Handle) -> bool {
    match &handle.data {
        RcNodeData::Text { contents } => contents.borrow().trim().is_empty(),
        _ => false,
    }
}

/// Whitespace-only text is kept in preformatted content and between inline
/// content; it is dropped outside the body, inside MathML, and where both
/// neighbours (or the parent's edges) are block-level.
fn keeps_whitespace(tree: &DomTree, parent: NodeId, prev: Option<&Handle>, next: Option<&Handle>) -> bool {
    let Some(tag) = tree.tag_name(parent) else {
        return false;
    };
    if PRESERVE_WHITESPACE.contains(&tag) {
        return true;
    }
    if matches!(tag, "html" | "head") || tree.namespace(parent) == Some(Namespace::MathMl) {
        return false;
    }
    !(prev.is_none_or(is_block) && next.is_none_or(is_block))
}

fn is_block(handle: &Handle) -> bool {
    match &handle.data {
        RcNodeData::Element { name, .. } => BLOCK_TAGS.contains(&&*name.local),
        _ => false,
    }
}
