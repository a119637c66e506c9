//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under a fresh root cannot violate the hierarchy rules
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html, head and body after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.html_element = tree
            .element_children(tree.root())
            .find(|&id| tree.is_tag(id, "html"))
            .unwrap_or(NodeId::NONE);
        self.head_element = NodeId::NONE;
        self.body_element = NodeId::NONE;
        if self.html_element.is_valid() {
            for child in tree.element_children(self.html_element) {
                match tree.tag_name(child) {
                    Some("head") if !self.head_element.is_valid() => self.head_element = child,
                    Some("body") if !self.body_element.is_valid() => self.body_element = child,
                    _ => {}
                }
            }
        }
        tracing::debug!(
            "finalized document {}: html={} head={} body={}",
            self.url,
            self.html_element,
            self.head_element,
            self.body_element
        );
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.is_tag(id, "title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Node that bounds traversal: the body, or the document node when
    /// there is no body
    pub fn traversal_root(&self) -> NodeId {
        if self.body_element.is_valid() && self.tree.is_attached(self.body_element) {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.attribute(node, "id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
