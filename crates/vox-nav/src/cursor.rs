//! Cursor and CursorSelection
//!
//! A [`Cursor`] is a point in one node's text; a [`CursorSelection`] is a
//! pair of cursors plus the direction of travel that produced it.

use vox_dom::{Document, DomTree, NodeId};

/// A point inside a node's cached text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub node: NodeId,
    /// Byte offset into `text`, always on a char boundary
    pub index: usize,
    /// Text of the node when the cursor was made
    pub text: String,
}

impl Cursor {
    /// Create a cursor, clamping `index` into `text`
    pub fn new(node: NodeId, index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut index = index.min(text.len());
        while !text.is_char_boundary(index) {
            index -= 1;
        }
        Self { node, index, text }
    }

    /// Cursor at the start of a node
    pub fn at_node(tree: &DomTree, node: NodeId) -> Self {
        Self::new(node, 0, vox_a11y::get_node_text(tree, node))
    }
}

/// A directed point or range in the document
#[derive(Debug, Clone, Eq)]
pub struct CursorSelection {
    pub start: Cursor,
    pub end: Cursor,
    /// Direction of travel, not geometric order
    pub reversed: bool,
}

impl PartialEq for CursorSelection {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl CursorSelection {
    pub fn new(start: Cursor, end: Cursor, reversed: bool) -> Self {
        Self { start, end, reversed }
    }

    /// Collapsed selection at the start of `node`
    pub fn from_node(tree: &DomTree, node: NodeId) -> Self {
        let cursor = Cursor::at_node(tree, node);
        Self::new(cursor.clone(), cursor, false)
    }

    /// Range `[start, end)` inside one node's text
    pub fn from_range(node: NodeId, text: &str, start: usize, end: usize, reversed: bool) -> Self {
        Self::new(Cursor::new(node, start, text), Cursor::new(node, end, text), reversed)
    }

    /// The "beginning of page" sentinel: a collapsed selection on the
    /// traversal root
    pub fn from_body(doc: &Document) -> Self {
        let cursor = Cursor::new(doc.traversal_root(), 0, "");
        Self::new(cursor.clone(), cursor, false)
    }

    /// Same selection travelling the other way (or the same way)
    #[must_use]
    pub fn set_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Check this is the body sentinel of `doc`
    pub fn is_body_sentinel(&self, doc: &Document) -> bool {
        let root = doc.traversal_root();
        self.start.node == root && self.end.node == root
    }

    /// Node the next move starts from: `end` going forward, `start` going back
    pub fn directed_node(&self) -> NodeId {
        if self.reversed {
            self.start.node
        } else {
            self.end.node
        }
    }

    /// Check start and end are the same point
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Selected text when both ends are in the same node
    pub fn selected_text(&self) -> &str {
        if self.start.node != self.end.node {
            return "";
        }
        let text = &self.start.text;
        let (a, b) = (self.start.index.min(self.end.index), self.start.index.max(self.end.index));
        text.get(a..b.min(text.len())).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_to_char_boundary() {
        let c = Cursor::new(NodeId::ROOT, 2, "é!");
        assert_eq!(c.index, 2);
        let c = Cursor::new(NodeId::ROOT, 1, "é!");
        assert_eq!(c.index, 0);
        let c = Cursor::new(NodeId::ROOT, 99, "abc");
        assert_eq!(c.index, 3);
    }

    #[test]
    fn test_equality_ignores_direction() {
        let a = CursorSelection::from_range(NodeId::ROOT, "Hello world", 0, 5, false);
        let b = a.clone().set_reversed(true);
        assert_eq!(a, b);
        assert!(b.reversed);
        assert_eq!(a.selected_text(), "Hello");
    }

    #[test]
    fn test_body_sentinel() {
        let doc = Document::default();
        let sel = CursorSelection::from_body(&doc);
        assert!(sel.is_body_sentinel(&doc));
        assert!(sel.is_collapsed());
        assert_eq!(sel.directed_node(), doc.body());
    }
}
