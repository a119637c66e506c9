//! DOM Tree (arena-based allocation)

use crate::{
    DomError, DomResult, InternedString, Namespace, Node, NodeData, NodeId, QualName,
    StringInterner,
};

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Removed nodes stay in the arena
/// with their parent link cleared, which is what [`DomTree::is_attached`]
/// checks.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// String interner for tag and attribute names
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Mutable interner
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    // --- Creation ---

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, tag)
    }

    /// Create an element in the given namespace
    pub fn create_element_ns(&mut self, ns: Namespace, tag: &str) -> NodeId {
        let local = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(QualName::new(ns, local)))
    }

    /// Create a text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name.to_string()))
    }

    // --- Mutation ---

    fn check(&self, id: NodeId) -> DomResult<()> {
        if self.get(id).is_some() {
            Ok(())
        } else {
            Err(DomError::NotFound(id))
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == NodeId::ROOT || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            self.check(reference)?;
            if self.nodes[reference.index()].parent != parent {
                return Err(DomError::NotAChild { parent, child: reference });
            }
            if reference == child {
                return Ok(());
            }
        }

        self.unlink(child);

        let (prev, next) = match reference {
            Some(reference) => (self.nodes[reference.index()].prev_sibling, reference),
            None => (self.nodes[parent.index()].last_child, NodeId::NONE),
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
        Ok(())
    }

    /// Remove `child` from `parent`. The node keeps its subtree but is no
    /// longer attached to the document.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[child.index()].parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(child);
        tracing::trace!("detached {} from {}", child, parent);
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[child.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = self.interner.intern(&name.to_ascii_lowercase());
        let elem = self
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))?;
        elem.set_attr(name, value.to_string());
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let Some(name) = self.interner.intern_lookup(&name.to_ascii_lowercase()) else {
            return Ok(None);
        };
        let elem = self
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))?;
        Ok(elem.remove_attr(name))
    }

    /// Replace the data of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(text)) => {
                text.content = content.to_string();
                Ok(())
            }
            Some(_) => Err(DomError::InvalidNodeType(id)),
            None => Err(DomError::NotFound(id)),
        }
    }

    // --- Queries ---

    /// Attribute value of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.intern_lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Check an attribute is present
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Check the element has the given local name
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id) == Some(tag)
    }

    /// Namespace of an element
    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        Some(self.get(id)?.as_element()?.name.ns)
    }

    /// Check node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Text data of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_text()
    }

    /// Parent, or NONE
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    /// First child, or NONE
    pub fn first_child(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.first_child)
    }

    /// Last child, or NONE
    pub fn last_child(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.last_child)
    }

    /// Next sibling, or NONE
    pub fn next_sibling(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.next_sibling)
    }

    /// Previous sibling, or NONE
    pub fn prev_sibling(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.prev_sibling)
    }

    /// Check the node has any child
    pub fn has_children(&self, id: NodeId) -> bool {
        self.first_child(id).is_valid()
    }

    /// Iterate over children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterate over element children only
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Iterate over strict ancestors, innermost first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
            budget: self.nodes.len(),
        }
    }

    /// Check `ancestor` is `node` or contains it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Check the node is still reachable from the document node
    pub fn is_attached(&self, id: NodeId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        id == NodeId::ROOT || self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// Number of strict ancestors
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(&text.content),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => {
                for (child, _) in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Pre-order iterator over a subtree, including `id` itself
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let current = stack.pop()?;
            let mut child = self.last_child(current);
            while child.is_valid() {
                stack.push(child);
                child = self.prev_sibling(child);
            }
            Some(current)
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
    budget: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        // The budget bounds the walk even if parent links were corrupted into a cycle
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let text = tree.create_text("Hello");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, span).unwrap();
        tree.append_child(span, text).unwrap();
        (tree, div, span, text)
    }

    #[test]
    fn test_append_links_siblings() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(tree.root(), ul).unwrap();
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();

        assert_eq!(tree.first_child(ul), a);
        assert_eq!(tree.last_child(ul), b);
        assert_eq!(tree.next_sibling(a), b);
        assert_eq!(tree.prev_sibling(b), a);
        assert_eq!(tree.children(ul).count(), 2);
    }

    #[test]
    fn test_insert_before() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(tree.root(), ul).unwrap();
        tree.append_child(ul, b).unwrap();
        tree.insert_before(ul, a, Some(b)).unwrap();
        let order: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_cycle_rejected() {
        let (mut tree, div, span, _) = sample();
        assert_eq!(
            tree.append_child(span, div),
            Err(DomError::HierarchyRequest { parent: span, child: div })
        );
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let (mut tree, div, span, text) = sample();
        assert!(tree.is_attached(text));
        tree.remove_child(div, span).unwrap();
        assert!(!tree.is_attached(span));
        assert!(!tree.is_attached(text));
        assert_eq!(tree.parent(text), span);
        assert!(tree.is_attached(div));
        assert!(!tree.has_children(div));
    }

    #[test]
    fn test_text_content_and_descendants() {
        let (tree, div, span, text) = sample();
        assert_eq!(tree.text_content(div), "Hello");
        let order: Vec<_> = tree.descendants(div).collect();
        assert_eq!(order, vec![div, span, text]);
        assert_eq!(tree.depth(text), 3);
    }

    #[test]
    fn test_attributes() {
        let (mut tree, div, _, text) = sample();
        tree.set_attribute(div, "Role", "main").unwrap();
        assert_eq!(tree.attribute(div, "role"), Some("main"));
        assert_eq!(tree.set_attribute(text, "x", "y"), Err(DomError::InvalidNodeType(text)));
        assert_eq!(tree.remove_attribute(div, "role").unwrap(), Some("main".into()));
        assert!(!tree.has_attribute(div, "role"));
    }
}
