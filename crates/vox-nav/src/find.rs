//! Predicate search
//!
//! Moves object by object until a node, or one of the containers entered
//! on the way to it, satisfies a predicate.

use vox_a11y::DomPredicate;
use vox_dom::{Document, DomTree, NodeId};

use crate::cursor::CursorSelection;
use crate::error::{NavError, NavResult};
use crate::object::BareObjectWalker;

/// Chain predicate: given nodes innermost first, the matching one
pub type ChainPredicate<'a> = &'a dyn Fn(&DomTree, &[NodeId]) -> Option<NodeId>;

/// `node` and its ancestors that do not contain `prev`, innermost first
pub fn unique_ancestors(tree: &DomTree, prev: NodeId, node: NodeId) -> Vec<NodeId> {
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .take_while(|&a| a.is_valid() && !tree.contains(a, prev))
        .collect()
}

/// Full chain of `node` up to the document, innermost first
fn full_chain(tree: &DomTree, node: NodeId) -> Vec<NodeId> {
    std::iter::once(node).chain(tree.ancestors(node)).collect()
}

/// Search from `sel` in its direction for a match
///
/// Returns `Ok(None)` when the document boundary is reached first. An
/// iframe stops the search so the caller can descend into it.
pub fn find_next(
    doc: &Document,
    sel: &CursorSelection,
    predicate: ChainPredicate<'_>,
    max_steps: usize,
) -> NavResult<Option<CursorSelection>> {
    let tree = doc.tree();
    let reversed = sel.reversed;
    let objects = BareObjectWalker::new(max_steps);

    let mut current = sel.clone();
    if !sel.is_body_sentinel(doc) {
        // leave a matching container before looking for the next one
        if let Some(hit) = predicate(tree, &full_chain(tree, sel.directed_node())) {
            if hit != sel.directed_node() && tree.is_attached(hit) {
                current = CursorSelection::from_node(tree, hit).set_reversed(reversed);
            }
        }
    }

    for _ in 0..max_steps {
        let prev_node = current.directed_node();
        let Some(next) = objects.next(doc, &current)? else {
            return Ok(None);
        };
        let node = next.start.node;
        if node == prev_node {
            return Ok(None);
        }
        if tree.is_tag(node, "iframe") {
            return Ok(Some(next));
        }
        let chain = unique_ancestors(tree, prev_node, node);
        if let Some(hit) = predicate(tree, &chain) {
            return Ok(Some(CursorSelection::from_node(tree, hit).set_reversed(reversed)));
        }
        current = next;
    }
    tracing::warn!("search gave up after {} objects", max_steps);
    Err(NavError::TraversalExhausted { steps: max_steps })
}

/// [`find_next`] with a role predicate
pub fn find_predicate(
    doc: &Document,
    sel: &CursorSelection,
    predicate: &DomPredicate,
    max_steps: usize,
) -> NavResult<Option<CursorSelection>> {
    let chain = |tree: &DomTree, nodes: &[NodeId]| predicate.find(tree, nodes);
    find_next(doc, sel, &chain, max_steps)
}
