//! Generic node traversal
//!
//! Depth-first "next node" over the DOM with a pluggable stop predicate.
//! The object and group walkers differ only in the predicate they pass.
//! Every loop is bounded by a step budget; running out of budget is
//! reported as [`NavError::TraversalExhausted`] rather than hanging.

use vox_dom::{Document, DomTree, NodeId};

use crate::cursor::CursorSelection;
use crate::error::{NavError, NavResult};

/// Decides where descent into children stops
pub type StopPredicate<'a> = &'a dyn Fn(&DomTree, NodeId) -> bool;

/// First child in the direction of travel
pub fn directed_first_child(tree: &DomTree, id: NodeId, reversed: bool) -> NodeId {
    if reversed {
        tree.last_child(id)
    } else {
        tree.first_child(id)
    }
}

/// Next sibling in the direction of travel
pub fn directed_next_sibling(tree: &DomTree, id: NodeId, reversed: bool) -> NodeId {
    if reversed {
        tree.prev_sibling(id)
    } else {
        tree.next_sibling(id)
    }
}

/// Step counter shared by the loops of one traversal
struct Budget {
    used: usize,
    max: usize,
}

impl Budget {
    fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    fn tick(&mut self) -> NavResult<()> {
        self.used += 1;
        if self.used > self.max {
            tracing::warn!("traversal gave up after {} steps", self.max);
            return Err(NavError::TraversalExhausted { steps: self.max });
        }
        Ok(())
    }
}

/// Outcome of [`next_node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextNode {
    /// A node with content in the direction of travel
    Found(NodeId),
    /// The traversal root has no children; the selection stays where it is
    EmptyRoot,
    /// Ran off the start or end of the document
    Boundary,
}

fn check_attached(tree: &DomTree, node: NodeId) -> NavResult<()> {
    if tree.is_attached(node) {
        Ok(())
    } else {
        Err(NavError::StaleSelection(node))
    }
}

/// Descend from `node` into directed first children until `stop` holds
fn descend(
    tree: &DomTree,
    mut node: NodeId,
    reversed: bool,
    stop: StopPredicate<'_>,
    budget: &mut Budget,
) -> NavResult<NodeId> {
    while !stop(tree, node) {
        let child = directed_first_child(tree, node, reversed);
        if !child.is_valid() {
            break;
        }
        node = child;
        budget.tick()?;
    }
    Ok(node)
}

/// Find the next stop node with content after `start`
pub fn next_node(
    doc: &Document,
    start: NodeId,
    reversed: bool,
    stop: StopPredicate<'_>,
    max_steps: usize,
) -> NavResult<NextNode> {
    let tree = doc.tree();
    let root = doc.traversal_root();
    check_attached(tree, start)?;

    if start == root && !directed_first_child(tree, root, reversed).is_valid() {
        return Ok(NextNode::EmptyRoot);
    }

    let mut budget = Budget::new(max_steps);
    let mut node = start;
    loop {
        budget.tick()?;

        let candidate = if node == root {
            directed_first_child(tree, root, reversed)
        } else {
            let mut current = node;
            loop {
                let sibling = directed_next_sibling(tree, current, reversed);
                if sibling.is_valid() {
                    break sibling;
                }
                current = tree.parent(current);
                if !current.is_valid() || current == root {
                    return Ok(NextNode::Boundary);
                }
                budget.tick()?;
            }
        };
        if !candidate.is_valid() {
            return Ok(NextNode::Boundary);
        }

        let found = descend(tree, candidate, reversed, stop, &mut budget)?;
        if found == root {
            return Ok(NextNode::Boundary);
        }
        if vox_a11y::has_content(tree, found) {
            return Ok(NextNode::Found(found));
        }
        node = found;
    }
}

/// Move a selection to the next stop node, `Ok(None)` at the boundary
pub fn next_selection(
    doc: &Document,
    sel: &CursorSelection,
    stop: StopPredicate<'_>,
    max_steps: usize,
) -> NavResult<Option<CursorSelection>> {
    match next_node(doc, sel.directed_node(), sel.reversed, stop, max_steps)? {
        NextNode::Found(node) => {
            Ok(Some(CursorSelection::from_node(doc.tree(), node).set_reversed(sel.reversed)))
        }
        NextNode::EmptyRoot => Ok(Some(sel.clone())),
        NextNode::Boundary => Ok(None),
    }
}

/// Nearest valid stop node for an arbitrary node
///
/// Climbs while the parent is itself a stop node, then descends while the
/// node is not one. Contentless results move on with [`next_node`]; if that
/// finds nothing either the body sentinel is returned.
pub fn sync_selection(
    doc: &Document,
    sel: &CursorSelection,
    stop: StopPredicate<'_>,
    max_steps: usize,
) -> NavResult<CursorSelection> {
    let tree = doc.tree();
    let root = doc.traversal_root();
    let reversed = sel.reversed;
    let start = sel.directed_node();
    check_attached(tree, start)?;

    let sentinel = || CursorSelection::from_body(doc).set_reversed(reversed);
    if start == root || !tree.contains(root, start) {
        return Ok(next_selection(doc, &sentinel(), stop, max_steps)?.unwrap_or_else(sentinel));
    }

    let mut budget = Budget::new(max_steps);
    let mut node = start;
    loop {
        let parent = tree.parent(node);
        if !parent.is_valid() || parent == root || !stop(tree, parent) {
            break;
        }
        node = parent;
        budget.tick()?;
    }
    let node = descend(tree, node, reversed, stop, &mut budget)?;

    if vox_a11y::has_content(tree, node) {
        return Ok(CursorSelection::from_node(tree, node).set_reversed(reversed));
    }
    match next_node(doc, node, reversed, stop, max_steps)? {
        NextNode::Found(found) => Ok(CursorSelection::from_node(tree, found).set_reversed(reversed)),
        NextNode::EmptyRoot | NextNode::Boundary => Ok(sentinel()),
    }
}
