//! Group classification
//!
//! A group is a subtree read as one unit by coarse navigation: a paragraph,
//! a short list, a block of plain text. Structural "breakout" elements split
//! a subtree into several groups.

use vox_dom::{DomTree, NodeId};

use crate::aria::AriaRole;
use crate::dom_util::{
    collapse_whitespace, get_node_text, has_content, inner_ancestors, is_focusable, is_leaf_node,
};
use crate::name::get_name;
use crate::role::get_role;

/// Default maximum flattened length of a group
pub const DEFAULT_GROUP_MAX_CHARS: usize = 1500;

/// Elements that always start a group of their own
const BREAKOUT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "table", "ul", "ol", "dl", "input", "select",
    "textarea", "button", "iframe", "object", "embed", "math", "hr", "pre", "blockquote", "p",
];

/// Check the node is a structural breakout element
pub fn is_breakout(tree: &DomTree, id: NodeId) -> bool {
    if tree.tag_name(id).is_some_and(|t| BREAKOUT_TAGS.contains(&t)) {
        return true;
    }
    get_role(tree, id).is_some_and(|r| r == AriaRole::Heading || r.is_widget())
}

/// Check a node is a leaf for group navigation
///
/// Every object leaf is a group leaf, and so is every element inside a
/// group, which keeps the classification monotonic down the tree. The body
/// is the traversal root and never forms a group itself.
pub fn is_group_leaf(tree: &DomTree, id: NodeId, max_chars: usize) -> bool {
    if is_leaf_node(tree, id) || is_group_root(tree, id, max_chars) {
        return true;
    }
    inner_ancestors(tree, id).any(|a| is_group_root(tree, a, max_chars))
}

/// Flattened subtree text plus the accessible name when the name adds to it
pub fn group_text(tree: &DomTree, id: NodeId) -> String {
    let text = collapse_whitespace(&get_node_text(tree, id));
    let name = get_name(tree, id);
    if text.contains(&name) {
        text
    } else {
        collapse_whitespace(&format!("{} {}", text, name))
    }
}

/// Local group rule, without inheritance from ancestors
fn is_group_root(tree: &DomTree, id: NodeId, max_chars: usize) -> bool {
    if !tree.is_element(id) || tree.is_tag(id, "body") {
        return false;
    }
    let breakout_inside = tree
        .descendants(id)
        .skip(1)
        .any(|d| tree.is_element(d) && is_breakout(tree, d) && has_content(tree, d));
    if breakout_inside {
        return false;
    }

    if get_role(tree, id).is_some_and(|r| r.is_composite()) && !is_focusable(tree, id) {
        return false;
    }

    let len = group_text(tree, id).chars().count();
    if len > max_chars {
        tracing::trace!("{} too long for a group ({} > {} chars)", id, len, max_chars);
        return false;
    }
    len > 0
}
