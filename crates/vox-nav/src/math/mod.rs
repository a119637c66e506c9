//! MathML navigation
//!
//! Two-dimensional movement inside a `<math>` subtree: horizontal moves
//! between siblings (or between tokens and leaves in document order) and
//! vertical moves into and out of subexpressions.

mod shifter;
pub mod speech;
mod walker;

pub use shifter::{EdgeState, MathShifter};
pub use walker::{MathWalker, MathWalkerKind};

use vox_dom::{DomTree, Namespace, NodeId};

/// Token elements; nested tokens are ignored
pub const TOKEN_ELEMENTS: &[&str] = &["mi", "mn", "mo", "mtext", "ms", "mspace", "mglyph"];

/// Elements that arrange other expressions
pub const LAYOUT_SCHEMATA: &[&str] = &[
    "mrow", "mfrac", "msqrt", "mroot", "mstyle", "merror", "mpadded", "mphantom", "mfenced",
    "menclose", "msub", "msup", "msubsup", "munder", "mover", "munderover", "mmultiscripts",
    "mtable", "mtr", "mlabeledtr", "mtd", "semantics",
];

/// Check the node is a `<math>` element
pub fn is_math_element(tree: &DomTree, id: NodeId) -> bool {
    tree.is_tag(id, "math")
}

/// Outermost `<math>` element containing `id` (or `id` itself)
pub fn math_root(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter(|&a| is_math_element(tree, a))
        .last()
}

/// Check the node is a MathML token element
pub fn is_token(tree: &DomTree, id: NodeId) -> bool {
    tree.namespace(id) == Some(Namespace::MathMl)
        && tree.tag_name(id).is_some_and(|t| TOKEN_ELEMENTS.contains(&t))
}

/// Check the node is a MathML layout schema
pub fn is_layout(tree: &DomTree, id: NodeId) -> bool {
    tree.namespace(id) == Some(Namespace::MathMl)
        && tree.tag_name(id).is_some_and(|t| LAYOUT_SCHEMATA.contains(&t))
}

/// Text node with something other than whitespace in it
pub(crate) fn is_visible_text(tree: &DomTree, id: NodeId) -> bool {
    tree.text(id).is_some_and(|t| !t.trim().is_empty())
}

/// Children that take part in math navigation: elements and visible text
pub(crate) fn math_children(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(id)
        .map(|(child, _)| child)
        .filter(move |&c| tree.is_element(c) || is_visible_text(tree, c))
}

/// Check the node only wraps a single child (`<math>`, `<mrow>`,
/// `<semantics>`), so it has nothing to say of its own
pub(crate) fn is_wrapper(tree: &DomTree, id: NodeId) -> bool {
    matches!(tree.tag_name(id), Some("math" | "mrow" | "semantics" | "mstyle"))
        && math_children(tree, id).filter(|&c| tree.is_element(c)).count() == 1
        && !math_children(tree, id).any(|c| is_visible_text(tree, c))
}

/// Descend through single-child wrappers
pub(crate) fn skip_wrappers(tree: &DomTree, mut id: NodeId) -> NodeId {
    while is_wrapper(tree, id) {
        match math_children(tree, id).next() {
            Some(child) => id = child,
            None => break,
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_root_and_wrappers() {
        let doc = vox_html::parse("<math><mrow><msup><mi>x</mi><mn>2</mn></msup></mrow></math>");
        let tree = doc.tree();
        let math = tree.descendants(doc.body()).find(|&n| tree.is_tag(n, "math")).unwrap();
        let msup = tree.descendants(math).find(|&n| tree.is_tag(n, "msup")).unwrap();
        let mi = tree.first_child(msup);

        assert_eq!(math_root(tree, mi), Some(math));
        assert_eq!(math_root(tree, doc.body()), None);
        assert_eq!(skip_wrappers(tree, math), msup);
        assert!(is_token(tree, mi));
        assert!(is_layout(tree, msup));
    }
}
