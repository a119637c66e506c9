//! Math walkers
//!
//! One walker type, four policies for what counts as a stop inside a
//! `<math>` subtree.

use serde::{Deserialize, Serialize};
use vox_dom::{Document, DomTree, NodeId};

use super::speech::{linear_math, math_role_name, speak_math};
use super::{is_layout, is_token, is_visible_text, math_children, math_root};
use crate::braille::NavBraille;
use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::earcon::Earcon;
use crate::error::{NavError, NavResult};
use crate::walker::Walker;

/// What a math move visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathWalkerKind {
    /// Siblings in the MathML tree, elements and text alike
    #[default]
    Tree,
    /// Sibling elements only
    Layout,
    /// Token elements in document order
    Token,
    /// Text leaves in document order
    Leaf,
}

impl MathWalkerKind {
    /// Check moves follow document order rather than siblings
    pub fn is_flat(self) -> bool {
        matches!(self, Self::Token | Self::Leaf)
    }
}

/// Walker over the inside of a `<math>` element
#[derive(Debug, Clone, Copy, Default)]
pub struct MathWalker {
    kind: MathWalkerKind,
}

impl MathWalker {
    pub fn new(kind: MathWalkerKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> MathWalkerKind {
        self.kind
    }

    /// Check `id` is a stop for this walker
    pub fn is_unit(&self, tree: &DomTree, id: NodeId) -> bool {
        match self.kind {
            MathWalkerKind::Tree => tree.is_element(id) || is_visible_text(tree, id),
            MathWalkerKind::Layout => tree.is_element(id),
            MathWalkerKind::Token => {
                is_token(tree, id) && !tree.ancestors(id).any(|a| is_token(tree, a))
            }
            MathWalkerKind::Leaf => is_visible_text(tree, id),
        }
    }

    /// Stops of a flat walker under `root`, in document order
    pub fn units(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .skip(1)
            .filter(|&d| self.is_unit(tree, d))
            .collect()
    }

    /// Stops among the siblings of `id`, including `id`
    fn siblings(&self, tree: &DomTree, id: NodeId) -> Vec<NodeId> {
        let parent = tree.parent(id);
        if !parent.is_valid() {
            return vec![id];
        }
        math_children(tree, parent)
            .filter(|&c| self.is_unit(tree, c))
            .collect()
    }

    fn step(&self, tree: &DomTree, root: NodeId, node: NodeId, reversed: bool) -> Option<NodeId> {
        let row = if self.kind.is_flat() {
            self.units(tree, root)
        } else {
            if node == root {
                return None;
            }
            self.siblings(tree, node)
        };
        let pos = row.iter().position(|&n| n == node)?;
        if reversed {
            pos.checked_sub(1).map(|i| row[i])
        } else {
            row.get(pos + 1).copied()
        }
    }

    fn root_of(&self, tree: &DomTree, node: NodeId) -> NavResult<NodeId> {
        math_root(tree, node).ok_or(NavError::NotInMath)
    }
}

impl Walker for MathWalker {
    fn name(&self) -> &'static str {
        match self.kind {
            MathWalkerKind::Tree => "mathml tree",
            MathWalkerKind::Layout => "mathml layout",
            MathWalkerKind::Token => "mathml token",
            MathWalkerKind::Leaf => "mathml leaf",
        }
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        let tree = doc.tree();
        let node = sel.directed_node();
        if !tree.is_attached(node) {
            return Err(NavError::StaleSelection(node));
        }
        let root = self.root_of(tree, node)?;
        Ok(self
            .step(tree, root, node, sel.reversed)
            .map(|n| CursorSelection::from_node(tree, n).set_reversed(sel.reversed)))
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection> {
        let tree = doc.tree();
        let node = sel.directed_node();
        let root = self.root_of(tree, node)?;
        let reversed = sel.reversed;

        if node != root && self.is_unit(tree, node) {
            return Ok(CursorSelection::from_node(tree, node).set_reversed(reversed));
        }
        let target = if self.kind.is_flat() {
            // a unit inside the node, else the unit around it
            let units = self.units(tree, root);
            units
                .iter()
                .copied()
                .find(|&u| tree.contains(node, u))
                .or_else(|| units.iter().copied().find(|&u| tree.contains(u, node)))
                .unwrap_or(root)
        } else if node == root {
            root
        } else {
            std::iter::once(node)
                .chain(tree.ancestors(node))
                .find(|&a| a == root || self.is_unit(tree, a))
                .unwrap_or(root)
        };
        Ok(CursorSelection::from_node(tree, target).set_reversed(reversed))
    }

    fn description(
        &self,
        doc: &Document,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> Vec<NavDescription> {
        let tree = doc.tree();
        let node = sel.start.node;
        let Some(root) = math_root(tree, node) else {
            return Vec::new();
        };

        let mut desc = NavDescription {
            text: speak_math(tree, node),
            ..Default::default()
        };
        let entered = !tree.is_attached(prev.start.node) || math_root(tree, prev.start.node) != Some(root);
        if entered {
            desc.context = "Math".to_string();
            desc.earcons.push(Earcon::SpecialContent);
        }
        if tree.is_element(node) && (!is_token(tree, node) || self.kind.is_flat()) {
            desc.annotation = math_role_name(tree, node).to_string();
        }
        if desc.text.is_empty() && desc.annotation.is_empty() {
            desc.annotation = "blank".to_string();
        }
        vec![desc]
    }

    fn braille(
        &self,
        doc: &Document,
        _prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> NavResult<NavBraille> {
        let tree = doc.tree();
        let node = sel.start.node;
        self.root_of(tree, node)?;
        let text = linear_math(tree, node);
        let len = text.chars().count();
        Ok(NavBraille::new(text, 0, len))
    }

    fn granularity_msg(&self) -> &'static str {
        match self.kind {
            MathWalkerKind::Tree => "Math tree",
            MathWalkerKind::Layout => "Math layout",
            MathWalkerKind::Token => "Math token",
            MathWalkerKind::Leaf => "Math leaf",
        }
    }
}

/// Check `id` is a layout schema a layout walker can descend into
pub(crate) fn descends_in_layout(tree: &DomTree, id: NodeId) -> bool {
    is_layout(tree, id) || tree.is_tag(id, "math")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, NodeId) {
        let doc = vox_html::parse("<p>before</p><math><mi>x</mi><mo>+</mo><msup><mi>y</mi><mn>2</mn></msup></math>");
        let tree = doc.tree();
        let math = tree.descendants(tree.root()).find(|&n| tree.is_tag(n, "math")).unwrap();
        (doc, math)
    }

    #[test]
    fn test_tree_walker_moves_between_siblings() {
        let (doc, math) = setup();
        let tree = doc.tree();
        let walker = MathWalker::new(MathWalkerKind::Tree);
        let x = tree.first_child(math);

        let plus = walker.next(&doc, &CursorSelection::from_node(tree, x)).unwrap().unwrap();
        assert!(tree.is_tag(plus.start.node, "mo"));
        let sup = walker.next(&doc, &plus).unwrap().unwrap();
        assert!(tree.is_tag(sup.start.node, "msup"));
        assert!(walker.next(&doc, &sup).unwrap().is_none());
        let back = walker.previous(&doc, &sup).unwrap().unwrap();
        assert_eq!(back.start.node, plus.start.node);
    }

    #[test]
    fn test_token_walker_flattens() {
        let (doc, math) = setup();
        let tree = doc.tree();
        let walker = MathWalker::new(MathWalkerKind::Token);
        let names: Vec<String> = walker
            .units(tree, math)
            .into_iter()
            .map(|u| tree.text_content(u))
            .collect();
        assert_eq!(names, vec!["x", "+", "y", "2"]);

        let msup = tree.descendants(math).find(|&n| tree.is_tag(n, "msup")).unwrap();
        let synced = walker.sync(&doc, &CursorSelection::from_node(tree, msup)).unwrap();
        assert_eq!(tree.text_content(synced.start.node), "y");
    }

    #[test]
    fn test_outside_math_is_an_error() {
        let (doc, _) = setup();
        let tree = doc.tree();
        let p = tree.first_child(doc.body());
        let err = MathWalker::default()
            .next(&doc, &CursorSelection::from_node(tree, p))
            .unwrap_err();
        assert!(matches!(err, NavError::NotInMath));
    }

    #[test]
    fn test_description_enters_math() {
        let (doc, math) = setup();
        let tree = doc.tree();
        let walker = MathWalker::default();
        let p = tree.first_child(doc.body());
        let x = tree.first_child(math);
        let desc = walker.description(
            &doc,
            &CursorSelection::from_node(tree, p),
            &CursorSelection::from_node(tree, x),
        );
        assert_eq!(desc[0].context, "Math");
        assert_eq!(desc[0].text, "x");
        assert_eq!(desc[0].earcons, vec![Earcon::SpecialContent]);
    }
}
