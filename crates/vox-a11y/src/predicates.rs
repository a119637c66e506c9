//! DOM predicates for semantic jumps
//!
//! Each predicate looks at an ancestor chain (the node itself first, then
//! its ancestors, innermost first) and returns the matching node.

use vox_dom::{DomTree, NodeId};

use crate::aria::AriaRole;
use crate::dom_util::{is_control, is_editable};
use crate::role::{get_role, heading_level};

/// Semantic jump target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomPredicate {
    Link,
    /// Any heading, or a heading of the given level
    Heading(Option<u8>),
    Button,
    EditText,
    Checkbox,
    Combobox,
    List,
    Table,
    FormField,
    Landmark,
    Graphic,
    Math,
    Blockquote,
    Role(AriaRole),
}

impl DomPredicate {
    /// First node of `chain` that matches
    pub fn find(&self, tree: &DomTree, chain: &[NodeId]) -> Option<NodeId> {
        chain.iter().copied().find(|&id| self.matches(tree, id))
    }

    /// Check a single node
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        if !tree.is_element(id) {
            return false;
        }
        let role = get_role(tree, id);
        match self {
            Self::Link => role == Some(AriaRole::Link),
            Self::Heading(None) => role == Some(AriaRole::Heading),
            Self::Heading(Some(level)) => {
                role == Some(AriaRole::Heading) && heading_level(tree, id) == Some(*level)
            }
            Self::Button => role == Some(AriaRole::Button),
            Self::EditText => is_editable(tree, id),
            Self::Checkbox => matches!(role, Some(AriaRole::Checkbox | AriaRole::MenuItemCheckbox)),
            Self::Combobox => matches!(role, Some(AriaRole::Combobox | AriaRole::Listbox)),
            Self::List => role == Some(AriaRole::List),
            Self::Table => matches!(role, Some(AriaRole::Table | AriaRole::Grid | AriaRole::TreeGrid)),
            Self::FormField => is_control(tree, id) || role.is_some_and(|r| r.is_widget() && r != AriaRole::Link),
            Self::Landmark => role.is_some_and(|r| r.is_landmark()),
            Self::Graphic => role == Some(AriaRole::Img),
            Self::Math => role == Some(AriaRole::Math),
            Self::Blockquote => role == Some(AriaRole::Blockquote),
            Self::Role(wanted) => role == Some(*wanted),
        }
    }

    /// Noun used in "No next ..." announcements
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Heading(None) => "heading",
            Self::Heading(Some(1)) => "level 1 heading",
            Self::Heading(Some(2)) => "level 2 heading",
            Self::Heading(Some(3)) => "level 3 heading",
            Self::Heading(Some(4)) => "level 4 heading",
            Self::Heading(Some(5)) => "level 5 heading",
            Self::Heading(Some(_)) => "level 6 heading",
            Self::Button => "button",
            Self::EditText => "edit text",
            Self::Checkbox => "check box",
            Self::Combobox => "combo box",
            Self::List => "list",
            Self::Table => "table",
            Self::FormField => "form field",
            Self::Landmark => "landmark",
            Self::Graphic => "graphic",
            Self::Math => "math",
            Self::Blockquote => "block quote",
            Self::Role(_) => "match",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_returns_matching_ancestor() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        tree.set_attribute(a, "href", "/").unwrap();
        let span = tree.create_element("span");
        let text = tree.create_text("Home");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, span).unwrap();
        tree.append_child(span, text).unwrap();

        let chain = [text, span, a, tree.root()];
        assert_eq!(DomPredicate::Link.find(&tree, &chain), Some(a));
        assert_eq!(DomPredicate::Button.find(&tree, &chain), None);
    }

    #[test]
    fn test_heading_level() {
        let mut tree = DomTree::new();
        let h2 = tree.create_element("h2");
        tree.append_child(tree.root(), h2).unwrap();
        assert!(DomPredicate::Heading(None).matches(&tree, h2));
        assert!(DomPredicate::Heading(Some(2)).matches(&tree, h2));
        assert!(!DomPredicate::Heading(Some(1)).matches(&tree, h2));
    }
}
