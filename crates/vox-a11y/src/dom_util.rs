//! DOM content oracle
//!
//! Answers "is this hidden", "does this render anything" and "is this an
//! object leaf" for the walkers.

use vox_dom::{DomTree, NodeData, NodeId};

use crate::aria::{AriaAttributes, AriaRole, AriaState};
use crate::role::get_role;

/// Elements that never render
const NON_RENDERED: &[&str] = &[
    "head", "script", "style", "template", "noscript", "title", "meta", "link",
];

/// Form controls
const CONTROLS: &[&str] = &["input", "select", "textarea", "button"];

/// Elements that always have content even without text
const EMBEDDED: &[&str] = &[
    "iframe", "frame", "embed", "object", "video", "audio", "canvas", "math", "hr",
];

/// Elements whose children are never visited
const LEAF_TAGS: &[&str] = &[
    "img", "input", "select", "textarea", "button", "iframe", "frame", "object", "embed",
    "video", "audio", "canvas", "math",
];

/// Input types that hold editable text
const TEXT_INPUT_TYPES: &[&str] = &[
    "", "text", "email", "password", "search", "tel", "url", "number",
];

/// Check the element itself is hidden from the user
pub fn is_hidden(tree: &DomTree, id: NodeId) -> bool {
    let Some(tag) = tree.tag_name(id) else {
        return false;
    };
    if NON_RENDERED.contains(&tag) || tree.has_attribute(id, "hidden") {
        return true;
    }
    if tag == "input" && input_type(tree, id) == "hidden" {
        return true;
    }
    if tree.attribute(id, "aria-hidden").is_some_and(|v| v.trim() == "true") {
        return true;
    }
    tree.attribute(id, "style").is_some_and(style_hides)
}

fn style_hides(style: &str) -> bool {
    style.split(';').any(|decl| {
        let Some((prop, value)) = decl.split_once(':') else {
            return false;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        (prop == "display" && value == "none") || (prop == "visibility" && value == "hidden")
    })
}

/// Check the node or any ancestor is hidden
pub fn is_hidden_in_tree(tree: &DomTree, id: NodeId) -> bool {
    is_hidden(tree, id) || tree.ancestors(id).any(|a| is_hidden(tree, a))
}

/// Lowercased `type` of an input, empty when absent
pub fn input_type(tree: &DomTree, id: NodeId) -> String {
    tree.attribute(id, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Check the node renders something a user can perceive
pub fn has_content(tree: &DomTree, id: NodeId) -> bool {
    if tree.ancestors(id).any(|a| is_hidden(tree, a)) {
        return false;
    }
    has_content_local(tree, id)
}

fn has_content_local(tree: &DomTree, id: NodeId) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    match &node.data {
        NodeData::Text(text) => !text.content.trim().is_empty(),
        NodeData::Document => tree.children(id).any(|(c, _)| has_content_local(tree, c)),
        NodeData::Element(_) => {
            if is_hidden(tree, id) {
                return false;
            }
            let tag = tree.tag_name(id).unwrap_or_default();
            if CONTROLS.contains(&tag) || EMBEDDED.contains(&tag) {
                return true;
            }
            if tag == "img" {
                return tree.attribute(id, "alt") != Some("") || tree.has_attribute(id, "title");
            }
            if tree.attribute(id, "aria-label").is_some_and(|l| !l.trim().is_empty()) {
                return true;
            }
            if get_role(tree, id).is_some_and(|r| r.is_leaf_role()) && is_focusable(tree, id) {
                return true;
            }
            tree.children(id).any(|(c, _)| has_content_local(tree, c))
        }
        NodeData::Comment(_) | NodeData::Doctype { .. } => false,
    }
}

/// Elements whose subtree is read as a unit regardless of structure
pub fn is_intrinsic_leaf(tree: &DomTree, id: NodeId) -> bool {
    let Some(tag) = tree.tag_name(id) else {
        return false;
    };
    if is_hidden(tree, id) || LEAF_TAGS.contains(&tag) {
        return true;
    }
    let role = get_role(tree, id);
    if role.is_some_and(|r| r.is_leaf_role()) {
        return true;
    }
    match role {
        Some(AriaRole::Link) => !tree
            .descendants(id)
            .skip(1)
            .any(|d| get_role(tree, d) == Some(AriaRole::Heading)),
        Some(AriaRole::Heading) => !tree.descendants(id).skip(1).any(|d| is_control(tree, d)),
        _ => false,
    }
}

/// Check a node is a leaf for object navigation
///
/// Monotonic: once a node is a leaf every descendant is one too, because
/// intrinsic leaves pass their leafness down to their subtree.
pub fn is_leaf_node(tree: &DomTree, id: NodeId) -> bool {
    let Some(node) = tree.get(id) else {
        return true;
    };
    match node.data {
        NodeData::Document => return !tree.has_children(id),
        NodeData::Element(_) => {}
        _ => return true,
    }
    if !tree.has_children(id) || is_intrinsic_leaf(tree, id) {
        return true;
    }
    if !tree.element_children(id).any(|c| has_content_local(tree, c)) {
        return true;
    }
    inner_ancestors(tree, id).any(|a| is_intrinsic_leaf(tree, a))
}

/// Element ancestors below the `<html>` element, innermost first
pub fn inner_ancestors(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.ancestors(id)
        .take_while(move |&a| tree.is_element(a) && !tree.is_tag(a, "html"))
}

/// Form control element (input, select, textarea, button)
pub fn is_control(tree: &DomTree, id: NodeId) -> bool {
    tree.tag_name(id).is_some_and(|t| CONTROLS.contains(&t)) && !is_hidden(tree, id)
}

/// Check the node accepts keyboard focus
pub fn is_focusable(tree: &DomTree, id: NodeId) -> bool {
    let Some(tag) = tree.tag_name(id) else {
        return false;
    };
    if tree.has_attribute(id, "disabled") && CONTROLS.contains(&tag) {
        return false;
    }
    if let Some(index) = tree.attribute(id, "tabindex") {
        return index.trim().parse::<i32>().is_ok_and(|i| i >= 0);
    }
    match tag {
        "a" | "area" => tree.has_attribute(id, "href"),
        "input" => input_type(tree, id) != "hidden",
        "select" | "textarea" | "button" | "iframe" => true,
        _ => is_content_editable(tree, id),
    }
}

fn is_content_editable(tree: &DomTree, id: NodeId) -> bool {
    tree.attribute(id, "contenteditable")
        .is_some_and(|v| matches!(v.trim(), "" | "true" | "plaintext-only"))
}

/// Check the node holds editable text whose value can change under the cursor
pub fn is_editable(tree: &DomTree, id: NodeId) -> bool {
    match tree.tag_name(id) {
        Some("textarea") => true,
        Some("input") => TEXT_INPUT_TYPES.contains(&input_type(tree, id).as_str()),
        Some(_) => is_content_editable(tree, id),
        None => false,
    }
}

/// Check the node or an ancestor is editable
pub fn is_in_editable(tree: &DomTree, id: NodeId) -> bool {
    is_editable(tree, id) || tree.ancestors(id).any(|a| is_editable(tree, a))
}

/// Text of a node as the selection walkers see it
///
/// Text inputs report their value and images their alt text. Whitespace is
/// collapsed outside preformatted content and `<br>` becomes a line break.
pub fn get_node_text(tree: &DomTree, id: NodeId) -> String {
    match tree.tag_name(id) {
        Some("input") | Some("textarea") if is_editable(tree, id) => {
            return crate::name::get_value(tree, id);
        }
        Some("img") => return tree.attribute(id, "alt").unwrap_or_default().to_string(),
        _ => {}
    }
    let preformatted = is_preformatted(tree, id);
    let mut out = String::new();
    collect_node_text(tree, id, preformatted, &mut out);
    if preformatted {
        out
    } else {
        out.split('\n')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

fn is_preformatted(tree: &DomTree, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .any(|a| matches!(tree.tag_name(a), Some("pre" | "textarea")))
}

fn collect_node_text(tree: &DomTree, id: NodeId, preformatted: bool, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Text(text) if preformatted => out.push_str(&text.content),
        NodeData::Text(text) => {
            let starts_ws = text.content.starts_with(char::is_whitespace);
            let ends_ws = text.content.ends_with(char::is_whitespace);
            let collapsed = collapse_whitespace(&text.content);
            if starts_ws && !out.is_empty() && !out.ends_with([' ', '\n']) {
                out.push(' ');
            }
            out.push_str(&collapsed);
            if ends_ws && !collapsed.is_empty() {
                out.push(' ');
            }
        }
        NodeData::Element(_) if is_hidden(tree, id) => {}
        NodeData::Element(_) if tree.is_tag(id, "br") => out.push('\n'),
        NodeData::Element(_) | NodeData::Document => {
            for (child, _) in tree.children(id) {
                collect_node_text(tree, child, preformatted, out);
            }
        }
        _ => {}
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Announced state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Checked,
    NotChecked,
    Mixed,
    Pressed,
    NotPressed,
    Expanded,
    Collapsed,
    Selected,
    Disabled,
    Required,
    Invalid,
}

impl NodeState {
    /// Spoken form
    pub fn message(&self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::NotChecked => "not checked",
            Self::Mixed => "partially checked",
            Self::Pressed => "pressed",
            Self::NotPressed => "not pressed",
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
            Self::Selected => "selected",
            Self::Disabled => "disabled",
            Self::Required => "required",
            Self::Invalid => "invalid entry",
        }
    }

    /// Braille form
    pub fn braille(&self) -> &'static str {
        match self {
            Self::Checked => "(x)",
            Self::NotChecked => "( )",
            Self::Mixed => "(-)",
            Self::Pressed => "=",
            Self::NotPressed => "",
            Self::Expanded => "-",
            Self::Collapsed => "+",
            Self::Selected => "sel",
            Self::Disabled => "xx",
            Self::Required => "req",
            Self::Invalid => "!",
        }
    }
}

/// States of a node in announcement order
pub fn states(tree: &DomTree, id: NodeId) -> Vec<NodeState> {
    let mut out = Vec::new();
    if !tree.is_element(id) {
        return out;
    }
    let aria = AriaAttributes::from_element(tree, id);
    let role = get_role(tree, id);

    let tri = |value: Option<bool>, on, off| match value {
        Some(true) => on,
        Some(false) => off,
        None => NodeState::Mixed,
    };

    match aria.checked() {
        Some(checked) => out.push(tri(checked, NodeState::Checked, NodeState::NotChecked)),
        None if matches!(role, Some(AriaRole::Checkbox | AriaRole::Radio | AriaRole::Switch))
            && tree.is_tag(id, "input") =>
        {
            out.push(if tree.has_attribute(id, "checked") {
                NodeState::Checked
            } else {
                NodeState::NotChecked
            });
        }
        None => {}
    }
    if let Some(pressed) = aria.pressed() {
        out.push(tri(pressed, NodeState::Pressed, NodeState::NotPressed));
    }
    match aria.is_expanded() {
        Some(true) => out.push(NodeState::Expanded),
        Some(false) => out.push(NodeState::Collapsed),
        None => {}
    }
    if aria.has(&AriaState::Selected(true))
        || (tree.is_tag(id, "option") && tree.has_attribute(id, "selected"))
    {
        out.push(NodeState::Selected);
    }
    if aria.has(&AriaState::Disabled(true)) || (is_control(tree, id) && tree.has_attribute(id, "disabled")) {
        out.push(NodeState::Disabled);
    }
    if aria.has(&AriaState::Required(true)) || (is_control(tree, id) && tree.has_attribute(id, "required")) {
        out.push(NodeState::Required);
    }
    if aria.has(&AriaState::Invalid(true)) {
        out.push(NodeState::Invalid);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(tags: &[(&str, &[(&str, &str)], Option<&str>)]) -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(tree.root(), body).unwrap();
        let mut ids = Vec::new();
        for (tag, attrs, text) in tags {
            let id = tree.create_element(tag);
            for (k, v) in *attrs {
                tree.set_attribute(id, k, v).unwrap();
            }
            if let Some(text) = text {
                let t = tree.create_text(text);
                tree.append_child(id, t).unwrap();
            }
            tree.append_child(body, id).unwrap();
            ids.push(id);
        }
        (tree, ids)
    }

    #[test]
    fn test_has_content() {
        let (tree, ids) = build(&[
            ("p", &[], Some("Hello")),
            ("p", &[], Some("   ")),
            ("img", &[("alt", "")], None),
            ("img", &[("alt", "Logo")], None),
            ("input", &[], None),
            ("div", &[("hidden", "")], Some("secret")),
            ("div", &[("style", "display: none")], Some("secret")),
            ("div", &[], None),
        ]);
        let got: Vec<bool> = ids.iter().map(|&id| has_content(&tree, id)).collect();
        assert_eq!(got, vec![true, false, false, true, true, false, false, false]);
    }

    #[test]
    fn test_text_inside_hidden_has_no_content() {
        let (tree, ids) = build(&[("div", &[("aria-hidden", "true")], Some("secret"))]);
        let text = tree.first_child(ids[0]);
        assert!(!has_content(&tree, text));
    }

    #[test]
    fn test_leaf_rules() {
        let (mut tree, ids) = build(&[
            ("p", &[], Some("Hello")),
            ("button", &[], Some("Go")),
            ("div", &[], None),
        ]);
        let span = tree.create_element("span");
        let t = tree.create_text("inner");
        tree.append_child(span, t).unwrap();
        tree.append_child(ids[2], span).unwrap();

        assert!(is_leaf_node(&tree, ids[0]));
        assert!(is_leaf_node(&tree, ids[1]));
        assert!(is_leaf_node(&tree, tree.first_child(ids[1])));
        assert!(!is_leaf_node(&tree, ids[2]));
        assert!(is_leaf_node(&tree, span));
    }

    #[test]
    fn test_node_text_collapses_and_breaks_lines() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let a = tree.create_text("  One\n   two ");
        let br = tree.create_element("br");
        let b = tree.create_text("three");
        tree.append_child(tree.root(), p).unwrap();
        tree.append_child(p, a).unwrap();
        tree.append_child(p, br).unwrap();
        tree.append_child(p, b).unwrap();
        assert_eq!(get_node_text(&tree, p), "One two\nthree");
    }

    #[test]
    fn test_states() {
        let (tree, ids) = build(&[
            ("input", &[("type", "checkbox"), ("checked", "")], None),
            ("div", &[("role", "button"), ("aria-pressed", "false")], None),
            ("input", &[("required", ""), ("disabled", "")], None),
        ]);
        assert_eq!(states(&tree, ids[0]), vec![NodeState::Checked]);
        assert_eq!(states(&tree, ids[1]), vec![NodeState::NotPressed]);
        assert_eq!(states(&tree, ids[2]), vec![NodeState::Disabled, NodeState::Required]);
    }

    #[test]
    fn test_focusable_and_editable() {
        let (tree, ids) = build(&[
            ("a", &[("href", "/x")], Some("x")),
            ("div", &[("tabindex", "-1")], None),
            ("div", &[("contenteditable", "true")], None),
            ("input", &[("type", "checkbox")], None),
        ]);
        assert!(is_focusable(&tree, ids[0]));
        assert!(!is_focusable(&tree, ids[1]));
        assert!(is_editable(&tree, ids[2]));
        assert!(!is_editable(&tree, ids[3]));
    }
}
