//! Accessible name and value
//!
//! Text alternative computation in the usual precedence order:
//! aria-labelledby, aria-label, native alternatives (alt, label, alttext),
//! title, placeholder, then the flattened subtree.

use vox_dom::{DomTree, NodeData, NodeId};

use crate::aria::{AriaAttributes, AriaRole};
use crate::dom_util::{collapse_whitespace, input_type, is_control, is_hidden};
use crate::role::get_role;

/// Roles that never take their name from their content
fn name_from_content_forbidden(role: Option<AriaRole>) -> bool {
    matches!(
        role,
        Some(
            AriaRole::TextBox
                | AriaRole::SearchBox
                | AriaRole::Combobox
                | AriaRole::Listbox
                | AriaRole::Slider
                | AriaRole::SpinButton
                | AriaRole::ProgressBar
                | AriaRole::Separator
                | AriaRole::Img
        )
    )
}

/// Find an element anywhere in the tree by its `id` attribute
pub fn element_by_id(tree: &DomTree, id: &str) -> Option<NodeId> {
    tree.descendants(tree.root())
        .find(|&node| tree.attribute(node, "id") == Some(id))
}

/// Accessible name of a node, whitespace collapsed
pub fn get_name(tree: &DomTree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    if let NodeData::Text(text) = &node.data {
        return collapse_whitespace(&text.content);
    }
    if !node.is_element() {
        return String::new();
    }

    let aria = AriaAttributes::from_element(tree, id);

    let labelled: Vec<String> = aria
        .labelled_by()
        .iter()
        .filter_map(|ref_id| element_by_id(tree, ref_id))
        .filter(|&target| target != id)
        .map(|target| name_from_subtree(tree, target))
        .filter(|s| !s.is_empty())
        .collect();
    if !labelled.is_empty() {
        return labelled.join(" ");
    }

    if let Some(label) = aria.label() {
        return collapse_whitespace(label);
    }

    let tag = tree.tag_name(id).unwrap_or_default();
    let native = match tag {
        "img" | "area" => tree.attribute(id, "alt").map(collapse_whitespace),
        "input" if input_type(tree, id) == "image" => tree.attribute(id, "alt").map(collapse_whitespace),
        "input" if matches!(input_type(tree, id).as_str(), "submit" | "reset" | "button") => {
            tree.attribute(id, "value").map(collapse_whitespace)
        }
        "math" => tree.attribute(id, "alttext").map(collapse_whitespace),
        _ if is_control(tree, id) => label_for(tree, id),
        _ => None,
    };
    if let Some(native) = native.filter(|s| !s.is_empty()) {
        return native;
    }

    let role = get_role(tree, id);
    if !name_from_content_forbidden(role) && tag != "math" {
        let content = name_from_subtree(tree, id);
        if !content.is_empty() {
            return content;
        }
    }

    for attr in ["title", "placeholder"] {
        if let Some(value) = tree.attribute(id, attr).map(collapse_whitespace) {
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// Text of an associated `<label>`: `for=` first, then a wrapping label
fn label_for(tree: &DomTree, id: NodeId) -> Option<String> {
    if let Some(control_id) = tree.attribute(id, "id") {
        let label = tree
            .descendants(tree.root())
            .find(|&n| tree.is_tag(n, "label") && tree.attribute(n, "for") == Some(control_id));
        if let Some(label) = label {
            return Some(name_from_subtree(tree, label));
        }
    }
    let wrapping = tree.ancestors(id).find(|&a| tree.is_tag(a, "label"))?;
    let mut out = String::new();
    collect_name(tree, wrapping, Some(id), &mut out);
    Some(collapse_whitespace(&out))
}

/// Flattened, whitespace-collapsed text of a subtree
///
/// Hidden content is skipped, images contribute their alt text and
/// controls their value.
pub fn name_from_subtree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    collect_name(tree, id, None, &mut out);
    collapse_whitespace(&out)
}

fn collect_name(tree: &DomTree, id: NodeId, skip: Option<NodeId>, out: &mut String) {
    if Some(id) == skip {
        return;
    }
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Text(text) => out.push_str(&text.content),
        NodeData::Element(_) => {
            if is_hidden(tree, id) {
                return;
            }
            match tree.tag_name(id) {
                Some("img") => {
                    if let Some(alt) = tree.attribute(id, "alt") {
                        out.push(' ');
                        out.push_str(alt);
                        out.push(' ');
                    }
                    return;
                }
                Some("br") => {
                    out.push(' ');
                    return;
                }
                Some("math") => {
                    if let Some(alt) = tree.attribute(id, "alttext") {
                        out.push(' ');
                        out.push_str(alt);
                        out.push(' ');
                        return;
                    }
                }
                Some("input" | "select" | "textarea") => {
                    out.push(' ');
                    out.push_str(&get_value(tree, id));
                    out.push(' ');
                    return;
                }
                _ => {}
            }
            if let Some(label) = tree.attribute(id, "aria-label").filter(|l| !l.trim().is_empty()) {
                out.push(' ');
                out.push_str(label);
                out.push(' ');
                return;
            }
            for (child, _) in tree.children(id) {
                collect_name(tree, child, skip, out);
            }
        }
        _ => {}
    }
}

/// Current value of a control, empty for nodes without one
pub fn get_value(tree: &DomTree, id: NodeId) -> String {
    let Some(tag) = tree.tag_name(id) else {
        return String::new();
    };
    match tag {
        "input" => match input_type(tree, id).as_str() {
            "checkbox" | "radio" | "submit" | "reset" | "button" | "image" | "hidden" => String::new(),
            "password" => {
                let len = tree.attribute(id, "value").map_or(0, |v| v.chars().count());
                "*".repeat(len)
            }
            _ => tree.attribute(id, "value").unwrap_or_default().to_string(),
        },
        "textarea" => match tree.attribute(id, "value") {
            Some(value) => value.to_string(),
            None => tree.text_content(id),
        },
        "select" => {
            let options: Vec<NodeId> = tree
                .descendants(id)
                .filter(|&d| tree.is_tag(d, "option"))
                .collect();
            options
                .iter()
                .copied()
                .find(|&o| tree.has_attribute(o, "selected"))
                .or_else(|| options.first().copied())
                .map(|o| collapse_whitespace(&tree.text_content(o)))
                .unwrap_or_default()
        }
        "progress" | "meter" => tree.attribute(id, "value").unwrap_or_default().to_string(),
        _ => {
            let aria = AriaAttributes::from_element(tree, id);
            let ranged = matches!(
                aria.role,
                Some(AriaRole::Slider | AriaRole::SpinButton | AriaRole::ProgressBar | AriaRole::ScrollBar)
            );
            if ranged {
                return aria.value().unwrap_or_default();
            }
            if aria.role == Some(AriaRole::TextBox)
                || tree
                    .attribute(id, "contenteditable")
                    .is_some_and(|v| matches!(v.trim(), "" | "true" | "plaintext-only"))
            {
                return tree.text_content(id);
            }
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_body() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(tree.root(), body).unwrap();
        (tree, body)
    }

    fn add(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)], text: Option<&str>) -> NodeId {
        let id = tree.create_element(tag);
        for (k, v) in attrs {
            tree.set_attribute(id, k, v).unwrap();
        }
        if let Some(text) = text {
            let t = tree.create_text(text);
            tree.append_child(id, t).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_name_precedence() {
        let (mut tree, body) = with_body();
        let heading = add(&mut tree, body, "span", &[("id", "h")], Some("Shipping"));
        let labelled = add(&mut tree, body, "div", &[("aria-labelledby", "h"), ("aria-label", "x")], Some("body"));
        let labelled_only = add(&mut tree, body, "button", &[("aria-label", "Close")], Some("X"));
        let titled = add(&mut tree, body, "input", &[("title", "Search"), ("placeholder", "Type")], None);

        assert_eq!(get_name(&tree, heading), "Shipping");
        assert_eq!(get_name(&tree, labelled), "Shipping");
        assert_eq!(get_name(&tree, labelled_only), "Close");
        assert_eq!(get_name(&tree, titled), "Search");
    }

    #[test]
    fn test_label_association() {
        let (mut tree, body) = with_body();
        add(&mut tree, body, "label", &[("for", "email")], Some("Email address"));
        let input = add(&mut tree, body, "input", &[("id", "email"), ("value", "a@b.c")], None);
        let wrap = add(&mut tree, body, "label", &[], Some("Remember me "));
        let check = add(&mut tree, wrap, "input", &[("type", "checkbox")], None);

        assert_eq!(get_name(&tree, input), "Email address");
        assert_eq!(get_value(&tree, input), "a@b.c");
        assert_eq!(get_name(&tree, check), "Remember me");
    }

    #[test]
    fn test_subtree_name_uses_alt_and_skips_hidden() {
        let (mut tree, body) = with_body();
        let link = add(&mut tree, body, "a", &[("href", "/")], Some("Go "));
        add(&mut tree, link, "img", &[("alt", "home")], None);
        add(&mut tree, link, "span", &[("hidden", "")], Some("secret"));
        assert_eq!(get_name(&tree, link), "Go home");
    }

    #[test]
    fn test_select_value() {
        let (mut tree, body) = with_body();
        let select = add(&mut tree, body, "select", &[], None);
        add(&mut tree, select, "option", &[], Some("Red"));
        add(&mut tree, select, "option", &[("selected", "")], Some("Blue"));
        assert_eq!(get_value(&tree, select), "Blue");
    }
}
