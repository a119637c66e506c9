//! Role resolution
//!
//! Explicit `role` attributes win; otherwise HTML and MathML elements map to
//! their implicit ARIA role.

use vox_dom::{DomTree, Namespace, NodeId};

use crate::aria::AriaRole;

/// Role of a node, explicit first, then implicit
pub fn get_role(tree: &DomTree, id: NodeId) -> Option<AriaRole> {
    explicit_role(tree, id).or_else(|| implicit_role(tree, id))
}

/// Role from the `role` attribute only
pub fn explicit_role(tree: &DomTree, id: NodeId) -> Option<AriaRole> {
    tree.attribute(id, "role").and_then(AriaRole::parse_list)
}

/// Role implied by the element itself
pub fn implicit_role(tree: &DomTree, id: NodeId) -> Option<AriaRole> {
    let tag = tree.tag_name(id)?;

    if tree.namespace(id) == Some(Namespace::MathMl) {
        return (tag == "math").then_some(AriaRole::Math);
    }

    Some(match tag {
        "a" | "area" if tree.has_attribute(id, "href") => AriaRole::Link,
        "button" => AriaRole::Button,
        "input" => return input_role(tree, id),
        "textarea" => AriaRole::TextBox,
        "select" => {
            let multiple = tree.has_attribute(id, "multiple");
            let size = tree
                .attribute(id, "size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(1);
            if multiple || size > 1 {
                AriaRole::Listbox
            } else {
                AriaRole::Combobox
            }
        }
        "option" => AriaRole::Option,
        "img" => {
            if tree.attribute(id, "alt") == Some("") && !tree.has_attribute(id, "title") {
                AriaRole::Presentation
            } else {
                AriaRole::Img
            }
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => AriaRole::Heading,
        "ul" | "ol" | "menu" | "dl" => AriaRole::List,
        "li" => AriaRole::ListItem,
        "dt" => AriaRole::Term,
        "dd" => AriaRole::Definition,
        "table" => AriaRole::Table,
        "thead" | "tbody" | "tfoot" => AriaRole::RowGroup,
        "tr" => AriaRole::Row,
        "td" => AriaRole::Cell,
        "th" => {
            if tree.attribute(id, "scope") == Some("row") {
                AriaRole::RowHeader
            } else {
                AriaRole::ColumnHeader
            }
        }
        "nav" => AriaRole::Navigation,
        "main" => AriaRole::Main,
        "header" if !in_sectioning_content(tree, id) => AriaRole::Banner,
        "footer" if !in_sectioning_content(tree, id) => AriaRole::ContentInfo,
        "aside" => AriaRole::Complementary,
        "form" => AriaRole::Form,
        "section" if has_label(tree, id) => AriaRole::Region,
        "article" => AriaRole::Article,
        "dialog" => AriaRole::Dialog,
        "p" => AriaRole::Paragraph,
        "blockquote" => AriaRole::Blockquote,
        "hr" => AriaRole::Separator,
        "progress" | "meter" => AriaRole::ProgressBar,
        "figure" => AriaRole::Figure,
        "fieldset" | "details" => AriaRole::Group,
        "math" => AriaRole::Math,
        _ => return None,
    })
}

fn input_role(tree: &DomTree, id: NodeId) -> Option<AriaRole> {
    let kind = tree
        .attribute(id, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default();
    Some(match kind.as_str() {
        "hidden" => return None,
        "checkbox" => AriaRole::Checkbox,
        "radio" => AriaRole::Radio,
        "button" | "submit" | "reset" | "image" => AriaRole::Button,
        "range" => AriaRole::Slider,
        "number" => AriaRole::SpinButton,
        "search" => AriaRole::SearchBox,
        _ => AriaRole::TextBox,
    })
}

fn in_sectioning_content(tree: &DomTree, id: NodeId) -> bool {
    tree.ancestors(id).any(|a| {
        matches!(
            tree.tag_name(a),
            Some("article" | "aside" | "main" | "nav" | "section")
        )
    })
}

fn has_label(tree: &DomTree, id: NodeId) -> bool {
    tree.attribute(id, "aria-label").is_some_and(|l| !l.trim().is_empty())
        || tree.has_attribute(id, "aria-labelledby")
}

/// Heading level: h1..h6, or aria-level on role=heading (default 2)
pub fn heading_level(tree: &DomTree, id: NodeId) -> Option<u8> {
    if explicit_role(tree, id) == Some(AriaRole::Heading) {
        let level = tree
            .attribute(id, "aria-level")
            .and_then(|l| l.trim().parse::<u8>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(2);
        return Some(level);
    }
    match tree.tag_name(id)? {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}
