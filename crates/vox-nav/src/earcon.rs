//! Earcons
//!
//! Short audio cues attached to descriptions and boundary events.

use vox_a11y::{AriaRole, NodeState};
use vox_dom::{DomTree, NodeId};

/// Audio cue id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Earcon {
    Button,
    CheckOn,
    CheckOff,
    EditableText,
    Link,
    ListItem,
    Listbox,
    PopUpButton,
    Selection,
    SpecialContent,
    ObjectEnter,
    ObjectExit,
    Wrap,
    WrapEdge,
    /// Key with no command bound to it
    InvalidKeypress,
}

/// Cue for a node, from its role and states
pub fn for_node(tree: &DomTree, id: NodeId) -> Option<Earcon> {
    if vox_a11y::is_editable(tree, id) {
        return Some(Earcon::EditableText);
    }
    let role = vox_a11y::get_role(tree, id)?;
    Some(match role {
        AriaRole::Button => {
            if tree.attribute(id, "aria-haspopup").is_some_and(|v| v != "false") {
                Earcon::PopUpButton
            } else {
                Earcon::Button
            }
        }
        AriaRole::Checkbox
        | AriaRole::Radio
        | AriaRole::Switch
        | AriaRole::MenuItemCheckbox
        | AriaRole::MenuItemRadio => {
            if vox_a11y::states(tree, id).contains(&NodeState::Checked) {
                Earcon::CheckOn
            } else {
                Earcon::CheckOff
            }
        }
        AriaRole::TextBox | AriaRole::SearchBox => Earcon::EditableText,
        AriaRole::Link => Earcon::Link,
        AriaRole::ListItem => Earcon::ListItem,
        AriaRole::Listbox => Earcon::Listbox,
        AriaRole::Combobox => Earcon::PopUpButton,
        AriaRole::Option => Earcon::Selection,
        AriaRole::Math => Earcon::SpecialContent,
        _ => return None,
    })
}

/// Cue for entering a container
pub fn for_container(role: AriaRole) -> Option<Earcon> {
    matches!(role, AriaRole::List | AriaRole::Table | AriaRole::Grid | AriaRole::Dialog)
        .then_some(Earcon::ObjectEnter)
}
