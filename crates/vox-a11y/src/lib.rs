//! vox Accessibility
//!
//! Content oracle consulted by the vox navigation engine.
//!
//! Features:
//! - ARIA roles, states, properties
//! - Implicit roles for HTML and MathML elements
//! - Accessible name and value
//! - Content, object-leaf and group-leaf classification
//! - DOM predicates for semantic jumps

pub mod aria;
pub mod dom_util;
pub mod group_util;
pub mod name;
pub mod predicates;
pub mod role;

pub use aria::{AriaAttributes, AriaRole, AriaState};
pub use dom_util::{
    NodeState, collapse_whitespace, get_node_text, has_content, is_control, is_editable,
    is_focusable, is_hidden, is_hidden_in_tree, is_in_editable, is_leaf_node, states,
};
pub use group_util::{DEFAULT_GROUP_MAX_CHARS, group_text, is_breakout, is_group_leaf};
pub use name::{element_by_id, get_name, get_value, name_from_subtree};
pub use predicates::DomPredicate;
pub use role::{get_role, heading_level};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid ARIA role: {0}")]
    InvalidRole(String),
}
