//! Descriptions
//!
//! Turns a move from one selection to another into speakable pieces:
//! the containers entered on the way (context), the node's name (text),
//! its live value, and its role and states (annotation).

use std::fmt;

use vox_a11y::{AriaRole, collapse_whitespace, get_name, get_role, get_value, heading_level, states};
use vox_dom::{Document, DomTree, NodeData, NodeId};

use crate::config::Verbosity;
use crate::cursor::CursorSelection;
use crate::earcon::{self, Earcon};
use crate::math;
use crate::output::{Earcons, QueueMode, Speech, SpeechProperties};

/// Speakable description of one transition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavDescription {
    /// Containers entered, e.g. "List with 3 items"
    pub context: String,
    pub text: String,
    /// Live value such as an edit field's contents
    pub user_value: String,
    /// Role and state, e.g. "Check box checked"
    pub annotation: String,
    pub earcons: Vec<Earcon>,
    /// Voice for `text`
    pub personality: Option<SpeechProperties>,
}

impl NavDescription {
    /// Description carrying only text
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_earcon(mut self, earcon: Earcon) -> Self {
        self.earcons.push(earcon);
        self
    }

    /// Check nothing would be spoken or played
    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
            && self.text.is_empty()
            && self.user_value.is_empty()
            && self.annotation.is_empty()
            && self.earcons.is_empty()
    }

    /// Play the earcons, then speak the parts in order. The first utterance
    /// uses `mode`, the rest are queued behind it.
    pub fn speak(&self, speech: &mut dyn Speech, earcons: &mut dyn Earcons, mode: QueueMode) {
        for earcon in &self.earcons {
            earcons.play_earcon(*earcon);
        }

        let annotation = SpeechProperties::annotation();
        let parts = [
            (&self.context, None),
            (&self.text, self.personality.as_ref()),
            (&self.user_value, None),
            (&self.annotation, Some(&annotation)),
        ];
        let mut mode = mode;
        for (part, properties) in parts {
            if part.is_empty() {
                continue;
            }
            speech.speak(part, mode, properties);
            mode = QueueMode::Queue;
        }
    }
}

impl fmt::Display for NavDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.context, &self.text, &self.user_value, &self.annotation]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Strict ancestors of `node` below `root`, innermost first
fn inner_ancestors(tree: &DomTree, root: NodeId, node: NodeId) -> Vec<NodeId> {
    tree.ancestors(node).take_while(|&a| a != root && a.is_valid()).collect()
}

/// Containers of `node` that do not contain `prev`, outermost first
pub fn entered_ancestors(tree: &DomTree, root: NodeId, prev: NodeId, node: NodeId) -> Vec<NodeId> {
    let mut entered: Vec<NodeId> = inner_ancestors(tree, root, node)
        .into_iter()
        .filter(|&a| !tree.contains(a, prev))
        .collect();
    entered.reverse();
    entered
}

/// Containers of `prev` that do not contain `node`, innermost first
pub fn exited_ancestors(tree: &DomTree, root: NodeId, prev: NodeId, node: NodeId) -> Vec<NodeId> {
    inner_ancestors(tree, root, prev)
        .into_iter()
        .filter(|&a| !tree.contains(a, node))
        .collect()
}

fn list_item_count(tree: &DomTree, list: NodeId) -> usize {
    tree.element_children(list)
        .filter(|&c| matches!(get_role(tree, c), Some(AriaRole::ListItem | AriaRole::Term)))
        .count()
}

fn table_dimensions(tree: &DomTree, table: NodeId) -> (usize, usize) {
    let rows: Vec<NodeId> = tree
        .descendants(table)
        .filter(|&d| tree.is_tag(d, "tr") || get_role(tree, d) == Some(AriaRole::Row))
        .filter(|&row| {
            tree.ancestors(row)
                .find(|&a| matches!(get_role(tree, a), Some(AriaRole::Table | AriaRole::Grid)))
                == Some(table)
        })
        .collect();
    let columns = rows
        .iter()
        .map(|&row| {
            tree.element_children(row)
                .filter(|&c| matches!(tree.tag_name(c), Some("td" | "th")) || get_role(tree, c).is_some_and(|r| {
                    matches!(r, AriaRole::Cell | AriaRole::GridCell | AriaRole::ColumnHeader | AriaRole::RowHeader)
                }))
                .map(|c| {
                    tree.attribute(c, "colspan")
                        .and_then(|s| s.trim().parse::<usize>().ok())
                        .unwrap_or(1)
                        .max(1)
                })
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0);
    (rows.len(), columns)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Role phrase of a node, including counts and heading levels
fn role_phrase(tree: &DomTree, id: NodeId, role: AriaRole, verbosity: Verbosity) -> String {
    match role {
        AriaRole::Heading => match heading_level(tree, id) {
            Some(level) => format!("Heading {}", level),
            None => "Heading".to_string(),
        },
        AriaRole::List if verbosity == Verbosity::Verbose => {
            format!("List with {}", plural(list_item_count(tree, id), "item", "items"))
        }
        AriaRole::Table | AriaRole::Grid if verbosity == Verbosity::Verbose => {
            let (rows, columns) = table_dimensions(tree, id);
            format!(
                "{} with {} and {}",
                role.message(),
                plural(rows, "row", "rows"),
                plural(columns, "column", "columns")
            )
        }
        AriaRole::ListItem | AriaRole::Cell | AriaRole::GridCell | AriaRole::Row => String::new(),
        _ => role.message().to_string(),
    }
}

/// Context phrase announced when entering a container
pub fn context_message(tree: &DomTree, id: NodeId, verbosity: Verbosity) -> Option<String> {
    let role = get_role(tree, id)?;
    let announced = role.is_landmark()
        || matches!(
            role,
            AriaRole::List
                | AriaRole::Table
                | AriaRole::Grid
                | AriaRole::Heading
                | AriaRole::Link
                | AriaRole::Dialog
                | AriaRole::AlertDialog
                | AriaRole::Math
                | AriaRole::Article
                | AriaRole::Blockquote
                | AriaRole::Listbox
                | AriaRole::Menu
                | AriaRole::Tree
        );
    if !announced {
        return None;
    }
    let phrase = role_phrase(tree, id, role, verbosity);
    (!phrase.is_empty()).then_some(phrase)
}

/// Role and states of a node, e.g. "Check box not checked"
pub fn node_annotation(tree: &DomTree, id: NodeId, verbosity: Verbosity) -> String {
    let mut parts = Vec::new();
    if let Some(role) = get_role(tree, id) {
        let phrase = role_phrase(tree, id, role, verbosity);
        if !phrase.is_empty() {
            parts.push(phrase);
        }
    } else if vox_a11y::is_editable(tree, id) {
        parts.push("Edit text".to_string());
    }
    parts.extend(states(tree, id).iter().map(|s| s.message().to_string()));
    parts.join(" ")
}

/// Node the previous selection was on, or the root for the sentinel or a
/// detached node
pub(crate) fn previous_anchor(doc: &Document, prev: &CursorSelection) -> NodeId {
    let node = prev.directed_node();
    if prev.is_body_sentinel(doc) || !doc.tree().is_attached(node) {
        doc.traversal_root()
    } else {
        node
    }
}

/// Context, earcons and exit cues for moving from `prev_node` to `node`
pub(crate) fn context_for(
    doc: &Document,
    prev_node: NodeId,
    node: NodeId,
    verbosity: Verbosity,
) -> (String, Vec<Earcon>) {
    let tree = doc.tree();
    let root = doc.traversal_root();
    let entered = entered_ancestors(tree, root, prev_node, node);

    let mut contexts = Vec::new();
    let mut earcons = Vec::new();
    for ancestor in &entered {
        if let Some(message) = context_message(tree, *ancestor, verbosity) {
            contexts.push(message);
        }
        if let Some(role) = get_role(tree, *ancestor) {
            earcons.extend(earcon::for_container(role));
        }
    }
    if entered.is_empty() && prev_node != root {
        let exited_container = exited_ancestors(tree, root, prev_node, node)
            .into_iter()
            .filter_map(|a| get_role(tree, a))
            .any(|r| earcon::for_container(r).is_some());
        if exited_container {
            earcons.push(Earcon::ObjectExit);
        }
    }
    (contexts.join(" "), earcons)
}

/// Name, value and annotation of one node
pub fn describe_node(tree: &DomTree, id: NodeId, verbosity: Verbosity) -> NavDescription {
    let mut desc = NavDescription::default();
    match tree.get(id).map(|n| &n.data) {
        Some(NodeData::Text(text)) => {
            desc.text = collapse_whitespace(&text.content);
        }
        Some(NodeData::Element(_)) => {
            desc.text = get_name(tree, id);
            if desc.text.is_empty() && get_role(tree, id) == Some(AriaRole::Math) {
                desc.text = math::speech::speak_math(tree, id);
            }
            let value = get_value(tree, id);
            if value != desc.text {
                desc.user_value = value;
            }
            desc.annotation = node_annotation(tree, id, verbosity);
            desc.earcons.extend(earcon::for_node(tree, id));
        }
        _ => {}
    }
    desc
}

/// Description of a node-level move (object and group walkers)
pub fn describe_transition(
    doc: &Document,
    prev: &CursorSelection,
    sel: &CursorSelection,
    verbosity: Verbosity,
) -> Vec<NavDescription> {
    if sel.is_body_sentinel(doc) {
        return Vec::new();
    }
    let node = sel.start.node;
    let prev_node = previous_anchor(doc, prev);
    let (context, mut earcons) = context_for(doc, prev_node, node, verbosity);

    let mut desc = describe_node(doc.tree(), node, verbosity);
    desc.context = context;
    earcons.append(&mut desc.earcons);
    desc.earcons = earcons;
    vec![desc]
}
