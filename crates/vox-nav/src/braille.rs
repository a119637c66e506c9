//! Braille output
//!
//! A braille line is plain text plus a cursor or highlight range, in char
//! offsets so a display can map them to cells.

use vox_a11y::{AriaRole, collapse_whitespace, get_name, get_role, get_value, heading_level, states};
use vox_dom::{Document, DomTree, NodeData, NodeId};

use crate::cursor::CursorSelection;
use crate::math;
use crate::segment;

/// Text for a braille display with a selection inside it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavBraille {
    pub text: String,
    /// Char offset where the cursor or highlight starts
    pub start_index: usize,
    /// Char offset where the highlight ends; equal to start for a caret
    pub end_index: usize,
}

impl NavBraille {
    /// Create a braille line, clamping the indices to the text
    pub fn new(text: impl Into<String>, start_index: usize, end_index: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let start_index = start_index.min(len);
        let end_index = end_index.clamp(start_index, len);
        Self {
            text,
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Contracted role marker shown after a node's name
pub fn role_abbreviation(tree: &DomTree, id: NodeId) -> Option<String> {
    let role = get_role(tree, id)?;
    let abbrev = match role {
        AriaRole::Button => "btn",
        AriaRole::Link => "lnk",
        AriaRole::Checkbox | AriaRole::MenuItemCheckbox | AriaRole::Switch => "chk",
        AriaRole::Radio | AriaRole::MenuItemRadio => "rdo",
        AriaRole::TextBox | AriaRole::SearchBox => "edt",
        AriaRole::Combobox => "cbo",
        AriaRole::Listbox => "lstbx",
        AriaRole::List => "lst",
        AriaRole::Table | AriaRole::Grid => "tbl",
        AriaRole::Img => "img",
        AriaRole::Math => "mth",
        AriaRole::Slider => "sldr",
        AriaRole::Heading => {
            return Some(match heading_level(tree, id) {
                Some(level) => format!("h{}", level),
                None => "h".to_string(),
            });
        }
        _ => return None,
    };
    Some(abbrev.to_string())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Braille for a whole node: "name value role states"
pub fn object_braille(doc: &Document, sel: &CursorSelection) -> NavBraille {
    let tree = doc.tree();
    let node = sel.start.node;
    if sel.is_body_sentinel(doc) {
        return NavBraille::default();
    }

    match tree.get(node).map(|n| &n.data) {
        Some(NodeData::Text(text)) => NavBraille::new(collapse_whitespace(&text.content), 0, 0),
        Some(NodeData::Element(_)) => {
            let mut name = get_name(tree, node);
            if name.is_empty() && get_role(tree, node) == Some(AriaRole::Math) {
                name = math::speech::speak_math(tree, node);
            }
            let value = get_value(tree, node);

            let mut text = String::new();
            let mut caret = 0;
            let push = |text: &mut String, part: &str| {
                if part.is_empty() {
                    return;
                }
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(part);
            };
            push(&mut text, &name);
            if !value.is_empty() && value != name {
                push(&mut text, &value);
                caret = char_len(&text);
            }
            if let Some(abbrev) = role_abbreviation(tree, node) {
                push(&mut text, &abbrev);
            }
            for state in states(tree, node) {
                push(&mut text, state.braille());
            }

            if vox_a11y::is_editable(tree, node) {
                if caret == 0 && !name.is_empty() {
                    caret = char_len(&name) + 1;
                }
                NavBraille::new(text, caret, caret)
            } else {
                NavBraille::new(text, 0, 0)
            }
        }
        _ => NavBraille::default(),
    }
}

/// Braille for a range inside a node: the hard line holding the range,
/// with the range highlighted
pub fn selection_braille(doc: &Document, sel: &CursorSelection) -> NavBraille {
    let tree = doc.tree();
    let node = sel.start.node;
    if sel.is_body_sentinel(doc) || sel.start.node != sel.end.node {
        return NavBraille::default();
    }

    // Editable fields show their live contents
    let live;
    let text = if vox_a11y::is_editable(tree, node) {
        live = vox_a11y::get_node_text(tree, node);
        live.as_str()
    } else {
        sel.start.text.as_str()
    };

    let (a, b) = (sel.start.index.min(sel.end.index), sel.start.index.max(sel.end.index));
    let (a, b) = (a.min(text.len()), b.min(text.len()));
    let (a, b) = (floor_boundary(text, a), floor_boundary(text, b));
    let (line, start, end) = segment::line_around(text, a, b);
    NavBraille::new(line, char_len(&line[..start]), char_len(&line[..end]))
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_braille_shows_role_and_state() {
        let doc = vox_html::parse(
            r#"<h2 id="h">Intro</h2><label><input id="c" type="checkbox" checked> Agree</label>"#,
        );
        let tree = doc.tree();
        let h = doc.get_element_by_id("h").unwrap();
        let c = doc.get_element_by_id("c").unwrap();
        assert_eq!(object_braille(&doc, &CursorSelection::from_node(tree, h)).text, "Intro h2");
        assert_eq!(object_braille(&doc, &CursorSelection::from_node(tree, c)).text, "Agree chk (x)");
    }

    #[test]
    fn test_edit_field_caret_after_value() {
        let doc = vox_html::parse(r#"<input id="e" aria-label="Name" value="Ada">"#);
        let tree = doc.tree();
        let e = doc.get_element_by_id("e").unwrap();
        let braille = object_braille(&doc, &CursorSelection::from_node(tree, e));
        assert_eq!(braille.text, "Name Ada edt");
        assert_eq!((braille.start_index, braille.end_index), (8, 8));
    }

    #[test]
    fn test_selection_highlights_word_in_line() {
        let doc = vox_html::parse("<pre id=\"p\">first\nsecond line</pre>");
        let tree = doc.tree();
        let p = doc.get_element_by_id("p").unwrap();
        let text = vox_a11y::get_node_text(tree, p);
        let start = text.find("line").unwrap();
        let sel = CursorSelection::from_range(p, &text, start, start + 4, false);
        let braille = selection_braille(&doc, &sel);
        assert_eq!(braille, NavBraille::new("second line", 7, 11));
    }

    #[test]
    fn test_indices_are_clamped() {
        let braille = NavBraille::new("héllo", 9, 2);
        assert_eq!((braille.start_index, braille.end_index), (5, 5));
    }
}
