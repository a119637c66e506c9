//! ARIA Support
//!
//! ARIA roles, states, and properties read from element attributes.

use std::str::FromStr;

use vox_dom::{DomTree, NodeId};

use crate::A11yError;

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    AlertDialog,
    Button,
    Checkbox,
    Combobox,
    Dialog,
    Grid,
    GridCell,
    Link,
    Listbox,
    Menu,
    MenuBar,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    SearchBox,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Timer,
    ToolTip,
    Tree,
    TreeGrid,
    TreeItem,

    // Document structure
    Article,
    Blockquote,
    Cell,
    ColumnHeader,
    Definition,
    Document,
    Figure,
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Math,
    Note,
    Paragraph,
    Presentation,
    Row,
    RowGroup,
    RowHeader,
    Separator,
    Table,
    Term,
    Toolbar,
}

impl AriaRole {
    /// Parse a single role token
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "alert" => Self::Alert,
            "alertdialog" => Self::AlertDialog,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::Combobox,
            "dialog" => Self::Dialog,
            "grid" => Self::Grid,
            "gridcell" => Self::GridCell,
            "link" => Self::Link,
            "listbox" => Self::Listbox,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "menuitemcheckbox" => Self::MenuItemCheckbox,
            "menuitemradio" => Self::MenuItemRadio,
            "option" => Self::Option,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "scrollbar" => Self::ScrollBar,
            "searchbox" => Self::SearchBox,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "status" => Self::Status,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            "timer" => Self::Timer,
            "tooltip" => Self::ToolTip,
            "tree" => Self::Tree,
            "treegrid" => Self::TreeGrid,
            "treeitem" => Self::TreeItem,
            "article" => Self::Article,
            "blockquote" => Self::Blockquote,
            "cell" => Self::Cell,
            "columnheader" => Self::ColumnHeader,
            "definition" => Self::Definition,
            "document" => Self::Document,
            "figure" => Self::Figure,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" | "image" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "math" => Self::Math,
            "note" => Self::Note,
            "paragraph" => Self::Paragraph,
            "none" | "presentation" => Self::Presentation,
            "row" => Self::Row,
            "rowgroup" => Self::RowGroup,
            "rowheader" => Self::RowHeader,
            "separator" => Self::Separator,
            "table" => Self::Table,
            "term" => Self::Term,
            "toolbar" => Self::Toolbar,
            _ => return None,
        })
    }

    /// Parse a `role` attribute value: the first recognised token wins
    pub fn parse_list(value: &str) -> Option<Self> {
        value.split_whitespace().find_map(Self::parse)
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::Combobox
                | Self::GridCell
                | Self::Link
                | Self::Listbox
                | Self::Menu
                | Self::MenuBar
                | Self::MenuItem
                | Self::MenuItemCheckbox
                | Self::MenuItemRadio
                | Self::Option
                | Self::ProgressBar
                | Self::Radio
                | Self::RadioGroup
                | Self::ScrollBar
                | Self::SearchBox
                | Self::Slider
                | Self::SpinButton
                | Self::Switch
                | Self::Tab
                | Self::TabList
                | Self::TabPanel
                | Self::TextBox
                | Self::Tree
                | Self::TreeGrid
                | Self::TreeItem
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            Self::Banner
                | Self::Complementary
                | Self::ContentInfo
                | Self::Form
                | Self::Main
                | Self::Navigation
                | Self::Region
                | Self::Search
        )
    }

    /// Widgets that manage a set of child widgets
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Combobox
                | Self::Grid
                | Self::Listbox
                | Self::Menu
                | Self::MenuBar
                | Self::RadioGroup
                | Self::TabList
                | Self::Tree
                | Self::TreeGrid
        )
    }

    /// Roles whose children are presentational
    pub fn is_leaf_role(&self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::Img
                | Self::Math
                | Self::MenuItemCheckbox
                | Self::MenuItemRadio
                | Self::Option
                | Self::ProgressBar
                | Self::Radio
                | Self::ScrollBar
                | Self::SearchBox
                | Self::Separator
                | Self::Slider
                | Self::SpinButton
                | Self::Switch
                | Self::Tab
                | Self::TextBox
        )
    }

    /// Spoken role name, empty for roles that are not announced
    pub fn message(&self) -> &'static str {
        match self {
            Self::Banner => "Banner",
            Self::Complementary => "Complementary",
            Self::ContentInfo => "Content info",
            Self::Form => "Form",
            Self::Main => "Main",
            Self::Navigation => "Navigation",
            Self::Region => "Region",
            Self::Search => "Search",
            Self::Alert => "Alert",
            Self::AlertDialog => "Alert dialog",
            Self::Button => "Button",
            Self::Checkbox => "Check box",
            Self::Combobox => "Combo box",
            Self::Dialog => "Dialog",
            Self::Grid => "Grid",
            Self::GridCell => "Cell",
            Self::Link => "Link",
            Self::Listbox => "List box",
            Self::Menu => "Menu",
            Self::MenuBar => "Menu bar",
            Self::MenuItem => "Menu item",
            Self::MenuItemCheckbox => "Menu item check box",
            Self::MenuItemRadio => "Menu item radio button",
            Self::Option => "Option",
            Self::ProgressBar => "Progress bar",
            Self::Radio => "Radio button",
            Self::RadioGroup => "Radio group",
            Self::ScrollBar => "Scroll bar",
            Self::SearchBox => "Search box",
            Self::Slider => "Slider",
            Self::SpinButton => "Spin button",
            Self::Status => "Status",
            Self::Switch => "Switch",
            Self::Tab => "Tab",
            Self::TabList => "Tab list",
            Self::TabPanel => "Tab panel",
            Self::TextBox => "Edit text",
            Self::Timer => "Timer",
            Self::ToolTip => "Tool tip",
            Self::Tree => "Tree",
            Self::TreeGrid => "Tree grid",
            Self::TreeItem => "Tree item",
            Self::Article => "Article",
            Self::Blockquote => "Block quote",
            Self::ColumnHeader => "Column header",
            Self::Figure => "Figure",
            Self::Heading => "Heading",
            Self::Img => "Image",
            Self::List => "List",
            Self::ListItem => "List item",
            Self::Math => "Math",
            Self::Note => "Note",
            Self::RowHeader => "Row header",
            Self::Separator => "Separator",
            Self::Table => "Table",
            Self::Toolbar => "Tool bar",
            Self::Cell
            | Self::Definition
            | Self::Document
            | Self::Group
            | Self::Paragraph
            | Self::Presentation
            | Self::Row
            | Self::RowGroup
            | Self::Term => "",
        }
    }
}

impl FromStr for AriaRole {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| A11yError::InvalidRole(s.to_string()))
    }
}

/// ARIA state/property
#[derive(Debug, Clone, PartialEq)]
pub enum AriaState {
    // Boolean states
    Checked(Option<bool>), // true, false, mixed (None)
    Disabled(bool),
    Expanded(bool),
    Hidden(bool),
    Invalid(bool),
    Pressed(Option<bool>), // true, false, mixed
    Required(bool),
    Selected(bool),

    // String states
    Label(String),
    LabelledBy(Vec<String>),

    // Numeric
    ValueNow(f64),
    ValueText(String),
    Level(u32),
}

/// ARIA attributes on an element
#[derive(Debug, Clone, Default)]
pub struct AriaAttributes {
    pub role: Option<AriaRole>,
    pub states: Vec<AriaState>,
}

impl AriaAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `role` and `aria-*` attributes of an element
    pub fn from_element(tree: &DomTree, id: NodeId) -> Self {
        let mut aria = Self::new();
        let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
            return aria;
        };

        for attr in &elem.attrs {
            let key = tree.resolve(attr.name);
            if key == "role" {
                aria.role = AriaRole::parse_list(&attr.value);
            } else if let Some(name) = key.strip_prefix("aria-") {
                if let Some(state) = Self::parse_state(name, attr.value.trim()) {
                    aria.states.push(state);
                }
            }
        }

        aria
    }

    fn parse_state(name: &str, value: &str) -> Option<AriaState> {
        let tri = |value: &str| match value {
            "true" => Some(Some(true)),
            "false" => Some(Some(false)),
            "mixed" => Some(None),
            _ => None,
        };
        Some(match name {
            "checked" => AriaState::Checked(tri(value)?),
            "pressed" => AriaState::Pressed(tri(value)?),
            "disabled" => AriaState::Disabled(value == "true"),
            "expanded" => AriaState::Expanded(value == "true"),
            "hidden" => AriaState::Hidden(value == "true"),
            "invalid" => AriaState::Invalid(!value.is_empty() && value != "false"),
            "required" => AriaState::Required(value == "true"),
            "selected" => AriaState::Selected(value == "true"),
            "label" => AriaState::Label(value.to_string()),
            "labelledby" => {
                AriaState::LabelledBy(value.split_whitespace().map(String::from).collect())
            }
            "valuenow" => AriaState::ValueNow(value.parse().ok()?),
            "valuetext" => AriaState::ValueText(value.to_string()),
            "level" => AriaState::Level(value.parse().ok()?),
            _ => return None,
        })
    }

    /// Get label
    pub fn label(&self) -> Option<&str> {
        self.states.iter().find_map(|s| match s {
            AriaState::Label(l) if !l.trim().is_empty() => Some(l.as_str()),
            _ => None,
        })
    }

    /// Ids referenced by aria-labelledby
    pub fn labelled_by(&self) -> &[String] {
        self.states
            .iter()
            .find_map(|s| match s {
                AriaState::LabelledBy(ids) => Some(ids.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Check if aria-hidden="true"
    pub fn is_hidden(&self) -> bool {
        self.states.contains(&AriaState::Hidden(true))
    }

    /// aria-checked, `Some(None)` when mixed
    pub fn checked(&self) -> Option<Option<bool>> {
        self.states.iter().find_map(|s| match s {
            AriaState::Checked(c) => Some(*c),
            _ => None,
        })
    }

    /// aria-pressed, `Some(None)` when mixed
    pub fn pressed(&self) -> Option<Option<bool>> {
        self.states.iter().find_map(|s| match s {
            AriaState::Pressed(p) => Some(*p),
            _ => None,
        })
    }

    /// Check if expanded
    pub fn is_expanded(&self) -> Option<bool> {
        self.states.iter().find_map(|s| match s {
            AriaState::Expanded(e) => Some(*e),
            _ => None,
        })
    }

    /// Check a boolean state is set to true
    pub fn has(&self, state: &AriaState) -> bool {
        self.states.contains(state)
    }

    /// aria-level
    pub fn level(&self) -> Option<u32> {
        self.states.iter().find_map(|s| match s {
            AriaState::Level(l) => Some(*l),
            _ => None,
        })
    }

    /// aria-valuetext, falling back to aria-valuenow
    pub fn value(&self) -> Option<String> {
        let text = self.states.iter().find_map(|s| match s {
            AriaState::ValueText(t) if !t.is_empty() => Some(t.clone()),
            _ => None,
        });
        text.or_else(|| {
            self.states.iter().find_map(|s| match s {
                AriaState::ValueNow(v) => Some(v.to_string()),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("button"), Some(AriaRole::Button));
        assert_eq!(AriaRole::parse("Navigation"), Some(AriaRole::Navigation));
        assert_eq!(AriaRole::parse_list("bogus tab"), Some(AriaRole::Tab));
        assert!(AriaRole::Button.is_widget());
        assert!(AriaRole::Navigation.is_landmark());
        assert!(AriaRole::Listbox.is_composite());
        assert!("widgetish".parse::<AriaRole>().is_err());
    }

    #[test]
    fn test_aria_attributes() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "role", "button").unwrap();
        tree.set_attribute(div, "aria-expanded", "true").unwrap();
        tree.set_attribute(div, "aria-label", "Menu").unwrap();
        tree.set_attribute(div, "aria-pressed", "mixed").unwrap();

        let aria = AriaAttributes::from_element(&tree, div);
        assert_eq!(aria.role, Some(AriaRole::Button));
        assert_eq!(aria.is_expanded(), Some(true));
        assert_eq!(aria.label(), Some("Menu"));
        assert_eq!(aria.pressed(), Some(None));
        assert_eq!(aria.checked(), None);
    }

    #[test]
    fn test_value_prefers_valuetext() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "aria-valuenow", "5").unwrap();
        assert_eq!(AriaAttributes::from_element(&tree, div).value(), Some("5".into()));
        tree.set_attribute(div, "aria-valuetext", "five").unwrap();
        assert_eq!(AriaAttributes::from_element(&tree, div).value(), Some("five".into()));
    }
}
