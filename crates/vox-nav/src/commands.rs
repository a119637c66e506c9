//! Navigation commands
//!
//! Key bindings for the navigation manager's commands.

use std::collections::HashMap;

use vox_a11y::DomPredicate;

use crate::math::MathWalkerKind;
use crate::walker::{Direction, Granularity};

/// Keyboard shortcut
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyboardShortcut {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Cmd");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

/// Command understood by the navigation manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Forward,
    Backward,
    MoreGranular,
    LessGranular,
    SetGranularity(Granularity),
    /// Walker used inside math, now and on the next entry
    SetMathWalker(MathWalkerKind),
    FindNext(DomPredicate),
    FindPrevious(DomPredicate),
    ReadCurrent,
    JumpToTop,
    JumpToBottom,
}

impl NavCommand {
    /// Move command for a direction
    pub fn step(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::Forward,
            Direction::Backward => Self::Backward,
        }
    }

    /// Search command for a direction
    pub fn find(predicate: DomPredicate, direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::FindNext(predicate),
            Direction::Backward => Self::FindPrevious(predicate),
        }
    }
}

/// Braille display keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrailleCommand {
    PanLeft,
    PanRight,
    LineUp,
    LineDown,
}

/// Letter bindings for semantic jumps (Ctrl+Alt+key, Shift for previous)
const FIND_KEYS: &[(&str, DomPredicate)] = &[
    ("h", DomPredicate::Heading(None)),
    ("l", DomPredicate::Link),
    ("b", DomPredicate::Button),
    ("e", DomPredicate::EditText),
    ("x", DomPredicate::Checkbox),
    ("c", DomPredicate::Combobox),
    ("t", DomPredicate::Table),
    ("i", DomPredicate::List),
    ("f", DomPredicate::FormField),
    (";", DomPredicate::Landmark),
    ("g", DomPredicate::Graphic),
    ("m", DomPredicate::Math),
    ("q", DomPredicate::Blockquote),
    ("1", DomPredicate::Heading(Some(1))),
    ("2", DomPredicate::Heading(Some(2))),
    ("3", DomPredicate::Heading(Some(3))),
    ("4", DomPredicate::Heading(Some(4))),
    ("5", DomPredicate::Heading(Some(5))),
    ("6", DomPredicate::Heading(Some(6))),
];

/// Shortcut registry
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    shortcuts: HashMap<KeyboardShortcut, NavCommand>,
}

impl ShortcutRegistry {
    /// Registry with the default bindings
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(KeyboardShortcut::new("ArrowDown").alt().shift(), NavCommand::Forward);
        registry.register(KeyboardShortcut::new("ArrowUp").alt().shift(), NavCommand::Backward);
        registry.register(KeyboardShortcut::new("ArrowRight").alt().shift(), NavCommand::Forward);
        registry.register(KeyboardShortcut::new("ArrowLeft").alt().shift(), NavCommand::Backward);
        registry.register(KeyboardShortcut::new("Equal").alt().shift(), NavCommand::MoreGranular);
        registry.register(KeyboardShortcut::new("Minus").alt().shift(), NavCommand::LessGranular);
        registry.register(KeyboardShortcut::new("k").alt().shift(), NavCommand::ReadCurrent);
        registry.register(KeyboardShortcut::new("Home").ctrl().alt(), NavCommand::JumpToTop);
        registry.register(KeyboardShortcut::new("End").ctrl().alt(), NavCommand::JumpToBottom);
        for (key, predicate) in FIND_KEYS {
            registry.register(KeyboardShortcut::new(key).ctrl().alt(), NavCommand::FindNext(*predicate));
            registry.register(
                KeyboardShortcut::new(key).ctrl().alt().shift(),
                NavCommand::FindPrevious(*predicate),
            );
        }
        registry
    }

    pub fn register(&mut self, shortcut: KeyboardShortcut, command: NavCommand) {
        self.shortcuts.insert(shortcut, command);
    }

    pub fn unregister(&mut self, shortcut: &KeyboardShortcut) -> Option<NavCommand> {
        self.shortcuts.remove(shortcut)
    }

    pub fn command(&self, shortcut: &KeyboardShortcut) -> Option<NavCommand> {
        self.shortcuts.get(shortcut).copied()
    }

    /// Shortcuts bound to `command`, sorted by display form
    pub fn shortcuts_for(&self, command: NavCommand) -> Vec<&KeyboardShortcut> {
        let mut found: Vec<&KeyboardShortcut> = self
            .shortcuts
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(s, _)| s)
            .collect();
        found.sort_by_key(|s| s.display());
        found
    }
}
