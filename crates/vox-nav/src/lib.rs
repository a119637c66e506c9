//! vox Navigation Engine
//!
//! Moves a virtual cursor over a DOM at a chosen granularity and describes
//! each move for speech and braille.
//!
//! Features:
//! - Object, group, line, sentence, word and character walkers
//! - MathML navigation with vertical moves into subexpressions
//! - Semantic jumps (next heading, link, form field, ...)
//! - Context, earcons and braille for every transition
//! - A navigation manager that owns the cursor and applies wrap policy

pub mod braille;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod description;
pub mod earcon;
pub mod error;
pub mod find;
pub mod group;
pub mod manager;
pub mod math;
pub mod object;
pub mod output;
pub mod segment;
pub mod selection;
pub mod traverse;
pub mod walker;

pub use braille::NavBraille;
pub use commands::{BrailleCommand, KeyboardShortcut, NavCommand, ShortcutRegistry};
pub use config::{MAX_STEPS, NavConfig, Verbosity, WrapPolicy};
pub use cursor::{Cursor, CursorSelection};
pub use description::NavDescription;
pub use earcon::Earcon;
pub use error::{ConfigError, NavError, NavResult};
pub use find::{find_next, find_predicate};
pub use group::{BareGroupWalker, GroupWalker};
pub use manager::{MoveOutcome, NavOutput, NavState, NavigationManager};
pub use math::{EdgeState, MathShifter, MathWalker, MathWalkerKind};
pub use object::{BareObjectWalker, ObjectWalker};
pub use output::{BrailleDisplay, Earcons, NullOutput, QueueMode, Speech, SpeechProperties};
pub use segment::TextGrain;
pub use selection::SelectionWalker;
pub use walker::{Direction, Granularity, Walker};
