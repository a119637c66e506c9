//! Group walker
//!
//! Coarse navigation over blocks of related content: paragraphs, headings,
//! short lists. Block size is capped by the configured character limit.

use vox_a11y::{DEFAULT_GROUP_MAX_CHARS, is_group_leaf};
use vox_dom::{Document, DomTree, NodeId};

use crate::braille::NavBraille;
use crate::config::{MAX_STEPS, Verbosity};
use crate::cursor::CursorSelection;
use crate::description::{self, NavDescription};
use crate::error::{NavError, NavResult};
use crate::traverse;
use crate::walker::Walker;

/// Group-to-group movement, without descriptions
#[derive(Debug, Clone, Copy)]
pub struct BareGroupWalker {
    pub max_steps: usize,
    pub max_chars: usize,
}

impl Default for BareGroupWalker {
    fn default() -> Self {
        Self {
            max_steps: MAX_STEPS,
            max_chars: DEFAULT_GROUP_MAX_CHARS,
        }
    }
}

impl BareGroupWalker {
    pub fn new(max_steps: usize, max_chars: usize) -> Self {
        Self { max_steps, max_chars }
    }

    pub fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        let stop = |tree: &DomTree, id: NodeId| is_group_leaf(tree, id, self.max_chars);
        traverse::next_selection(doc, sel, &stop, self.max_steps)
    }

    pub fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection> {
        let stop = |tree: &DomTree, id: NodeId| is_group_leaf(tree, id, self.max_chars);
        traverse::sync_selection(doc, sel, &stop, self.max_steps)
    }
}

/// Group granularity walker
#[derive(Debug, Clone, Default)]
pub struct GroupWalker {
    bare: BareGroupWalker,
    verbosity: Verbosity,
}

impl GroupWalker {
    pub fn new(max_steps: usize, max_chars: usize, verbosity: Verbosity) -> Self {
        Self {
            bare: BareGroupWalker::new(max_steps, max_chars),
            verbosity,
        }
    }
}

impl Walker for GroupWalker {
    fn name(&self) -> &'static str {
        "group"
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        self.bare.next(doc, sel)
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection> {
        self.bare.sync(doc, sel)
    }

    fn description(
        &self,
        doc: &Document,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> Vec<NavDescription> {
        description::describe_transition(doc, prev, sel, self.verbosity)
    }

    /// Groups have no braille form; callers render the object under the
    /// cursor instead
    fn braille(
        &self,
        _doc: &Document,
        _prev: &CursorSelection,
        _sel: &CursorSelection,
    ) -> NavResult<NavBraille> {
        tracing::error!("braille requested from the group walker");
        Err(NavError::UnsupportedOperation {
            walker: "group",
            operation: "braille",
        })
    }

    fn granularity_msg(&self) -> &'static str {
        "Group"
    }
}
