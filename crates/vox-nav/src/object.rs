//! Object walker
//!
//! Visits leaf nodes with content: text, controls, images, links, headings.

use vox_a11y::is_leaf_node;
use vox_dom::{Document, DomTree, NodeId};

use crate::braille::{self, NavBraille};
use crate::config::{MAX_STEPS, Verbosity};
use crate::cursor::CursorSelection;
use crate::description::{self, NavDescription};
use crate::error::NavResult;
use crate::traverse;
use crate::walker::Walker;

/// Node-to-node movement over leaves, without descriptions
#[derive(Debug, Clone, Copy)]
pub struct BareObjectWalker {
    pub max_steps: usize,
}

impl Default for BareObjectWalker {
    fn default() -> Self {
        Self { max_steps: MAX_STEPS }
    }
}

impl BareObjectWalker {
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    fn stop(tree: &DomTree, id: NodeId) -> bool {
        is_leaf_node(tree, id)
    }

    pub fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        traverse::next_selection(doc, sel, &Self::stop, self.max_steps)
    }

    pub fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection> {
        traverse::sync_selection(doc, sel, &Self::stop, self.max_steps)
    }
}

/// Object granularity walker
#[derive(Debug, Clone, Default)]
pub struct ObjectWalker {
    bare: BareObjectWalker,
    verbosity: Verbosity,
}

impl ObjectWalker {
    pub fn new(max_steps: usize, verbosity: Verbosity) -> Self {
        Self {
            bare: BareObjectWalker::new(max_steps),
            verbosity,
        }
    }
}

impl Walker for ObjectWalker {
    fn name(&self) -> &'static str {
        "object"
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

    fn braille(
        &self,
        doc: &Document,
        _prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> NavResult<NavBraille> {
        if sel.start.node == sel.end.node && !sel.is_collapsed() {
            return Ok(braille::selection_braille(doc, sel));
        }
        Ok(braille::object_braille(doc, sel))
    }

    fn granularity_msg(&self) -> &'static str {
        "Object"
    }
}
