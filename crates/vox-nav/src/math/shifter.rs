//! MathShifter
//!
//! Cursor into one `<math>` expression with a depth counter. Horizontal
//! moves go through the active [`MathWalker`]; vertical moves enter and
//! leave subexpressions.

use vox_dom::{Document, DomTree, NodeId};

use super::walker::descends_in_layout;
use super::{MathWalker, MathWalkerKind, math_children, math_root, skip_wrappers};
use crate::braille::NavBraille;
use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::error::{NavError, NavResult};
use crate::walker::{Direction, Walker};

/// Whether the last move ran into the edge of the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeState {
    #[default]
    Clear,
    Bumped,
}

/// Two-dimensional cursor inside a math expression
#[derive(Debug, Clone)]
pub struct MathShifter {
    root: NodeId,
    /// Outermost node the cursor can be on
    top: NodeId,
    current: NodeId,
    level: usize,
    edge: EdgeState,
    walker: MathWalker,
}

impl MathShifter {
    /// Enter the expression containing `node`
    pub fn enter(doc: &Document, node: NodeId, kind: MathWalkerKind) -> NavResult<Self> {
        let tree = doc.tree();
        let root = math_root(tree, node).ok_or(NavError::NotInMath)?;
        let top = skip_wrappers(tree, root);
        let walker = MathWalker::new(kind);
        let mut shifter = Self {
            root,
            top,
            current: top,
            level: 0,
            edge: EdgeState::Clear,
            walker,
        };
        if kind.is_flat() {
            shifter.current = walker.units(tree, root).first().copied().unwrap_or(top);
        }
        tracing::debug!("entered math {} at {}", root, shifter.current);
        Ok(shifter)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Number of vertical steps below the top of the expression
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn edge(&self) -> EdgeState {
        self.edge
    }

    pub fn is_bumped(&self) -> bool {
        self.edge == EdgeState::Bumped
    }

    pub fn kind(&self) -> MathWalkerKind {
        self.walker.kind()
    }

    pub fn walker(&self) -> &MathWalker {
        &self.walker
    }

    /// Selection on the current node
    pub fn selection(&self, tree: &DomTree) -> CursorSelection {
        CursorSelection::from_node(tree, self.current)
    }

    fn check(&self, tree: &DomTree) -> NavResult<()> {
        if tree.is_attached(self.current) && tree.contains(self.root, self.current) {
            Ok(())
        } else {
            Err(NavError::StaleSelection(self.current))
        }
    }

    fn bump(&mut self) -> NavResult<Option<CursorSelection>> {
        self.edge = EdgeState::Bumped;
        Ok(None)
    }

    /// Horizontal move; `Ok(None)` and a bump at the edge
    pub fn next(&mut self, doc: &Document, direction: Direction) -> NavResult<Option<CursorSelection>> {
        let tree = doc.tree();
        self.check(tree)?;
        if self.current == self.top && !self.walker.kind().is_flat() {
            return self.bump();
        }
        let sel = self.selection(tree).set_reversed(direction.is_reversed());
        match self.walker.next(doc, &sel)? {
            Some(found) => {
                self.current = found.start.node;
                self.edge = EdgeState::Clear;
                Ok(Some(found))
            }
            None => self.bump(),
        }
    }

    /// Descend into the current subexpression
    pub fn make_more_granular(&mut self, doc: &Document) -> NavResult<Option<CursorSelection>> {
        let tree = doc.tree();
        self.check(tree)?;
        let child = match self.walker.kind() {
            MathWalkerKind::Tree => math_children(tree, self.current).next(),
            MathWalkerKind::Layout if descends_in_layout(tree, self.current) => {
                tree.element_children(self.current).next()
            }
            MathWalkerKind::Layout | MathWalkerKind::Token | MathWalkerKind::Leaf => None,
        };
        let Some(child) = child else {
            return self.bump();
        };
        self.current = skip_wrappers(tree, child);
        self.level += 1;
        self.edge = EdgeState::Clear;
        Ok(Some(self.selection(tree)))
    }

    /// Climb out of the current subexpression
    pub fn make_less_granular(&mut self, doc: &Document) -> NavResult<Option<CursorSelection>> {
        let tree = doc.tree();
        self.check(tree)?;
        if self.level == 0 || self.current == self.top || self.walker.kind().is_flat() {
            return self.bump();
        }
        let mut parent = tree.parent(self.current);
        while parent != self.top && tree.contains(self.top, parent) && super::is_wrapper(tree, parent) {
            parent = tree.parent(parent);
        }
        if !parent.is_valid() || !tree.contains(self.top, parent) {
            parent = self.top;
        }
        self.current = parent;
        self.level -= 1;
        self.edge = EdgeState::Clear;
        Ok(Some(self.selection(tree)))
    }

    /// Switch walker kind, moving the cursor onto a stop of the new kind
    pub fn set_kind(&mut self, doc: &Document, kind: MathWalkerKind) -> NavResult<()> {
        let tree = doc.tree();
        self.check(tree)?;
        self.walker = MathWalker::new(kind);
        let synced = self.walker.sync(doc, &self.selection(tree))?;
        self.current = synced.start.node;
        self.level = if kind.is_flat() {
            0
        } else {
            tree.ancestors(self.current).take_while(|&a| a != self.top).count()
        };
        self.edge = EdgeState::Clear;
        Ok(())
    }

    pub fn description(&self, doc: &Document, prev: &CursorSelection) -> Vec<NavDescription> {
        let sel = self.selection(doc.tree());
        self.walker.description(doc, prev, &sel)
    }

    pub fn braille(&self, doc: &Document) -> NavResult<NavBraille> {
        let sel = self.selection(doc.tree());
        self.walker.braille(doc, &sel, &sel)
    }
}
