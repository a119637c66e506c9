//! Navigation manager
//!
//! Owns the current selection and granularity for one document, dispatches
//! commands to the matching walker and forwards the resulting descriptions
//! and braille to the output collaborators.

use vox_a11y::{AriaRole, DomPredicate};
use vox_dom::{Document, NodeId};

use crate::braille::NavBraille;
use crate::commands::{BrailleCommand, KeyboardShortcut, NavCommand, ShortcutRegistry};
use crate::config::{NavConfig, WrapPolicy};
use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::earcon::Earcon;
use crate::error::{NavError, NavResult};
use crate::find;
use crate::group::GroupWalker;
use crate::math::{MathShifter, MathWalker, MathWalkerKind};
use crate::object::ObjectWalker;
use crate::output::{BrailleDisplay, Earcons, NullOutput, QueueMode, Speech};
use crate::segment::TextGrain;
use crate::selection::SelectionWalker;
use crate::walker::{Direction, Granularity, Walker};

/// What a command did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Hit the start or end and stayed put
    Edge,
    /// Hit the start or end and continued from the other end
    Wrapped,
    Unchanged,
}

/// Result of one command
#[derive(Debug, Clone)]
pub struct NavOutput {
    pub descriptions: Vec<NavDescription>,
    pub braille: Option<NavBraille>,
    pub selection: CursorSelection,
    pub outcome: MoveOutcome,
}

/// Boundary tracking between commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Idle,
    /// The last move in this direction ran into the edge
    AtBoundary { reversed: bool },
}

/// Navigation context for one document
pub struct NavigationManager {
    config: NavConfig,
    granularity: Granularity,
    current: Option<CursorSelection>,
    /// Current node and its ancestors, innermost first
    anchor_path: Vec<NodeId>,
    state: NavState,
    math: Option<MathShifter>,
    speech: Box<dyn Speech>,
    earcons: Box<dyn Earcons>,
    braille: Box<dyn BrailleDisplay>,
}

impl std::fmt::Debug for NavigationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationManager")
            .field("granularity", &self.granularity)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("math", &self.math)
            .finish_non_exhaustive()
    }
}

impl Default for NavigationManager {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}

impl NavigationManager {
    /// Manager with silent output
    pub fn new(config: NavConfig) -> Self {
        Self::with_output(config, Box::new(NullOutput), Box::new(NullOutput), Box::new(NullOutput))
    }

    pub fn with_output(
        config: NavConfig,
        speech: Box<dyn Speech>,
        earcons: Box<dyn Earcons>,
        braille: Box<dyn BrailleDisplay>,
    ) -> Self {
        Self {
            granularity: config.default_granularity,
            config,
            current: None,
            anchor_path: Vec::new(),
            state: NavState::Idle,
            math: None,
            speech,
            earcons,
            braille,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn current(&self) -> Option<&CursorSelection> {
        self.current.as_ref()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn math_shifter(&self) -> Option<&MathShifter> {
        self.math.as_ref()
    }

    fn selection_walker(&self, grain: TextGrain) -> SelectionWalker {
        SelectionWalker::new(grain)
            .with_max_steps(self.config.max_steps)
            .with_line_width(self.config.line_width)
            .with_text_prefix(self.config.speak_text_prefix)
            .with_verbosity(self.config.verbosity)
    }

    /// Walker for a granularity, configured from this manager's settings
    pub fn walker(&self, granularity: Granularity) -> Box<dyn Walker> {
        let config = &self.config;
        match granularity {
            Granularity::Group => Box::new(GroupWalker::new(
                config.max_steps,
                config.group_max_chars,
                config.verbosity,
            )),
            Granularity::Object => Box::new(ObjectWalker::new(config.max_steps, config.verbosity)),
            Granularity::Line => Box::new(self.selection_walker(TextGrain::Line)),
            Granularity::Sentence => Box::new(self.selection_walker(TextGrain::Sentence)),
            Granularity::Word => Box::new(self.selection_walker(TextGrain::Word)),
            Granularity::Character => Box::new(self.selection_walker(TextGrain::Character)),
            Granularity::Math => Box::new(MathWalker::new(
                self.math.as_ref().map_or(config.math_walker, |m| m.kind()),
            )),
        }
    }

    fn commit(&mut self, doc: &Document, sel: CursorSelection) {
        let tree = doc.tree();
        let node = sel.start.node;
        self.anchor_path = std::iter::once(node).chain(tree.ancestors(node)).collect();
        self.current = Some(sel);
    }

    fn leave_math(&mut self) {
        if self.math.take().is_some() {
            self.granularity = Granularity::Object;
        }
    }

    /// Current selection, resynced if its node has left the document.
    /// The flag is set when a resync happened.
    fn resolve_current(&mut self, doc: &Document) -> NavResult<(CursorSelection, bool)> {
        let tree = doc.tree();
        let Some(current) = self.current.clone() else {
            return Ok((CursorSelection::from_body(doc), false));
        };
        if tree.is_attached(current.start.node) && tree.is_attached(current.end.node) {
            return Ok((current, false));
        }

        let root = doc.traversal_root();
        let anchor = self
            .anchor_path
            .iter()
            .copied()
            .find(|&n| tree.is_attached(n) && n != root && tree.contains(root, n));
        tracing::warn!(
            "selection on {} is stale, resyncing from {}",
            current.start.node,
            anchor.unwrap_or(root)
        );
        self.leave_math();
        let resynced = match anchor {
            Some(node) => {
                let from = CursorSelection::from_node(tree, node).set_reversed(current.reversed);
                self.walker(self.granularity).sync(doc, &from)?
            }
            None => CursorSelection::from_body(doc),
        };
        self.commit(doc, resynced.clone());
        Ok((resynced, true))
    }

    /// Speak descriptions (first one flushes) and write braille
    fn publish(&mut self, descriptions: &[NavDescription], braille: Option<&NavBraille>) {
        let mut mode = QueueMode::Flush;
        for desc in descriptions.iter().filter(|d| !d.is_empty()) {
            desc.speak(self.speech.as_mut(), self.earcons.as_mut(), mode);
            mode = QueueMode::Queue;
        }
        if let Some(braille) = braille {
            self.braille.write(braille);
        }
    }

    fn finish(
        &mut self,
        descriptions: Vec<NavDescription>,
        braille: Option<NavBraille>,
        selection: CursorSelection,
        outcome: MoveOutcome,
    ) -> NavOutput {
        self.publish(&descriptions, braille.as_ref());
        NavOutput {
            descriptions,
            braille,
            selection,
            outcome,
        }
    }

    /// Description and braille for a move made by `walker`
    fn render(
        &self,
        doc: &Document,
        granularity: Granularity,
        walker: &dyn Walker,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> NavResult<(Vec<NavDescription>, NavBraille)> {
        let descriptions = walker.description(doc, prev, sel);
        let braille = if granularity == Granularity::Group {
            ObjectWalker::new(self.config.max_steps, self.config.verbosity).braille(doc, prev, sel)?
        } else {
            walker.braille(doc, prev, sel)?
        };
        Ok((descriptions, braille))
    }

    /// Move at the current granularity
    pub fn next(&mut self, doc: &Document, direction: Direction) -> NavResult<NavOutput> {
        self.move_next(doc, self.granularity, direction)
    }

    /// Move one unit of `granularity` without changing the current one
    pub fn move_next(
        &mut self,
        doc: &Document,
        granularity: Granularity,
        direction: Direction,
    ) -> NavResult<NavOutput> {
        tracing::debug!("move {:?} at {:?}", direction, granularity);
        if granularity == Granularity::Math {
            return self.math_next(doc, direction);
        }
        let reversed = direction.is_reversed();
        let walker = self.walker(granularity);
        let (current, stale) = self.resolve_current(doc)?;
        let prev = current.set_reversed(reversed);

        if stale && !prev.is_body_sentinel(doc) {
            self.state = NavState::Idle;
            let begin = walker.begin(doc, reversed);
            let (descriptions, braille) = self.render(doc, granularity, walker.as_ref(), &begin, &prev)?;
            return Ok(self.finish(descriptions, Some(braille), prev, MoveOutcome::Moved));
        }

        match exhausted_as_boundary(walker.next(doc, &prev))? {
            Some(sel) if sel == prev => Ok(self.finish(Vec::new(), None, prev, MoveOutcome::Unchanged)),
            Some(sel) => {
                self.state = NavState::Idle;
                let (descriptions, braille) = self.render(doc, granularity, walker.as_ref(), &prev, &sel)?;
                self.commit(doc, sel.clone());
                Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Moved))
            }
            None => self.boundary(doc, granularity, walker.as_ref(), prev),
        }
    }

    /// Apply the wrap policy after a move found nothing
    fn boundary(
        &mut self,
        doc: &Document,
        granularity: Granularity,
        walker: &dyn Walker,
        prev: CursorSelection,
    ) -> NavResult<NavOutput> {
        let reversed = prev.reversed;
        let wrap = match self.config.wrap_policy {
            WrapPolicy::Stop => false,
            WrapPolicy::Wrap => true,
            WrapPolicy::WrapAfterBoundary => self.state == NavState::AtBoundary { reversed },
        };

        if wrap {
            self.state = NavState::Idle;
            let begin = walker.begin(doc, reversed);
            if let Some(sel) = exhausted_as_boundary(walker.next(doc, &begin))? {
                if !sel.is_body_sentinel(doc) {
                    let notice = if reversed { "Wrapped to bottom" } else { "Wrapped to top" };
                    let mut descriptions = vec![NavDescription::message(notice).with_earcon(Earcon::Wrap)];
                    let (mut described, braille) = self.render(doc, granularity, walker, &begin, &sel)?;
                    descriptions.append(&mut described);
                    self.commit(doc, sel.clone());
                    tracing::debug!("wrapped to {}", sel.start.node);
                    return Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Wrapped));
                }
            }
        }

        self.state = NavState::AtBoundary { reversed };
        let notice = if reversed { "Start of page" } else { "End of page" };
        let descriptions = vec![NavDescription::message(notice).with_earcon(Earcon::WrapEdge)];
        Ok(self.finish(descriptions, None, prev, MoveOutcome::Edge))
    }

    fn math_next(&mut self, doc: &Document, direction: Direction) -> NavResult<NavOutput> {
        let Some(shifter) = self.math.as_mut() else {
            return Err(NavError::NotInMath);
        };
        let prev = shifter.selection(doc.tree());
        match shifter.next(doc, direction) {
            Ok(found) => self.finish_math(doc, prev, found),
            Err(NavError::StaleSelection(node)) => {
                tracing::warn!("math cursor {} is stale, leaving math", node);
                self.leave_math();
                self.move_next(doc, self.granularity, direction)
            }
            Err(e) => Err(e),
        }
    }

    /// Output for a math move; `None` means the shifter bumped an edge
    fn finish_math(
        &mut self,
        doc: &Document,
        prev: CursorSelection,
        found: Option<CursorSelection>,
    ) -> NavResult<NavOutput> {
        let Some(shifter) = self.math.as_ref() else {
            return Err(NavError::NotInMath);
        };
        match found {
            Some(sel) => {
                let descriptions = shifter.description(doc, &prev);
                let braille = shifter.braille(doc)?;
                self.commit(doc, sel.clone());
                Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Moved))
            }
            None => {
                let descriptions = vec![NavDescription::default().with_earcon(Earcon::WrapEdge)];
                Ok(self.finish(descriptions, None, prev, MoveOutcome::Edge))
            }
        }
    }

    /// Move the selection onto `node` without speaking
    pub fn sync_to(&mut self, doc: &Document, node: NodeId) -> NavResult<CursorSelection> {
        let tree = doc.tree();
        if !tree.is_attached(node) {
            return Err(NavError::StaleSelection(node));
        }
        if self.granularity == Granularity::Math {
            let kind = self.math.as_ref().map_or(self.config.math_walker, |m| m.kind());
            match MathShifter::enter(doc, node, kind) {
                Ok(shifter) => {
                    let sel = shifter.selection(tree);
                    self.math = Some(shifter);
                    self.commit(doc, sel.clone());
                    return Ok(sel);
                }
                Err(NavError::NotInMath) => self.leave_math(),
                Err(e) => return Err(e),
            }
        }
        let sel = CursorSelection::from_node(tree, node);
        let synced = self.walker(self.granularity).sync(doc, &sel)?;
        self.state = NavState::Idle;
        self.commit(doc, synced.clone());
        Ok(synced)
    }

    /// Switch granularity and announce it
    pub fn set_granularity(&mut self, doc: &Document, granularity: Granularity) -> NavResult<NavOutput> {
        let (current, _) = self.resolve_current(doc)?;

        if granularity == Granularity::Math {
            let shifter = MathShifter::enter(doc, current.start.node, self.config.math_walker)?;
            let sel = shifter.selection(doc.tree());
            let mut descriptions = vec![NavDescription::message(shifter.walker().granularity_msg())];
            descriptions.extend(shifter.description(doc, &current));
            let braille = shifter.braille(doc)?;
            self.math = Some(shifter);
            self.granularity = Granularity::Math;
            self.commit(doc, sel.clone());
            return Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Unchanged));
        }

        self.math = None;
        self.granularity = granularity;
        self.state = NavState::Idle;
        let walker = self.walker(granularity);
        let sel = if current.is_body_sentinel(doc) {
            current
        } else {
            let synced = walker.sync(doc, &current)?;
            self.commit(doc, synced.clone());
            synced
        };
        let descriptions = vec![NavDescription::message(walker.granularity_msg())];
        Ok(self.finish(descriptions, None, sel, MoveOutcome::Unchanged))
    }

    /// Finer granularity; inside math, descend into the subexpression
    pub fn make_more_granular(&mut self, doc: &Document) -> NavResult<NavOutput> {
        if let Some(shifter) = self.math.as_mut() {
            let prev = shifter.selection(doc.tree());
            let found = shifter.make_more_granular(doc)?;
            return self.finish_math(doc, prev, found);
        }
        self.set_granularity(doc, self.granularity.more_granular())
    }

    /// Coarser granularity; inside math, climb out of the subexpression
    pub fn make_less_granular(&mut self, doc: &Document) -> NavResult<NavOutput> {
        if let Some(shifter) = self.math.as_mut() {
            let prev = shifter.selection(doc.tree());
            let found = shifter.make_less_granular(doc)?;
            return self.finish_math(doc, prev, found);
        }
        self.set_granularity(doc, self.granularity.less_granular())
    }

    /// Pick the math walker kind
    ///
    /// Inside math the cursor moves onto a stop of the new kind and is
    /// described; outside it the kind applies from the next entry.
    pub fn set_math_walker(&mut self, doc: &Document, kind: MathWalkerKind) -> NavResult<NavOutput> {
        self.config.math_walker = kind;
        let message = NavDescription::message(MathWalker::new(kind).granularity_msg());
        let Some(shifter) = self.math.as_mut() else {
            let (current, _) = self.resolve_current(doc)?;
            return Ok(self.finish(vec![message], None, current, MoveOutcome::Unchanged));
        };
        let prev = shifter.selection(doc.tree());
        shifter.set_kind(doc, kind)?;
        let sel = shifter.selection(doc.tree());
        let mut descriptions = vec![message];
        descriptions.extend(shifter.description(doc, &prev));
        let braille = shifter.braille(doc)?;
        self.commit(doc, sel.clone());
        Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Moved))
    }

    /// Jump to the next node matching `predicate`
    pub fn find_next(
        &mut self,
        doc: &Document,
        predicate: DomPredicate,
        direction: Direction,
    ) -> NavResult<NavOutput> {
        let reversed = direction.is_reversed();
        let (current, _) = self.resolve_current(doc)?;
        let prev = current.set_reversed(reversed);

        let found = exhausted_as_boundary(find::find_predicate(doc, &prev, &predicate, self.config.max_steps))?;
        let Some(found) = found else {
            let notice = format!(
                "No {} {}",
                if reversed { "previous" } else { "next" },
                predicate.noun()
            );
            let descriptions = vec![NavDescription::message(notice).with_earcon(Earcon::WrapEdge)];
            return Ok(self.finish(descriptions, None, prev, MoveOutcome::Edge));
        };

        self.leave_math();
        self.state = NavState::Idle;
        let objects = ObjectWalker::new(self.config.max_steps, self.config.verbosity);
        let descriptions = objects.description(doc, &prev, &found);
        let braille = objects.braille(doc, &prev, &found)?;
        let committed = self.walker(self.granularity).sync(doc, &found)?;
        self.commit(doc, committed);
        Ok(self.finish(descriptions, Some(braille), found, MoveOutcome::Moved))
    }

    /// Jump to the next node with an ARIA role
    pub fn find_next_by_role(
        &mut self,
        doc: &Document,
        role: AriaRole,
        direction: Direction,
    ) -> NavResult<NavOutput> {
        self.find_next(doc, DomPredicate::Role(role), direction)
    }

    /// Describe the current selection again, with full context
    pub fn read_current(&mut self, doc: &Document) -> NavResult<NavOutput> {
        let (current, _) = self.resolve_current(doc)?;
        if current.is_body_sentinel(doc) {
            return Ok(self.finish(Vec::new(), None, current, MoveOutcome::Unchanged));
        }
        if let Some(shifter) = self.math.as_ref() {
            let descriptions = shifter.description(doc, &CursorSelection::from_body(doc));
            let braille = shifter.braille(doc)?;
            return Ok(self.finish(descriptions, Some(braille), current, MoveOutcome::Unchanged));
        }
        let walker = self.walker(self.granularity);
        let begin = walker.begin(doc, false);
        let (descriptions, braille) = self.render(doc, self.granularity, walker.as_ref(), &begin, &current)?;
        Ok(self.finish(descriptions, Some(braille), current, MoveOutcome::Unchanged))
    }

    fn jump(&mut self, doc: &Document, reversed: bool) -> NavResult<NavOutput> {
        self.leave_math();
        self.state = NavState::Idle;
        let walker = self.walker(self.granularity);
        let begin = walker.begin(doc, reversed);
        match exhausted_as_boundary(walker.next(doc, &begin))? {
            Some(sel) if !sel.is_body_sentinel(doc) => {
                let (descriptions, braille) = self.render(doc, self.granularity, walker.as_ref(), &begin, &sel)?;
                self.commit(doc, sel.clone());
                Ok(self.finish(descriptions, Some(braille), sel, MoveOutcome::Moved))
            }
            _ => Ok(self.finish(Vec::new(), None, begin, MoveOutcome::Unchanged)),
        }
    }

    pub fn jump_to_top(&mut self, doc: &Document) -> NavResult<NavOutput> {
        self.jump(doc, false)
    }

    pub fn jump_to_bottom(&mut self, doc: &Document) -> NavResult<NavOutput> {
        self.jump(doc, true)
    }

    /// Run one command
    pub fn handle_command(&mut self, doc: &Document, command: NavCommand) -> NavResult<NavOutput> {
        match command {
            NavCommand::Forward => self.next(doc, Direction::Forward),
            NavCommand::Backward => self.next(doc, Direction::Backward),
            NavCommand::MoreGranular => self.make_more_granular(doc),
            NavCommand::LessGranular => self.make_less_granular(doc),
            NavCommand::SetGranularity(granularity) => self.set_granularity(doc, granularity),
            NavCommand::SetMathWalker(kind) => self.set_math_walker(doc, kind),
            NavCommand::FindNext(predicate) => self.find_next(doc, predicate, Direction::Forward),
            NavCommand::FindPrevious(predicate) => self.find_next(doc, predicate, Direction::Backward),
            NavCommand::ReadCurrent => self.read_current(doc),
            NavCommand::JumpToTop => self.jump_to_top(doc),
            NavCommand::JumpToBottom => self.jump_to_bottom(doc),
        }
    }

    /// Run the command bound to a key; an unbound key only plays a cue
    pub fn handle_key(
        &mut self,
        doc: &Document,
        registry: &ShortcutRegistry,
        shortcut: &KeyboardShortcut,
    ) -> NavResult<NavOutput> {
        if let Some(command) = registry.command(shortcut) {
            return self.handle_command(doc, command);
        }
        tracing::debug!("no command bound to {}", shortcut.display());
        self.earcons.play_earcon(Earcon::InvalidKeypress);
        let (current, _) = self.resolve_current(doc)?;
        Ok(self.finish(Vec::new(), None, current, MoveOutcome::Unchanged))
    }

    /// Run a braille display key
    pub fn handle_braille_command(&mut self, doc: &Document, command: BrailleCommand) -> NavResult<NavOutput> {
        match command {
            BrailleCommand::PanLeft => self.next(doc, Direction::Backward),
            BrailleCommand::PanRight => self.next(doc, Direction::Forward),
            BrailleCommand::LineUp => self.move_next(doc, Granularity::Line, Direction::Backward),
            BrailleCommand::LineDown => self.move_next(doc, Granularity::Line, Direction::Forward),
        }
    }
}

/// Treat a traversal that ran out of budget like the end of the document
fn exhausted_as_boundary<T>(result: NavResult<Option<T>>) -> NavResult<Option<T>> {
    match result {
        Err(NavError::TraversalExhausted { steps }) => {
            tracing::warn!("treating exhausted traversal ({} steps) as a boundary", steps);
            Ok(None)
        }
        other => other,
    }
}
