//! Walker interface
//!
//! A walker is a movement policy at one granularity. It holds no cursor of
//! its own: every call takes the current selection and returns a new one.

use serde::{Deserialize, Serialize};
use vox_dom::Document;

use crate::braille::NavBraille;
use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::error::NavResult;

/// Unit of traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Group,
    #[default]
    Object,
    Line,
    Sentence,
    Word,
    Character,
    Math,
}

impl Granularity {
    /// Coarse to fine; math sits outside this ladder
    pub const LADDER: [Granularity; 6] = [
        Self::Group,
        Self::Object,
        Self::Line,
        Self::Sentence,
        Self::Word,
        Self::Character,
    ];

    /// Next finer granularity, saturating at Character
    pub fn more_granular(self) -> Self {
        match Self::LADDER.iter().position(|g| *g == self) {
            Some(i) => Self::LADDER[(i + 1).min(Self::LADDER.len() - 1)],
            None => self,
        }
    }

    /// Next coarser granularity, saturating at Group
    pub fn less_granular(self) -> Self {
        match Self::LADDER.iter().position(|g| *g == self) {
            Some(i) => Self::LADDER[i.saturating_sub(1)],
            None => self,
        }
    }
}

/// Direction of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn is_reversed(self) -> bool {
        self == Self::Backward
    }

    pub fn from_reversed(reversed: bool) -> Self {
        if reversed { Self::Backward } else { Self::Forward }
    }
}

/// Movement policy at one granularity
pub trait Walker {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Move in the selection's direction; `Ok(None)` at the boundary
    fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>>;

    /// Move against the selection's direction
    fn previous(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        let flipped = sel.clone().set_reversed(!sel.reversed);
        self.next(doc, &flipped)
    }

    /// Nearest valid selection at this granularity
    fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection>;

    /// Sentinel to start walking from either end of the page
    fn begin(&self, doc: &Document, reversed: bool) -> CursorSelection {
        CursorSelection::from_body(doc).set_reversed(reversed)
    }

    /// Speech for moving from `prev` to `sel`
    fn description(
        &self,
        doc: &Document,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> Vec<NavDescription>;

    /// Braille for moving from `prev` to `sel`
    fn braille(
        &self,
        doc: &Document,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> NavResult<NavBraille>;

    /// Spoken name of the granularity
    fn granularity_msg(&self) -> &'static str;
}
