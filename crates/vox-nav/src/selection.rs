//! Selection walkers
//!
//! Line, sentence, word and character movement. Within a node the text
//! segmenter decides the next unit; at the end of a node the object walker
//! supplies the next node and movement continues at its first (or last)
//! unit.

use vox_a11y::get_node_text;
use vox_dom::Document;

use crate::braille::{self, NavBraille};
use crate::config::{MAX_STEPS, Verbosity};
use crate::cursor::CursorSelection;
use crate::description::{self, NavDescription};
use crate::error::{NavError, NavResult};
use crate::object::BareObjectWalker;
use crate::output::SpeechProperties;
use crate::segment::{self, Segment, TextGrain};
use crate::walker::Walker;

/// Spoken name of a character that is silent or ambiguous on its own
pub fn character_name(c: &str) -> Option<&'static str> {
    Some(match c {
        " " | "\u{a0}" => "space",
        "\t" => "tab",
        "." => "dot",
        "," => "comma",
        "!" => "exclamation",
        "?" => "question mark",
        ":" => "colon",
        ";" => "semicolon",
        "-" => "dash",
        "'" => "apostrophe",
        "\"" => "quote",
        "(" => "open paren",
        ")" => "close paren",
        "/" => "slash",
        "@" => "at",
        "&" => "and",
        _ => return None,
    })
}

/// Sub-node granularity walker
#[derive(Debug, Clone)]
pub struct SelectionWalker {
    grain: TextGrain,
    objects: BareObjectWalker,
    line_width: usize,
    speak_text_prefix: bool,
    verbosity: Verbosity,
}

impl SelectionWalker {
    pub fn new(grain: TextGrain) -> Self {
        Self {
            grain,
            objects: BareObjectWalker::new(MAX_STEPS),
            line_width: 80,
            speak_text_prefix: true,
            verbosity: Verbosity::default(),
        }
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.objects = BareObjectWalker::new(max_steps);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_text_prefix(mut self, speak_text_prefix: bool) -> Self {
        self.speak_text_prefix = speak_text_prefix;
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn grain(&self) -> TextGrain {
        self.grain
    }

    fn segments(&self, text: &str) -> Vec<Segment> {
        segment::segments(text, self.grain, self.line_width)
    }

    /// First (or last, going backward) unit of a node, or the whole node
    /// when it has no text units
    fn edge_of(&self, doc: &Document, node_sel: &CursorSelection, reversed: bool) -> CursorSelection {
        let node = node_sel.start.node;
        let text = &node_sel.start.text;
        let segments = self.segments(text);
        let edge = if reversed { segments.last() } else { segments.first() };
        match edge {
            Some(seg) => CursorSelection::from_range(node, text, seg.start, seg.end, reversed),
            None => CursorSelection::from_node(doc.tree(), node).set_reversed(reversed),
        }
    }

    /// Next unit inside the current node, if any
    fn within_node(&self, sel: &CursorSelection) -> Option<CursorSelection> {
        if sel.start.node != sel.end.node {
            return None;
        }
        let node = sel.start.node;
        let text = &sel.start.text;
        let segments = self.segments(text);
        let (lo, hi) = (sel.start.index.min(sel.end.index), sel.start.index.max(sel.end.index));
        let found = if sel.reversed {
            segments.iter().rev().find(|s| s.end <= lo && s.start < lo)
        } else if lo == hi {
            // a caret covers the unit it sits in
            segments.iter().find(|s| s.start > lo)
        } else {
            segments.iter().find(|s| s.start >= hi)
        };
        found.map(|s| CursorSelection::from_range(node, text, s.start, s.end, sel.reversed))
    }

    /// Text shown before the selection on its line
    fn line_prefix<'a>(&self, sel: &'a CursorSelection) -> &'a str {
        let text = &sel.start.text;
        let start = sel.start.index.min(sel.end.index).min(text.len());
        let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        text[line_start..start].trim()
    }
}

impl Walker for SelectionWalker {
    fn name(&self) -> &'static str {
        match self.grain {
            TextGrain::Line => "line",
            TextGrain::Sentence => "sentence",
            TextGrain::Word => "word",
            TextGrain::Character => "character",
        }
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> NavResult<Option<CursorSelection>> {
        let tree = doc.tree();
        let reversed = sel.reversed;

        if sel.is_body_sentinel(doc) {
            return Ok(self
                .objects
                .next(doc, sel)?
                .map(|node_sel| self.edge_of(doc, &node_sel, reversed)));
        }
        let node = sel.directed_node();
        if !tree.is_attached(node) {
            return Err(NavError::StaleSelection(node));
        }

        if let Some(found) = self.within_node(sel) {
            return Ok(Some(found));
        }

        let from = CursorSelection::from_node(tree, node).set_reversed(reversed);
        Ok(self
            .objects
            .next(doc, &from)?
            .map(|node_sel| self.edge_of(doc, &node_sel, reversed)))
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> NavResult<CursorSelection> {
        let synced = self.objects.sync(doc, sel)?;
        if synced.is_body_sentinel(doc) {
            return Ok(synced);
        }
        let node = synced.start.node;
        if node != sel.start.node {
            return Ok(self.edge_of(doc, &synced, sel.reversed));
        }

        // Same node: keep the caret's unit, re-reading the node's text
        let text = get_node_text(doc.tree(), node);
        let segments = self.segments(&text);
        let index = sel.start.index.min(sel.end.index);
        let seg = segment::containing(&segments, index)
            .or_else(|| segments.iter().copied().find(|s| s.start >= index))
            .or_else(|| segments.last().copied());
        Ok(match seg {
            Some(s) => CursorSelection::from_range(node, &text, s.start, s.end, sel.reversed),
            None => synced.set_reversed(sel.reversed),
        })
    }

    fn description(
        &self,
        doc: &Document,
        prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> Vec<NavDescription> {
        if sel.is_body_sentinel(doc) {
            return Vec::new();
        }
        let node = sel.start.node;
        let unit = sel.selected_text();

        let (text, personality) = match (self.grain, character_name(unit)) {
            (TextGrain::Character, Some(name)) => (name.to_string(), None),
            (TextGrain::Character, None)
                if unit.chars().count() == 1 && unit.chars().all(char::is_uppercase) =>
            {
                (unit.to_string(), Some(SpeechProperties::capital()))
            }
            _ => (unit.to_string(), None),
        };
        let mut desc = NavDescription {
            text,
            personality,
            ..Default::default()
        };
        if desc.text.is_empty() && sel.is_collapsed() {
            // a node without text units reads like an object
            return description::describe_transition(doc, prev, sel, self.verbosity);
        }

        // a line never has text before it on its own line
        if self.speak_text_prefix && self.grain != TextGrain::Line {
            let prefix = self.line_prefix(sel);
            if !prefix.is_empty() {
                desc.text = format!("{} {}", prefix, desc.text);
            }
        }

        let prev_node = description::previous_anchor(doc, prev);
        if prev_node != node {
            let (context, earcons) = description::context_for(doc, prev_node, node, self.verbosity);
            desc.context = context;
            desc.earcons = earcons;
            let node_desc = description::describe_node(doc.tree(), node, self.verbosity);
            desc.annotation = node_desc.annotation;
            desc.earcons.extend(node_desc.earcons);
        }
        vec![desc]
    }

    fn braille(
        &self,
        doc: &Document,
        _prev: &CursorSelection,
        sel: &CursorSelection,
    ) -> NavResult<NavBraille> {
        if sel.is_collapsed() {
            return Ok(braille::object_braille(doc, sel));
        }
        Ok(braille::selection_braille(doc, sel))
    }

    fn granularity_msg(&self) -> &'static str {
        match self.grain {
            TextGrain::Line => "Line",
            TextGrain::Sentence => "Sentence",
            TextGrain::Word => "Word",
            TextGrain::Character => "Character",
        }
    }
}
