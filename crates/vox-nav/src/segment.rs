//! Text segmentation for the selection walkers
//!
//! Splits one node's text into lines, sentences, words or characters using
//! Unicode segmentation rules. Offsets are byte offsets into the text.

use unicode_segmentation::UnicodeSegmentation;

/// Sub-node unit of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextGrain {
    Line,
    Sentence,
    Word,
    Character,
}

/// Byte range `[start, end)` of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or_default()
    }
}

/// Shrink `[start, end)` to exclude surrounding whitespace
fn trimmed(text: &str, start: usize, end: usize) -> Option<Segment> {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    if lead + trail >= slice.len() {
        return None;
    }
    Some(Segment::new(start + lead, end - trail))
}

fn sentences(text: &str) -> Vec<Segment> {
    text.split_sentence_bound_indices()
        .filter_map(|(start, s)| trimmed(text, start, start + s.len()))
        .collect()
}

fn words(text: &str) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for (start, word) in text.split_word_bound_indices() {
        if word.trim().is_empty() {
            continue;
        }
        let end = start + word.len();
        let is_punctuation = !word.chars().any(char::is_alphanumeric);
        match out.last_mut() {
            // trailing punctuation sticks to the word before it
            Some(last) if is_punctuation && last.end == start => last.end = end,
            _ => out.push(Segment::new(start, end)),
        }
    }
    out
}

fn characters(text: &str) -> Vec<Segment> {
    text.grapheme_indices(true)
        .filter(|(_, g)| !g.contains('\n') && !g.contains('\r'))
        .map(|(start, g)| Segment::new(start, start + g.len()))
        .collect()
}

/// Hard lines, soft wrapped at `width` characters on word boundaries
fn lines(text: &str, width: usize) -> Vec<Segment> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut offset = 0;
    for hard in text.split('\n') {
        let base = offset;
        offset += hard.len() + 1;

        let mut line_start = base;
        let mut line_chars = 0;
        let mut last_end = base;
        for (start, piece) in hard.split_word_bound_indices() {
            let start = base + start;
            let piece_chars = piece.chars().count();
            if line_chars > 0 && line_chars + piece_chars > width && !piece.trim().is_empty() {
                out.extend(trimmed(text, line_start, last_end));
                line_start = start;
                line_chars = 0;
            }
            line_chars += piece_chars;
            last_end = start + piece.len();
        }
        out.extend(trimmed(text, line_start, base + hard.len()));
    }
    out
}

/// Split `text` into segments of `grain`
pub fn segments(text: &str, grain: TextGrain, line_width: usize) -> Vec<Segment> {
    match grain {
        TextGrain::Line => lines(text, line_width),
        TextGrain::Sentence => sentences(text),
        TextGrain::Word => words(text),
        TextGrain::Character => characters(text),
    }
}

/// Segment containing `index`, if any
pub fn containing(segments: &[Segment], index: usize) -> Option<Segment> {
    segments.iter().copied().find(|s| s.contains(index))
}

/// Hard line of `text` around the byte range `[start, end)`, with the
/// range's offsets relative to that line
pub fn line_around(text: &str, start: usize, end: usize) -> (&str, usize, usize) {
    let start = start.min(text.len());
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    let end = end.clamp(start, line_end.max(start));
    (&text[line_start..line_end], start - line_start, end - line_start)
}
