//! String Interner - Deduplicate tag and attribute names
//!
//! Tag names ("p", "math", "mi") and attribute names ("role", "aria-label")
//! repeat on every element, so they are stored once and referenced by ID.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for deduplicating names
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

/// Names looked up on almost every node by the accessibility oracle.
const PRE_INTERNED: &[&str] = &[
    // html structure
    "html", "head", "body", "title", "div", "span", "p", "a", "img", "br", "hr",
    "ul", "ol", "li", "dl", "dt", "dd", "table", "tr", "td", "th", "caption",
    "form", "input", "button", "select", "option", "textarea", "label",
    "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote", "code",
    "header", "footer", "nav", "main", "section", "article", "aside", "dialog",
    "script", "style", "noscript", "template", "iframe", "frame", "object", "embed",
    "video", "audio", "canvas", "progress", "meter", "fieldset",
    // mathml
    "math", "mrow", "mi", "mn", "mo", "mtext", "ms", "mspace", "mglyph",
    "msup", "msub", "msubsup", "mfrac", "msqrt", "mroot", "munder", "mover",
    "munderover", "mfenced", "mtable", "mtr", "mtd", "mstyle", "semantics",
    // attributes
    "id", "class", "style", "href", "src", "alt", "type", "name", "value",
    "placeholder", "disabled", "checked", "selected", "hidden", "for", "tabindex",
    "multiple", "size", "required", "contenteditable", "alttext", "role",
    "aria-label", "aria-labelledby", "aria-hidden", "aria-checked", "aria-pressed",
    "aria-expanded", "aria-selected", "aria-disabled", "aria-required",
    "aria-invalid", "aria-level", "aria-valuenow", "aria-valuetext",
    "aria-valuemin", "aria-valuemax", "aria-live",
];

impl StringInterner {
    /// Create a new string interner with common names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(256),
            map: HashMap::with_capacity(256),
        };

        // Index 0 is always the empty string
        interner.intern("");
        for name in PRE_INTERNED {
            interner.intern(name);
        }

        interner
    }

    /// Intern a string, returning its ID
    /// If the string is already interned, returns the existing ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn intern_lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let id1 = interner.intern("mfrac");
        let id2 = interner.intern("mfrac");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_get_string() {
        let mut interner = StringInterner::new();
        let id = interner.intern("data-custom");
        assert_eq!(interner.get(id), "data-custom");
        assert_eq!(interner.get(InternedString::EMPTY), "");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.intern_lookup("role").is_some());
        assert!(interner.intern_lookup("never-seen").is_none());
    }
}
