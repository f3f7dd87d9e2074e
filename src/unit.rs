//! Syllable unit representation.
//!
//! A Unit is a contiguous span of normalized text emitted by the syllabifier.

use serde::{Deserialize, Serialize};

/// The kind of text a unit covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitKind {
    /// Thai syllable
    #[default]
    ThaiSyllable,
    /// Run of Latin letters
    English,
    /// Run of digits
    Number,
    /// URL-like run
    Url,
    /// Email address
    Email,
    /// Run of whitespace, original length kept
    Space,
    /// Punctuation or symbols
    Punctuation,
    /// Anything else
    Other,
}

impl UnitKind {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::ThaiSyllable => "SYL",
            UnitKind::English => "ENG",
            UnitKind::Number => "NUM",
            UnitKind::Url => "URL",
            UnitKind::Email => "EMAIL",
            UnitKind::Space => "SPACE",
            UnitKind::Punctuation => "PUNCT",
            UnitKind::Other => "OTHER",
        }
    }
}

/// A single unit produced by the syllabifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// The kind of this unit
    pub kind: UnitKind,
    /// Starting byte offset in the normalized string
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Unit {
    /// Create a new unit
    pub fn new(kind: UnitKind, start: usize, len: usize) -> Self {
        Unit { kind, start, len }
    }

    /// End byte offset (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The text of this unit within the string it was cut from
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end()]
    }

    /// Check if this is a whitespace run
    pub fn is_space(&self) -> bool {
        self.kind == UnitKind::Space
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_slicing() {
        let text = "วัน นี้";
        let unit = Unit::new(UnitKind::ThaiSyllable, 0, 9);
        assert_eq!(unit.as_str(text), "วัน");
        assert_eq!(unit.end(), 9);
        assert!(!unit.is_space());
        assert!(Unit::new(UnitKind::Space, 9, 1).is_space());
    }
}
