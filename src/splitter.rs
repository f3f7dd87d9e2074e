//! Splitting of long reference lines into bounded sub-sequences.
//!
//! Cuts are made at word boundaries next to a whitespace unit, as far to the
//! right as the unit limit allows. When a window holds no such boundary the
//! farthest plain word boundary is used instead.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SylcutError};
use crate::reference::MarkedText;
use crate::syllabifier::Syllabifier;
use crate::unit::Unit;

/// What to do with a word longer than the unit limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OversizePolicy {
    /// Fail with [`SylcutError::WordTooLong`]
    #[default]
    Reject,
    /// Cut inside the word at the unit limit
    Split,
}

/// Splits `|`-marked lines into pieces of at most `max_length` units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongSequenceSplitter {
    /// Maximum number of units per piece
    pub max_length: usize,
    /// Handling of words that alone exceed `max_length`
    pub policy: OversizePolicy,
}

/// Where a piece may end
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cut {
    None,
    Word,
    Space,
}

impl LongSequenceSplitter {
    /// Create a splitter rejecting oversize words
    pub fn new(max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(SylcutError::invalid_argument("max_length", "must be at least 1"));
        }
        Ok(LongSequenceSplitter {
            max_length,
            policy: OversizePolicy::default(),
        })
    }

    /// Set the oversize word policy
    pub fn with_policy(mut self, policy: OversizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Split a marked line.
    ///
    /// Each piece is a slice of `marked` holding at most `max_length` units.
    /// Separators at a cut are dropped, so joining the pieces with `|` gives
    /// back the line when it has single separators between words.
    pub fn split<'a>(&self, marked: &'a str) -> Result<Vec<&'a str>> {
        let reference = MarkedText::parse(marked);
        let units = Syllabifier::new(reference.raw()).make_units();
        let cuts = cut_points(&reference, &units);

        let mut pieces = Vec::new();
        let mut pos = 0;
        while units.len() - pos > self.max_length {
            let end = self.next_cut(&reference, &units, &cuts, pos)?;
            pieces.push(reference.marked_slice(units[pos].start, units[end - 1].end()));
            pos = end;
        }
        if pos < units.len() {
            pieces.push(reference.marked_slice(units[pos].start, reference.raw().len()));
        }
        Ok(pieces)
    }

    fn next_cut(
        &self,
        reference: &MarkedText,
        units: &[Unit],
        cuts: &[Cut],
        pos: usize,
    ) -> Result<usize> {
        let window = pos + 1..=pos + self.max_length;
        let farthest = |kind: Cut| window.clone().rev().find(|&k| cuts[k] >= kind);

        if let Some(end) = farthest(Cut::Space) {
            return Ok(end);
        }
        if let Some(end) = farthest(Cut::Word) {
            log::warn!(
                "no whitespace boundary within {} units, cutting between words",
                self.max_length
            );
            return Ok(end);
        }

        let word_end = (pos + 1..units.len())
            .find(|&k| cuts[k] != Cut::None)
            .unwrap_or(units.len());
        let word = &reference.raw()[units[pos].start..units[word_end - 1].end()];
        match self.policy {
            OversizePolicy::Reject => Err(SylcutError::WordTooLong {
                word: word.to_string(),
                units: word_end - pos,
                max_length: self.max_length,
            }),
            OversizePolicy::Split => {
                log::warn!(
                    "word of {} units exceeds {}, cutting inside it: {}",
                    word_end - pos,
                    self.max_length,
                    word
                );
                Ok(pos + self.max_length)
            }
        }
    }
}

/// Cut kind before each unit index; index 0 and the end are never cut points
fn cut_points(reference: &MarkedText, units: &[Unit]) -> Vec<Cut> {
    let mut cuts = vec![Cut::None; units.len() + 1];
    for k in 1..units.len() {
        if reference.is_word_start(units[k].start) {
            cuts[k] = if units[k - 1].is_space() || units[k].is_space() {
                Cut::Space
            } else {
                Cut::Word
            };
        }
    }
    cuts
}

/// Split a marked line into pieces of at most `max_length` units,
/// rejecting words longer than that.
pub fn split_long_sequence(marked: &str, max_length: usize) -> Result<Vec<&str>> {
    LongSequenceSplitter::new(max_length)?.split(marked)
}
