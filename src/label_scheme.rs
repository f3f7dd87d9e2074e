//! Output tagging schemes.
//!
//! A scheme turns a `|`-marked reference into one label per unit for
//! training, and turns a predicted label sequence back into word spans.
//! Every scheme marks word starts with a non-zero label, so decoding is the
//! exact inverse of encoding whenever each reference boundary falls on a
//! unit boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SylcutError};
use crate::reference::MarkedText;
use crate::syllabifier::Syllabifier;
use crate::unit::{Unit, UnitKind};

/// Label of a unit inside a word
pub const INSIDE: u8 = 0;
/// Label of a unit starting a word (binary and BI schemes)
pub const BEGIN: u8 = 1;
/// Label of a whitespace unit forming its own word (BIO scheme)
pub const OUTSIDE: u8 = 2;
/// SchemeA: first unit of a word spanning several units
pub const SCHEME_A_BEGIN: u8 = 1;
/// SchemeA: a word of exactly one unit
pub const SCHEME_A_SINGLE: u8 = 2;
/// SchemeA: a whitespace unit forming its own word
pub const SCHEME_A_SPACE: u8 = 3;

/// A closed set of tagging schemes, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelScheme {
    /// 1 if the unit starts a word, else 0
    Binary,
    /// Begin/Inside, optionally with Outside for standalone whitespace
    BeginInside {
        /// Whether the Outside class is used
        outside: bool,
    },
    /// Inside, multi-unit Begin, Single-unit word, Space word
    SchemeA,
}

impl LabelScheme {
    /// Number of output classes
    pub fn num_classes(&self) -> usize {
        match self {
            LabelScheme::Binary => 2,
            LabelScheme::BeginInside { outside: false } => 2,
            LabelScheme::BeginInside { outside: true } => 3,
            LabelScheme::SchemeA => 4,
        }
    }

    /// The identifier this scheme is selected by
    pub fn name(&self) -> &'static str {
        match self {
            LabelScheme::Binary => "binary",
            LabelScheme::BeginInside { outside: false } => "BI",
            LabelScheme::BeginInside { outside: true } => "BIO",
            LabelScheme::SchemeA => "SchemeA",
        }
    }

    /// Check if `label` marks the start of a word
    pub fn is_word_start(&self, label: u8) -> bool {
        label != INSIDE
    }

    /// Labels for units given which of them start a word
    pub(crate) fn labels_from_starts(&self, units: &[Unit], starts: &[bool]) -> Vec<u8> {
        debug_assert_eq!(units.len(), starts.len());
        (0..units.len())
            .map(|i| {
                if !starts[i] {
                    return INSIDE;
                }
                let single = starts.get(i + 1).copied().unwrap_or(true);
                let lone_space = single && units[i].kind == UnitKind::Space;
                match self {
                    LabelScheme::Binary | LabelScheme::BeginInside { outside: false } => BEGIN,
                    LabelScheme::BeginInside { outside: true } if lone_space => OUTSIDE,
                    LabelScheme::BeginInside { outside: true } => BEGIN,
                    LabelScheme::SchemeA if lone_space => SCHEME_A_SPACE,
                    LabelScheme::SchemeA if single => SCHEME_A_SINGLE,
                    LabelScheme::SchemeA => SCHEME_A_BEGIN,
                }
            })
            .collect()
    }

    /// Encode a `|`-marked reference into units and labels.
    ///
    /// The reference is re-tokenized without its separators; a unit is
    /// labelled as a word start when its start offset is a marked boundary.
    pub fn encode(&self, marked: &str) -> SequenceExample {
        let reference = MarkedText::parse(marked);
        let raw = reference.raw();
        let units = Syllabifier::new(raw).make_units();

        let starts: Vec<bool> = units
            .iter()
            .enumerate()
            .map(|(i, u)| i == 0 || reference.is_word_start(u.start))
            .collect();

        let aligned = starts.iter().filter(|s| **s).count();
        if aligned != reference.word_starts().len() {
            log::debug!(
                "{} of {} reference boundaries fall inside a unit: {}",
                reference.word_starts().len() - aligned,
                reference.word_starts().len(),
                marked
            );
        }

        SequenceExample {
            labels: self.labels_from_starts(&units, &starts),
            units: units.iter().map(|u| u.as_str(raw).to_string()).collect(),
        }
    }

    /// Decode predicted labels into word spans over unit indices.
    ///
    /// Fails when the number of labels differs from the number of units or a
    /// label is out of range for this scheme.
    pub fn decode<S: AsRef<str>>(&self, labels: &[u8], units: &[S]) -> Result<Vec<WordSpan>> {
        if labels.len() != units.len() {
            return Err(SylcutError::LengthMismatch {
                labels: labels.len(),
                units: units.len(),
            });
        }
        if let Some(&label) = labels.iter().find(|l| usize::from(**l) >= self.num_classes()) {
            return Err(SylcutError::InvalidLabel {
                label,
                num_classes: self.num_classes(),
            });
        }

        let mut spans = Vec::new();
        let mut start = 0;
        for (i, &label) in labels.iter().enumerate().skip(1) {
            if self.is_word_start(label) {
                spans.push(WordSpan::new(start, i));
                start = i;
            }
        }
        if !labels.is_empty() {
            spans.push(WordSpan::new(start, labels.len()));
        }
        Ok(spans)
    }

    /// Decode predicted labels into word strings
    pub fn decode_words<S: AsRef<str>>(&self, labels: &[u8], units: &[S]) -> Result<Vec<String>> {
        let spans = self.decode(labels, units)?;
        Ok(spans.iter().map(|span| span.text(units)).collect())
    }
}

impl Default for LabelScheme {
    fn default() -> Self {
        LabelScheme::BeginInside { outside: false }
    }
}

impl FromStr for LabelScheme {
    type Err = SylcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" | "BIN" => Ok(LabelScheme::Binary),
            "BI" => Ok(LabelScheme::BeginInside { outside: false }),
            "BIO" => Ok(LabelScheme::BeginInside { outside: true }),
            "SchemeA" => Ok(LabelScheme::SchemeA),
            _ => Err(SylcutError::UnknownScheme(s.to_string())),
        }
    }
}

impl fmt::Display for LabelScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A word as a half-open range of unit indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpan {
    /// First unit of the word
    pub start: usize,
    /// One past the last unit of the word
    pub end: usize,
}

impl WordSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        WordSpan { start, end }
    }

    /// Number of units in the word
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Concatenate the units of this span
    pub fn text<S: AsRef<str>>(&self, units: &[S]) -> String {
        units[self.start..self.end]
            .iter()
            .map(|u| u.as_ref())
            .collect()
    }
}

/// Units and labels of one training example, of equal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceExample {
    /// Unit strings
    pub units: Vec<String>,
    /// One label per unit
    pub labels: Vec<u8>,
}

impl SequenceExample {
    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Rebuild words from per-unit word-start predictions (1 = starts a word).
///
/// `units` may be characters or syllables.
pub fn find_words_from_preds<S: AsRef<str>>(units: &[S], preds: &[u8]) -> Result<Vec<String>> {
    LabelScheme::Binary.decode_words(preds, units)
}
