//! Syllable tokenization of normalized text.
//!
//! The text is scanned left to right. At each position the matchers of
//! [`CASCADE`] are tried in order and the first one that matches emits a unit
//! spanning its longest match. Concatenating the emitted units always gives
//! back the input.

use crate::char_categories::{CategorizedText, CharCategory};
use crate::patterns::{match_email, match_url};
use crate::syllable::SyllableReader;
use crate::unit::{Unit, UnitKind};

/// Punctuation that always forms a unit on its own
const STANDALONE_PUNCT: &[char] = &[
    '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '“', '”', '‘', '’', '«', '»', '「', '」',
];

/// One pattern of the tokenization cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// `http(s)://` or bare host with a known TLD
    Url,
    /// `local@domain.tld`
    Email,
    /// Run of whitespace
    Whitespace,
    /// Run of digits of one script
    Digits,
    /// Run of Latin letters, split at camel-case humps
    Latin,
    /// Run of punctuation, or one standalone bracket or quote
    Punctuation,
    /// One Thai syllable
    ThaiSyllable,
    /// Any single character
    Fallback,
}

/// Matchers in priority order
pub const CASCADE: [Matcher; 8] = [
    Matcher::Url,
    Matcher::Email,
    Matcher::Whitespace,
    Matcher::Digits,
    Matcher::Latin,
    Matcher::Punctuation,
    Matcher::ThaiSyllable,
    Matcher::Fallback,
];

impl Matcher {
    /// The kind of unit this matcher emits
    pub fn kind(&self) -> UnitKind {
        match self {
            Matcher::Url => UnitKind::Url,
            Matcher::Email => UnitKind::Email,
            Matcher::Whitespace => UnitKind::Space,
            Matcher::Digits => UnitKind::Number,
            Matcher::Latin => UnitKind::English,
            Matcher::Punctuation => UnitKind::Punctuation,
            Matcher::ThaiSyllable => UnitKind::ThaiSyllable,
            Matcher::Fallback => UnitKind::Other,
        }
    }

    /// Try to match at character index `i`.
    ///
    /// Returns the character index one past the end of the match.
    pub fn try_match(&self, text: &CategorizedText, i: usize) -> Option<usize> {
        let cat = text.get_category(i)?;
        let ascii_start = matches!(cat, CharCategory::LatinLetter | CharCategory::ArabicDigit);
        match self {
            Matcher::Url if ascii_start => Self::match_bytes(text, i, match_url),
            Matcher::Email if ascii_start => Self::match_bytes(text, i, match_email),
            Matcher::Url | Matcher::Email => None,
            Matcher::Whitespace => {
                Self::read_run(text, i, |c, _| c == CharCategory::Whitespace)
            }
            Matcher::Digits if cat.is_digit() => Self::read_run(text, i, |c, _| c == cat),
            Matcher::Digits => None,
            Matcher::Latin => Self::read_latin(text, i),
            Matcher::Punctuation => Self::read_punct(text, i),
            Matcher::ThaiSyllable => SyllableReader::new(text).read(i),
            Matcher::Fallback => Some(i + 1),
        }
    }

    fn match_bytes(
        text: &CategorizedText,
        i: usize,
        matcher: fn(&str) -> Option<usize>,
    ) -> Option<usize> {
        let len = matcher(text.tail(i))?;
        if len == 0 {
            return None;
        }
        Some(text.char_index_of(text.byte_positions[i] + len))
    }

    fn read_run<F>(text: &CategorizedText, start: usize, accept: F) -> Option<usize>
    where
        F: Fn(CharCategory, char) -> bool,
    {
        let mut i = start;
        while i < text.len() && accept(text.categories[i], text.chars[i]) {
            i += 1;
        }
        (i > start).then_some(i)
    }

    fn read_latin(text: &CategorizedText, start: usize) -> Option<usize> {
        let mut i = start;
        while i < text.len() && text.categories[i] == CharCategory::LatinLetter {
            // A capital after a lowercase letter starts the next word
            if i > start && text.chars[i].is_uppercase() && text.chars[i - 1].is_lowercase() {
                break;
            }
            i += 1;
        }
        (i > start).then_some(i)
    }

    fn read_punct(text: &CategorizedText, start: usize) -> Option<usize> {
        if text.categories[start] != CharCategory::Punctuation {
            return None;
        }
        if STANDALONE_PUNCT.contains(&text.chars[start]) {
            return Some(start + 1);
        }
        Self::read_run(text, start, |cat, c| {
            cat == CharCategory::Punctuation && !STANDALONE_PUNCT.contains(&c)
        })
    }
}

/// Syllabifier for normalized text
pub struct Syllabifier {
    /// The analyzed string
    text: CategorizedText,
}

impl Syllabifier {
    /// Create a new syllabifier for the given string
    pub fn new(text: &str) -> Self {
        Syllabifier {
            text: CategorizedText::new(text),
        }
    }

    /// Get the original string
    pub fn string(&self) -> &str {
        &self.text.string
    }

    /// Cut the text into units
    pub fn make_units(&self) -> Vec<Unit> {
        let text = &self.text;
        let mut units: Vec<Unit> = Vec::new();
        let mut i = 0;

        while i < text.len() {
            let cat = text.categories[i];

            // Signs that cannot open a syllable stay with the unit before them
            if cat.is_dependent_mark() {
                if let Some(last) = units.last_mut().filter(|u| !u.is_space()) {
                    let mut end = i;
                    while end < text.len() && text.categories[end].is_dependent_mark() {
                        end += 1;
                    }
                    last.len = text.byte_positions[end] - last.start;
                    i = end;
                    continue;
                }
            }

            let (matcher, end) = CASCADE
                .iter()
                .find_map(|m| m.try_match(text, i).map(|end| (*m, end)))
                .unwrap_or((Matcher::Fallback, i + 1));

            let start = text.byte_positions[i];
            units.push(Unit::new(
                matcher.kind(),
                start,
                text.byte_positions[end] - start,
            ));
            i = end;
        }

        units
    }

    /// Cut the text into unit strings
    pub fn unit_strings(&self) -> Vec<String> {
        self.make_units()
            .iter()
            .map(|u| u.as_str(self.string()).to_string())
            .collect()
    }
}

/// Split normalized text into syllable-like units.
///
/// The concatenation of the returned strings equals `text`.
pub fn syllable_tokenize(text: &str) -> Vec<String> {
    Syllabifier::new(text).unit_strings()
}
