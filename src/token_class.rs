//! Coarse token classes of units, used for embedding lookup.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::char_categories::{get_char_category, CharCategory};
use crate::patterns::{is_email, is_url};

/// Class of a unit for feature derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
    /// Latin letters only
    English,
    /// Digits, possibly with `,` or `.` between them
    Number,
    /// URL or email address
    Url,
    /// Whitespace only
    Space,
    /// A single punctuation character
    Punc,
    /// Anything else; looked up by its own text
    Syllable,
}

impl TokenClass {
    /// The placeholder token for this class, `None` for generic syllables
    pub fn token(&self) -> Option<&'static str> {
        match self {
            TokenClass::English => Some("<ENGLISH>"),
            TokenClass::Number => Some("<NUMBER>"),
            TokenClass::Url => Some("<URL>"),
            TokenClass::Space => Some("<SPACE>"),
            TokenClass::Punc => Some("<PUNC>"),
            TokenClass::Syllable => None,
        }
    }

    /// Classify a unit's text
    pub fn of(unit: &str) -> TokenClass {
        if unit.is_empty() {
            return TokenClass::Syllable;
        }
        if is_url(unit) || is_email(unit) {
            return TokenClass::Url;
        }

        let cats: Vec<CharCategory> = unit.chars().map(get_char_category).collect();
        if cats.iter().all(|c| *c == CharCategory::LatinLetter) {
            TokenClass::English
        } else if is_number(unit, &cats) {
            TokenClass::Number
        } else if cats.iter().all(|c| *c == CharCategory::Whitespace) {
            TokenClass::Space
        } else if cats.len() == 1 && cats[0] == CharCategory::Punctuation {
            TokenClass::Punc
        } else {
            TokenClass::Syllable
        }
    }
}

fn is_number(unit: &str, cats: &[CharCategory]) -> bool {
    let first_and_last_digit = cats.first().map_or(false, |c| c.is_digit())
        && cats.last().map_or(false, |c| c.is_digit());
    first_and_last_digit
        && unit
            .chars()
            .zip(cats)
            .all(|(ch, cat)| cat.is_digit() || ch == ',' || ch == '.')
}

/// Map a unit to the token used for feature lookup.
///
/// Classed units become their placeholder (e.g. `<NUMBER>`); generic
/// syllables map to themselves.
pub fn syllable_to_token(unit: &str) -> Cow<'_, str> {
    match TokenClass::of(unit).token() {
        Some(token) => Cow::Borrowed(token),
        None => Cow::Borrowed(unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(syllable_to_token("Abce"), "<ENGLISH>");
        assert_eq!(syllable_to_token("034343"), "<NUMBER>");
        assert_eq!(syllable_to_token("WWWW.KABC.COM"), "<URL>");
        assert_eq!(syllable_to_token("   "), "<SPACE>");
        assert_eq!(syllable_to_token(" "), "<SPACE>");
        assert_eq!(syllable_to_token("!"), "<PUNC>");
    }

    #[test]
    fn test_generic_syllables() {
        assert_eq!(syllable_to_token("วัน"), "วัน");
        assert_eq!(syllable_to_token("..."), "...");
        assert_eq!(TokenClass::of(""), TokenClass::Syllable);
    }

    #[test]
    fn test_numbers_and_email() {
        assert_eq!(TokenClass::of("1,200"), TokenClass::Number);
        assert_eq!(TokenClass::of("๑๒"), TokenClass::Number);
        assert_eq!(TokenClass::of("1,"), TokenClass::Syllable);
        assert_eq!(TokenClass::of("min@adb.com"), TokenClass::Url);
    }
}
