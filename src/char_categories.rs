//! Character classification for Thai and mixed-script text.
//!
//! Every character maps to exactly one [`CharCategory`]. The Thai block is
//! split finely enough to tell which characters may open a syllable and which
//! are signs that can only follow one.

use serde::{Deserialize, Serialize};

/// Character categories used in syllable segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharCategory {
    /// Thai consonant (ก..ฮ, including ฤ and ฦ)
    ThaiConsonant,
    /// Vowel written before its consonant (เ แ โ ใ ไ)
    ThaiLeadingVowel,
    /// Vowel written after its consonant on the baseline (ะ า ำ ๅ)
    ThaiFollowingVowel,
    /// Vowel sign above or below the consonant, including MAI HAN-AKAT and MAITAIKHU
    ThaiCombiningVowel,
    /// Tone mark (่ ้ ๊ ๋)
    ThaiToneMark,
    /// Thanthakhat, nikhahit and yamakkan
    ThaiSign,
    /// MAI YAMOK and PAIYANNOI
    ThaiRepetition,
    /// Thai digit (๐..๙)
    ThaiDigit,
    /// Latin letter
    LatinLetter,
    /// ASCII digit
    ArabicDigit,
    /// Whitespace, including zero-width spaces
    Whitespace,
    /// Punctuation and symbols
    Punctuation,
    /// Anything else
    #[default]
    Other,
}

impl CharCategory {
    /// Number of categories, for feature tables.
    pub const COUNT: usize = 13;

    /// All categories in index order.
    pub const ALL: [CharCategory; CharCategory::COUNT] = [
        CharCategory::ThaiConsonant,
        CharCategory::ThaiLeadingVowel,
        CharCategory::ThaiFollowingVowel,
        CharCategory::ThaiCombiningVowel,
        CharCategory::ThaiToneMark,
        CharCategory::ThaiSign,
        CharCategory::ThaiRepetition,
        CharCategory::ThaiDigit,
        CharCategory::LatinLetter,
        CharCategory::ArabicDigit,
        CharCategory::Whitespace,
        CharCategory::Punctuation,
        CharCategory::Other,
    ];

    /// Stable index of this category, used as a character-type feature id
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CharCategory::ThaiConsonant => "THAI_CONS",
            CharCategory::ThaiLeadingVowel => "THAI_LEAD_VOW",
            CharCategory::ThaiFollowingVowel => "THAI_FOLLOW_VOW",
            CharCategory::ThaiCombiningVowel => "THAI_COMB_VOW",
            CharCategory::ThaiToneMark => "THAI_TONE",
            CharCategory::ThaiSign => "THAI_SIGN",
            CharCategory::ThaiRepetition => "THAI_REPEAT",
            CharCategory::ThaiDigit => "THAI_DIGIT",
            CharCategory::LatinLetter => "LATIN",
            CharCategory::ArabicDigit => "DIGIT",
            CharCategory::Whitespace => "SPACE",
            CharCategory::Punctuation => "PUNCT",
            CharCategory::Other => "OTHER",
        }
    }

    /// Check if this is a Thai letter, sign or digit
    pub fn is_thai(&self) -> bool {
        matches!(
            self,
            CharCategory::ThaiConsonant
                | CharCategory::ThaiLeadingVowel
                | CharCategory::ThaiFollowingVowel
                | CharCategory::ThaiCombiningVowel
                | CharCategory::ThaiToneMark
                | CharCategory::ThaiSign
                | CharCategory::ThaiRepetition
                | CharCategory::ThaiDigit
        )
    }

    /// Check if a Thai syllable may begin with this character
    pub fn can_start_syllable(&self) -> bool {
        matches!(
            self,
            CharCategory::ThaiConsonant | CharCategory::ThaiLeadingVowel
        )
    }

    /// Check if this is a sign that only ever follows a consonant.
    ///
    /// Such a character never opens a unit of its own.
    pub fn is_dependent_mark(&self) -> bool {
        matches!(
            self,
            CharCategory::ThaiFollowingVowel
                | CharCategory::ThaiCombiningVowel
                | CharCategory::ThaiToneMark
                | CharCategory::ThaiSign
                | CharCategory::ThaiRepetition
        )
    }

    /// Check if this character carries the vowel or tone of the consonant before it
    pub fn is_nucleus(&self) -> bool {
        matches!(
            self,
            CharCategory::ThaiFollowingVowel
                | CharCategory::ThaiCombiningVowel
                | CharCategory::ThaiToneMark
        )
    }

    /// Check if this is a digit of either script
    pub fn is_digit(&self) -> bool {
        matches!(self, CharCategory::ArabicDigit | CharCategory::ThaiDigit)
    }
}

/// THANTHAKHAT, the silent-consonant mark
pub const THANTHAKHAT: char = '\u{0E4C}';

/// Characters that should be treated as whitespace besides `char::is_whitespace`
const EXTRA_WHITESPACE: &[char] = &[
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
];

/// Get the category of a character
pub fn get_char_category(c: char) -> CharCategory {
    if c.is_whitespace() || EXTRA_WHITESPACE.contains(&c) {
        return CharCategory::Whitespace;
    }

    if ('\u{0E00}'..='\u{0E7F}').contains(&c) {
        return thai_category(c);
    }

    if c.is_ascii_digit() {
        return CharCategory::ArabicDigit;
    }

    if is_latin_letter(c) {
        return CharCategory::LatinLetter;
    }

    if is_punctuation(c) {
        return CharCategory::Punctuation;
    }

    CharCategory::Other
}

fn thai_category(c: char) -> CharCategory {
    match c {
        '\u{0E01}'..='\u{0E2E}' => CharCategory::ThaiConsonant,
        '\u{0E2F}' | '\u{0E46}' => CharCategory::ThaiRepetition,
        '\u{0E30}' | '\u{0E32}' | '\u{0E33}' | '\u{0E45}' => CharCategory::ThaiFollowingVowel,
        '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}' => CharCategory::ThaiCombiningVowel,
        '\u{0E40}'..='\u{0E44}' => CharCategory::ThaiLeadingVowel,
        '\u{0E48}'..='\u{0E4B}' => CharCategory::ThaiToneMark,
        '\u{0E4C}'..='\u{0E4E}' => CharCategory::ThaiSign,
        '\u{0E50}'..='\u{0E59}' => CharCategory::ThaiDigit,
        // BAHT, FONGMAN, ANGKHANKHU, KHOMUT
        '\u{0E3F}' | '\u{0E4F}' | '\u{0E5A}' | '\u{0E5B}' => CharCategory::Punctuation,
        _ => CharCategory::Other,
    }
}

/// Basic Latin letters, Latin-1 letters and Latin Extended-A/B
fn is_latin_letter(c: char) -> bool {
    if c.is_ascii_alphabetic() {
        return true;
    }
    (('\u{00C0}'..='\u{024F}').contains(&c) && c != '\u{00D7}' && c != '\u{00F7}')
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || ('\u{00A1}'..='\u{00BF}').contains(&c) // Latin-1 punctuation and symbols
        || c == '\u{00D7}'
        || c == '\u{00F7}'
        || ('\u{2010}'..='\u{2027}').contains(&c) // General Punctuation
        || ('\u{2030}'..='\u{205E}').contains(&c)
        || ('\u{20A0}'..='\u{20CF}').contains(&c) // Currency symbols
        || ('\u{2100}'..='\u{23FF}').contains(&c) // Letterlike, arrows, math operators
        || ('\u{25A0}'..='\u{27BF}').contains(&c) // Shapes, dingbats
        || ('\u{3001}'..='\u{303F}').contains(&c) // CJK symbols and punctuation
        || ('\u{FF01}'..='\u{FF0F}').contains(&c) // Fullwidth forms
        || ('\u{FF1A}'..='\u{FF20}').contains(&c)
}

/// Map every character of `text` to its category index.
///
/// Used as the character-type feature of character-level models.
pub fn char_type_ids(text: &str) -> Vec<usize> {
    text.chars().map(|c| get_char_category(c).index()).collect()
}

/// A string with character category information for each character
#[derive(Debug, Clone)]
pub struct CategorizedText {
    /// The original string
    pub string: String,
    /// Characters of the string
    pub chars: Vec<char>,
    /// Category for each character (by index)
    pub categories: Vec<CharCategory>,
    /// Byte offset of each character, plus the end offset
    pub byte_positions: Vec<usize>,
}

impl CategorizedText {
    /// Create a new CategorizedText from a string
    pub fn new(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        let categories = chars.iter().copied().map(get_char_category).collect();

        let mut byte_positions = Vec::with_capacity(chars.len() + 1);
        byte_positions.extend(s.char_indices().map(|(i, _)| i));
        byte_positions.push(s.len());

        CategorizedText {
            string: s.to_string(),
            chars,
            categories,
            byte_positions,
        }
    }

    /// Get the length (number of characters)
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the category at a specific index
    pub fn get_category(&self, idx: usize) -> Option<CharCategory> {
        self.categories.get(idx).copied()
    }

    /// Get the character at a specific index
    pub fn get_char(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// The string from character index `idx` to the end
    pub fn tail(&self, idx: usize) -> &str {
        &self.string[self.byte_positions[idx]..]
    }

    /// Character index of a byte offset that falls on a character boundary
    pub fn char_index_of(&self, byte: usize) -> usize {
        self.byte_positions
            .binary_search(&byte)
            .unwrap_or_else(|insert_at| insert_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thai_consonants() {
        assert_eq!(get_char_category('ก'), CharCategory::ThaiConsonant);
        assert_eq!(get_char_category('ฮ'), CharCategory::ThaiConsonant);
        assert_eq!(get_char_category('ฤ'), CharCategory::ThaiConsonant);
    }

    #[test]
    fn test_thai_vowels() {
        assert_eq!(get_char_category('เ'), CharCategory::ThaiLeadingVowel);
        assert_eq!(get_char_category('ไ'), CharCategory::ThaiLeadingVowel);
        assert_eq!(get_char_category('า'), CharCategory::ThaiFollowingVowel);
        assert_eq!(get_char_category('ะ'), CharCategory::ThaiFollowingVowel);
        assert_eq!(get_char_category('ั'), CharCategory::ThaiCombiningVowel);
        assert_eq!(get_char_category('ี'), CharCategory::ThaiCombiningVowel);
        assert_eq!(get_char_category('็'), CharCategory::ThaiCombiningVowel);
    }

    #[test]
    fn test_tone_marks_and_signs() {
        assert_eq!(get_char_category('่'), CharCategory::ThaiToneMark);
        assert_eq!(get_char_category('๋'), CharCategory::ThaiToneMark);
        assert_eq!(get_char_category(THANTHAKHAT), CharCategory::ThaiSign);
        assert_eq!(get_char_category('ๆ'), CharCategory::ThaiRepetition);
        assert!(!get_char_category('่').can_start_syllable());
        assert!(get_char_category('่').is_dependent_mark());
    }

    #[test]
    fn test_digits() {
        assert_eq!(get_char_category('๑'), CharCategory::ThaiDigit);
        assert_eq!(get_char_category('7'), CharCategory::ArabicDigit);
    }

    #[test]
    fn test_space() {
        assert_eq!(get_char_category(' '), CharCategory::Whitespace);
        assert_eq!(get_char_category('\t'), CharCategory::Whitespace);
        assert_eq!(get_char_category('\u{200B}'), CharCategory::Whitespace);
    }

    #[test]
    fn test_latin_and_punct() {
        assert_eq!(get_char_category('a'), CharCategory::LatinLetter);
        assert_eq!(get_char_category('é'), CharCategory::LatinLetter);
        assert_eq!(get_char_category('!'), CharCategory::Punctuation);
        assert_eq!(get_char_category('“'), CharCategory::Punctuation);
        assert_eq!(get_char_category('฿'), CharCategory::Punctuation);
        assert_eq!(get_char_category('就'), CharCategory::Other);
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, cat) in CharCategory::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
        assert_eq!(char_type_ids("ก1"), vec![0, 9]);
    }

    #[test]
    fn test_categorized_text() {
        let ct = CategorizedText::new("กา a");
        assert_eq!(ct.len(), 4);
        assert_eq!(ct.get_category(0), Some(CharCategory::ThaiConsonant));
        assert_eq!(ct.get_category(1), Some(CharCategory::ThaiFollowingVowel));
        assert_eq!(ct.get_category(2), Some(CharCategory::Whitespace));
        assert_eq!(ct.byte_positions, vec![0, 3, 6, 7, 8]);
        assert_eq!(ct.tail(2), " a");
        assert_eq!(ct.char_index_of(6), 2);
    }
}
