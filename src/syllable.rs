//! Thai orthographic syllable structure.
//!
//! A written Thai syllable is read as
//! `[leading vowel] onset [cluster] {vowel signs, tone marks} [vowel carrier] [final] {silent consonants}`.
//! Without a dictionary the split between a final consonant and the next onset
//! is decided locally: a consonant followed by a vowel sign or tone mark opens
//! the next syllable, and so does the first consonant of a cluster onset.
//! Any other consonant closes the current one.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::char_categories::{CategorizedText, CharCategory, THANTHAKHAT};

/// SARA A, closes a syllable
const SARA_A: char = '\u{0E30}';
/// SARA AA
const SARA_AA: char = '\u{0E32}';
/// SARA AM, closes a syllable
const SARA_AM: char = '\u{0E33}';
/// MAI HAN-AKAT
const MAI_HAN_AKAT: char = '\u{0E31}';
/// SARA II
const SARA_II: char = '\u{0E35}';
/// SARA UEE
const SARA_UEE: char = '\u{0E37}';
/// SARA E
const SARA_E: char = '\u{0E40}';
/// SARA AI MAIMALAI, takes no final
const SARA_AI_MAIMALAI: char = '\u{0E43}';
/// SARA AI MAIMUAN, takes no final but YO YAK
const SARA_AI_MAIMUAN: char = '\u{0E44}';
/// O ANG, doubles as a vowel carrier
const O_ANG: char = '\u{0E2D}';
/// WO WAEN, doubles as a vowel carrier
const WO_WAEN: char = '\u{0E27}';
/// YO YAK, part of the -ia vowel
const YO_YAK: char = '\u{0E22}';

/// Initial consonant pairs read as one onset
static CLUSTERS: Lazy<HashSet<(char, char)>> = Lazy::new(|| {
    let mut m = HashSet::new();
    for first in ['ก', 'ข', 'ค', 'ป', 'พ'] {
        for second in ['ร', 'ล', 'ว'] {
            m.insert((first, second));
        }
    }
    for (first, second) in [
        ('ผ', 'ล'),
        ('ต', 'ร'),
        ('ท', 'ร'),
        ('บ', 'ร'),
        ('บ', 'ล'),
        ('ฟ', 'ร'),
        ('ฟ', 'ล'),
        ('ด', 'ร'),
        ('จ', 'ร'),
        ('ซ', 'ร'),
        ('ส', 'ร'),
        ('อ', 'ย'),
    ] {
        m.insert((first, second));
    }
    // Leading HO HIP before a sonorant
    for second in ['ง', 'ญ', 'น', 'ม', 'ย', 'ร', 'ล', 'ว'] {
        m.insert(('ห', second));
    }
    m
});

/// Check if two consonants can form one onset
pub fn is_cluster(first: char, second: char) -> bool {
    CLUSTERS.contains(&(first, second))
}

/// Vowel signs seen while reading a syllable nucleus
#[derive(Debug, Default)]
struct Nucleus {
    signs: Vec<char>,
    following: Option<char>,
    closed: bool,
}

impl Nucleus {
    fn has(&self, c: char) -> bool {
        self.signs.contains(&c)
    }

    fn has_vowel_sign(&self) -> bool {
        self.following.is_some() || self.signs.iter().any(|c| !is_tone_mark(*c))
    }
}

fn is_tone_mark(c: char) -> bool {
    ('\u{0E48}'..='\u{0E4B}').contains(&c)
}

/// Reads Thai syllables from categorized text
pub struct SyllableReader<'a> {
    text: &'a CategorizedText,
}

impl<'a> SyllableReader<'a> {
    /// Create a reader over `text`
    pub fn new(text: &'a CategorizedText) -> Self {
        SyllableReader { text }
    }

    fn cat(&self, i: usize) -> Option<CharCategory> {
        self.text.get_category(i)
    }

    fn ch(&self, i: usize) -> Option<char> {
        self.text.get_char(i)
    }

    fn is_consonant(&self, i: usize) -> bool {
        self.cat(i) == Some(CharCategory::ThaiConsonant)
    }

    /// A consonant at `i` that carries its own vowel or tone opens a new syllable
    fn opens_syllable(&self, i: usize) -> bool {
        self.is_consonant(i) && self.cat(i + 1).map_or(false, |c| c.is_nucleus())
    }

    /// A consonant at `i` ending a syllable with an unwritten vowel, as in กลม
    fn closes_unwritten_vowel(&self, i: usize) -> bool {
        self.is_consonant(i)
            && !self.is_silenced(i)
            && !self.cat(i + 1).map_or(false, |c| c.is_nucleus())
    }

    /// Consonants at `i` and `i + 1` that read as one onset of the next syllable.
    ///
    /// With `unwritten` set, a pair closed by a third consonant counts too (กลม).
    fn opens_cluster(&self, i: usize, unwritten: bool) -> bool {
        match (self.ch(i), self.ch(i + 1)) {
            (Some(c1), Some(c2)) => {
                self.is_consonant(i)
                    && self.is_consonant(i + 1)
                    && is_cluster(c1, c2)
                    && !self.is_silenced(i + 1)
                    && (self.opens_syllable(i + 1)
                        || (unwritten && self.closes_unwritten_vowel(i + 2)))
            }
            _ => false,
        }
    }

    /// The consonant at `i` belongs to the next syllable rather than closing one
    /// with the given nucleus. After a bare onset it is a final, as in ตก|ลง.
    fn starts_next(&self, i: usize, nucleus: &Nucleus) -> bool {
        self.opens_syllable(i) || self.opens_cluster(i, nucleus.has_vowel_sign())
    }

    /// A consonant at `i` silenced by THANTHAKHAT
    fn is_silenced(&self, i: usize) -> bool {
        self.is_consonant(i) && self.ch(i + 1) == Some(THANTHAKHAT)
    }

    /// Read one syllable starting at character index `start`.
    ///
    /// Returns the character index one past its end, or `None` when no
    /// syllable can begin at `start`.
    pub fn read(&self, start: usize) -> Option<usize> {
        let first = self.cat(start)?;
        if !first.can_start_syllable() {
            return None;
        }

        let mut i = start;
        let leading = if first == CharCategory::ThaiLeadingVowel {
            i += 1;
            self.ch(start)
        } else {
            None
        };

        if !self.is_consonant(i) {
            // A leading vowel with nothing to attach to
            return Some(i);
        }
        i += 1;

        // Second consonant of a cluster
        let clustered = match (self.ch(i - 1), self.ch(i)) {
            (Some(c1), Some(c2)) if leading.is_some() => {
                self.is_consonant(i) && is_cluster(c1, c2) && !self.is_silenced(i)
            }
            _ => self.opens_cluster(i - 1, true),
        };
        if clustered {
            i += 1;
        }

        let nucleus = self.read_nucleus(&mut i);

        let open_vowel = matches!(leading, Some(SARA_AI_MAIMALAI | SARA_AI_MAIMUAN))
            || (leading == Some(SARA_E) && nucleus.following == Some(SARA_AA));
        if !nucleus.closed && !open_vowel {
            self.read_vowel_carrier(&mut i, leading, &nucleus);
            if self.is_consonant(i) && !self.starts_next(i, &nucleus) && !self.is_silenced(i) {
                i += 1;
            }
        } else if leading == Some(SARA_AI_MAIMUAN)
            && self.ch(i) == Some(YO_YAK)
            && !self.opens_syllable(i)
        {
            // ไทย
            i += 1;
        }

        self.read_silent_consonants(&mut i);
        Some(i)
    }

    fn read_nucleus(&self, i: &mut usize) -> Nucleus {
        let mut nucleus = Nucleus::default();
        while let (Some(cat), Some(c)) = (self.cat(*i), self.ch(*i)) {
            match cat {
                CharCategory::ThaiCombiningVowel | CharCategory::ThaiToneMark => {
                    nucleus.signs.push(c);
                    *i += 1;
                }
                CharCategory::ThaiSign if c != THANTHAKHAT => {
                    nucleus.signs.push(c);
                    *i += 1;
                }
                CharCategory::ThaiFollowingVowel => {
                    nucleus.following = Some(c);
                    *i += 1;
                    if c == SARA_A || c == SARA_AM {
                        nucleus.closed = true;
                    } else if c == SARA_AA && self.ch(*i) == Some(SARA_A) {
                        // เ-าะ
                        *i += 1;
                        nucleus.closed = true;
                    }
                    break;
                }
                _ => break,
            }
        }
        nucleus
    }

    /// Consonants that spell part of the vowel rather than a final
    fn read_vowel_carrier(&self, i: &mut usize, leading: Option<char>, nucleus: &Nucleus) {
        let c = match self.ch(*i) {
            Some(c) if self.is_consonant(*i) && !self.starts_next(*i, nucleus) => c,
            _ => return,
        };

        let carries = if leading == Some(SARA_E) && (nucleus.has(SARA_II) || nucleus.has(SARA_UEE)) {
            // เ-ีย, เ-ือ
            c == YO_YAK || c == O_ANG
        } else if nucleus.has(MAI_HAN_AKAT) {
            // -ัว
            c == WO_WAEN
        } else if !nucleus.has_vowel_sign() {
            // -อ, เ-อ, -ว-
            c == O_ANG || (c == WO_WAEN && leading.is_none())
        } else {
            false
        };

        if carries {
            *i += 1;
        }
    }

    /// Consonants marked silent by THANTHAKHAT, optionally with a vowel sign in between
    fn read_silent_consonants(&self, i: &mut usize) {
        loop {
            if self.is_silenced(*i) {
                *i += 2;
            } else if self.is_consonant(*i) && self.is_silenced(*i + 1) {
                // จันทร์
                *i += 3;
            } else if self.is_consonant(*i)
                && self.cat(*i + 1) == Some(CharCategory::ThaiCombiningVowel)
                && self.ch(*i + 2) == Some(THANTHAKHAT)
            {
                // ศักดิ์
                *i += 3;
            } else {
                break;
            }
        }
    }
}

/// Split a run of Thai text into syllable strings
pub fn thai_syllables(text: &str) -> Vec<String> {
    let ct = CategorizedText::new(text);
    let reader = SyllableReader::new(&ct);
    let mut syllables = Vec::new();
    let mut i = 0;
    while i < ct.len() {
        let end = reader.read(i).unwrap_or(i + 1);
        syllables.push(ct.chars[i..end].iter().collect());
        i = end;
    }
    syllables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syls(text: &str) -> Vec<String> {
        thai_syllables(text)
    }

    #[test]
    fn test_open_and_closed_syllables() {
        assert_eq!(syls("วันนี้"), vec!["วัน", "นี้"]);
        assert_eq!(syls("อะไร"), vec!["อะ", "ไร"]);
        assert_eq!(syls("กันน่ะ"), vec!["กัน", "น่ะ"]);
    }

    #[test]
    fn test_leading_vowels() {
        assert_eq!(syls("โรงเรียนเปิด"), vec!["โรง", "เรียน", "เปิด"]);
        assert_eq!(syls("เทียมกัน"), vec!["เทียม", "กัน"]);
        assert_eq!(syls("เพื่อน"), vec!["เพื่อน"]);
        assert_eq!(syls("เธอ"), vec!["เธอ"]);
        assert_eq!(syls("เกาะ"), vec!["เกาะ"]);
    }

    #[test]
    fn test_clusters() {
        assert_eq!(syls("หน้าที่"), vec!["หน้า", "ที่"]);
        assert_eq!(syls("ใครรู้"), vec!["ใคร", "รู้"]);
        assert_eq!(syls("กลับ"), vec!["กลับ"]);
    }

    #[test]
    fn test_cluster_after_open_syllable() {
        assert_eq!(syls("มีปลา"), vec!["มี", "ปลา"]);
        assert_eq!(syls("สวัสดีครับ"), vec!["ส", "วัส", "ดี", "ครับ"]);
        assert_eq!(syls("ตากลม"), vec!["ตา", "กลม"]);
        assert_eq!(syls("ภาษาไทย"), vec!["ภา", "ษา", "ไทย"]);
    }

    #[test]
    fn test_cluster_with_unwritten_vowel() {
        assert_eq!(syls("กลม"), vec!["กลม"]);
        assert_eq!(syls("ขวด"), vec!["ขวด"]);
        assert_eq!(syls("ควร"), vec!["ควร"]);
        assert_eq!(syls("ตกลง"), vec!["ตก", "ลง"]);
    }

    #[test]
    fn test_open_leading_vowels() {
        assert_eq!(syls("ไม่ชอบ"), vec!["ไม่", "ชอบ"]);
        assert_eq!(syls("ใจดี"), vec!["ใจ", "ดี"]);
        assert_eq!(syls("เขาไป"), vec!["เขา", "ไป"]);
        assert_eq!(syls("ไทยมาก"), vec!["ไทย", "มาก"]);
    }

    #[test]
    fn test_vowel_carriers() {
        assert_eq!(syls("ชอบ"), vec!["ชอบ"]);
        assert_eq!(syls("ตัวเอง"), vec!["ตัว", "เอง"]);
        assert_eq!(syls("มือ"), vec!["มือ"]);
    }

    #[test]
    fn test_silent_consonants() {
        assert_eq!(syls("สมศักษ์"), vec!["สม", "ศักษ์"]);
        assert_eq!(syls("จันทร์"), vec!["จันทร์"]);
        assert_eq!(syls("ศักดิ์"), vec!["ศักดิ์"]);
        assert_eq!(syls("เสาร์"), vec!["เสาร์"]);
    }

    #[test]
    fn test_no_syllable_at_mark() {
        let ct = CategorizedText::new("่ก");
        assert_eq!(SyllableReader::new(&ct).read(0), None);
        assert_eq!(SyllableReader::new(&ct).read(1), Some(2));
    }

    #[test]
    fn test_lone_leading_vowel() {
        let ct = CategorizedText::new("เ1");
        assert_eq!(SyllableReader::new(&ct).read(0), Some(1));
    }
}
