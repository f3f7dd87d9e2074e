//! Word-boundary marked reference text.
//!
//! Reference corpora mark human-annotated word boundaries with a literal `|`
//! between words: `ผม|ไม่|ชอบ`.

/// Word separator of reference text
pub const SEPARATOR: char = '|';

/// A parsed `|`-marked line
#[derive(Debug, Clone)]
pub struct MarkedText<'a> {
    marked: &'a str,
    raw: String,
    /// Byte offsets into `raw` where a word starts, ascending
    word_starts: Vec<usize>,
    /// Marked offset of the character at each raw offset
    start_map: Vec<usize>,
    /// Marked offset just past the character ending at each raw offset
    end_map: Vec<usize>,
}

impl<'a> MarkedText<'a> {
    /// Parse a marked line. Empty words contribute no boundary.
    pub fn parse(marked: &'a str) -> Self {
        let raw_len = marked.len() - marked.matches(SEPARATOR).count() * SEPARATOR.len_utf8();
        let mut raw = String::with_capacity(raw_len);
        let mut word_starts = Vec::new();
        let mut start_map = vec![marked.len(); raw_len + 1];
        let mut end_map = vec![0; raw_len + 1];
        let mut at_boundary = true;

        for (m, ch) in marked.char_indices() {
            if ch == SEPARATOR {
                at_boundary = true;
                continue;
            }
            if at_boundary {
                word_starts.push(raw.len());
                at_boundary = false;
            }
            start_map[raw.len()] = m;
            raw.push(ch);
            end_map[raw.len()] = m + ch.len_utf8();
        }

        MarkedText {
            marked,
            raw,
            word_starts,
            start_map,
            end_map,
        }
    }

    /// The marked input
    pub fn marked(&self) -> &'a str {
        self.marked
    }

    /// The text with separators removed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Raw byte offsets where words start
    pub fn word_starts(&self) -> &[usize] {
        &self.word_starts
    }

    /// Check if a word starts at raw byte offset `offset`
    pub fn is_word_start(&self, offset: usize) -> bool {
        self.word_starts.binary_search(&offset).is_ok()
    }

    /// The words of the line, empty words dropped
    pub fn words(&self) -> Vec<&str> {
        let mut ends = self.word_starts.iter().skip(1).copied().collect::<Vec<_>>();
        ends.push(self.raw.len());
        self.word_starts
            .iter()
            .zip(ends)
            .map(|(&s, e)| &self.raw[s..e])
            .collect()
    }

    /// The slice of the marked input covering raw bytes `start..end`,
    /// without separators at either edge
    pub fn marked_slice(&self, start: usize, end: usize) -> &'a str {
        if start >= end {
            return "";
        }
        &self.marked[self.start_map[start]..self.end_map[end]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mt = MarkedText::parse("ผม|ไม่|ชอบ");
        assert_eq!(mt.raw(), "ผมไม่ชอบ");
        assert_eq!(mt.word_starts(), &[0, 6, 15]);
        assert_eq!(mt.words(), vec!["ผม", "ไม่", "ชอบ"]);
        assert!(mt.is_word_start(6));
        assert!(!mt.is_word_start(3));
    }

    #[test]
    fn test_empty_words() {
        let mt = MarkedText::parse("|a||b|");
        assert_eq!(mt.raw(), "ab");
        assert_eq!(mt.word_starts(), &[0, 1]);
        assert_eq!(mt.words(), vec!["a", "b"]);
    }

    #[test]
    fn test_marked_slice() {
        let mt = MarkedText::parse("ab|c d|ef");
        assert_eq!(mt.marked_slice(0, 2), "ab");
        assert_eq!(mt.marked_slice(2, 7), "c d|ef");
        assert_eq!(mt.marked_slice(0, 7), "ab|c d|ef");
        assert_eq!(mt.marked_slice(3, 3), "");
    }

    #[test]
    fn test_empty() {
        let mt = MarkedText::parse("");
        assert_eq!(mt.raw(), "");
        assert!(mt.words().is_empty());
    }
}
