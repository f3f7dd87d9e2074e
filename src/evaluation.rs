//! Segmentation quality against a `|`-marked reference.
//!
//! Both reference and prediction are marked lines over the same text.
//! Character-level scores compare word-start flags per character; word-level
//! scores count predicted words whose character span matches a reference
//! word exactly.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::AddAssign;

use crate::error::{Result, SylcutError};
use crate::normalizer::Step;
use crate::reference::SEPARATOR;

/// One flag per character of the unmarked text, 1 where a word starts.
///
/// The first character always starts a word.
pub fn binary_representation(marked: &str) -> Vec<u8> {
    let len = marked.chars().filter(|c| *c != SEPARATOR).count();
    let mut bin = vec![0u8; len];
    let mut pos = 0;
    for c in marked.chars() {
        if c == SEPARATOR {
            if pos < len {
                bin[pos] = 1;
            }
        } else {
            pos += 1;
        }
    }
    if let Some(first) = bin.first_mut() {
        *first = 1;
    }
    bin
}

/// Character spans `(start, end)` of the words in a binary representation
pub fn find_word_boundaries(bin: &[u8]) -> Vec<(usize, usize)> {
    let starts: Vec<usize> = bin
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == 1)
        .map(|(i, _)| i)
        .collect();
    let ends = starts.iter().skip(1).copied().chain(std::iter::once(bin.len()));
    starts.iter().copied().zip(ends).collect()
}

/// For each reference word, whether the prediction has exactly that span
pub fn find_words_correctly_tokenised(
    reference: &[(usize, usize)],
    prediction: &[(usize, usize)],
) -> Vec<bool> {
    let predicted: HashSet<&(usize, usize)> = prediction.iter().collect();
    reference.iter().map(|span| predicted.contains(span)).collect()
}

/// Boundary counts, additive over lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryStats {
    /// Word starts predicted and in the reference
    pub char_tp: usize,
    /// Word starts predicted but not in the reference
    pub char_fp: usize,
    /// Non-starts in both
    pub char_tn: usize,
    /// Word starts in the reference but not predicted
    pub char_fn: usize,
    /// Predicted words matching a reference word exactly
    pub words_correct: usize,
    /// Words in the prediction
    pub words_predicted: usize,
    /// Words in the reference
    pub words_reference: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl BoundaryStats {
    pub fn char_precision(&self) -> f64 {
        ratio(self.char_tp, self.char_tp + self.char_fp)
    }

    pub fn char_recall(&self) -> f64 {
        ratio(self.char_tp, self.char_tp + self.char_fn)
    }

    pub fn char_f1(&self) -> f64 {
        f1(self.char_precision(), self.char_recall())
    }

    pub fn word_precision(&self) -> f64 {
        ratio(self.words_correct, self.words_predicted)
    }

    pub fn word_recall(&self) -> f64 {
        ratio(self.words_correct, self.words_reference)
    }

    pub fn word_f1(&self) -> f64 {
        f1(self.word_precision(), self.word_recall())
    }
}

impl AddAssign for BoundaryStats {
    fn add_assign(&mut self, other: Self) {
        self.char_tp += other.char_tp;
        self.char_fp += other.char_fp;
        self.char_tn += other.char_tn;
        self.char_fn += other.char_fn;
        self.words_correct += other.words_correct;
        self.words_predicted += other.words_predicted;
        self.words_reference += other.words_reference;
    }
}

fn unmarked(marked: &str) -> String {
    marked.chars().filter(|c| *c != SEPARATOR).collect()
}

fn line_stats(reference: &str, prediction: &str, line: usize) -> Result<BoundaryStats> {
    if unmarked(reference) != unmarked(prediction) {
        return Err(SylcutError::TextMismatch { line });
    }
    let ref_bin = binary_representation(reference);
    let pred_bin = binary_representation(prediction);

    let mut stats = BoundaryStats::default();
    for (r, p) in ref_bin.iter().zip(&pred_bin) {
        match (r, p) {
            (1, 1) => stats.char_tp += 1,
            (0, 1) => stats.char_fp += 1,
            (1, 0) => stats.char_fn += 1,
            _ => stats.char_tn += 1,
        }
    }

    let ref_words = find_word_boundaries(&ref_bin);
    let pred_words = find_word_boundaries(&pred_bin);
    stats.words_correct = find_words_correctly_tokenised(&ref_words, &pred_words)
        .iter()
        .filter(|ok| **ok)
        .count();
    stats.words_predicted = pred_words.len();
    stats.words_reference = ref_words.len();
    Ok(stats)
}

/// Score one predicted line against its reference
pub fn compute_stats(reference: &str, prediction: &str) -> Result<BoundaryStats> {
    line_stats(reference, prediction, 1)
}

fn check_line_counts(references: usize, predictions: usize) -> Result<()> {
    if references != predictions {
        return Err(SylcutError::invalid_argument(
            "predictions",
            format!(
                "{} reference lines but {} predicted lines",
                references, predictions
            ),
        ));
    }
    Ok(())
}

/// Score parallel reference and prediction lines
pub fn evaluate<R, P>(references: &[R], predictions: &[P]) -> Result<BoundaryStats>
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    check_line_counts(references.len(), predictions.len())?;
    let mut total = BoundaryStats::default();
    for (i, (r, p)) in references.iter().zip(predictions).enumerate() {
        total += line_stats(r.as_ref(), p.as_ref(), i + 1)?;
    }
    Ok(total)
}

fn is_thai_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c == '.' || ('\u{0E00}'..='\u{0E7F}').contains(&c))
}

/// Count Thai words of marked lines, markup tags removed
pub fn extract_vocab<S: AsRef<str>>(lines: &[S]) -> HashMap<String, usize> {
    let mut words = HashMap::new();
    for line in lines {
        let line = Step::RemoveTags.apply(line.as_ref().trim());
        for word in line.split(SEPARATOR).filter(|w| is_thai_word(w)) {
            *words.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    words
}

/// How well out-of-vocabulary reference words were segmented
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OovReport {
    /// Distinct reference words missing from the training vocabulary
    pub oov_words: usize,
    /// Occurrences of those words
    pub oov_freq: usize,
    /// Distinct OOV words segmented exactly at least once
    pub correct_words: usize,
    /// Exactly segmented OOV occurrences
    pub correct_freq: usize,
}

impl OovReport {
    /// Share of distinct OOV words found
    pub fn recall_count(&self) -> f64 {
        ratio(self.correct_words, self.oov_words)
    }

    /// Share of OOV occurrences found
    pub fn recall_freq(&self) -> f64 {
        ratio(self.correct_freq, self.oov_freq)
    }
}

/// Measure recall of reference words unseen in `train_vocab`
pub fn oov_report<R, P>(
    train_vocab: &HashMap<String, usize>,
    references: &[R],
    predictions: &[P],
) -> Result<OovReport>
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    check_line_counts(references.len(), predictions.len())?;
    let test_vocab = extract_vocab(references);
    let oov: HashMap<&str, usize> = test_vocab
        .iter()
        .filter(|(w, _)| !train_vocab.contains_key(*w))
        .map(|(w, c)| (w.as_str(), *c))
        .collect();

    let mut found: HashMap<String, usize> = HashMap::new();
    for (i, (r, p)) in references.iter().zip(predictions).enumerate() {
        let reference = Step::RemoveTags.apply(r.as_ref().trim());
        let prediction = Step::RemoveTags.apply(p.as_ref().trim());
        if unmarked(&reference) != unmarked(&prediction) {
            return Err(SylcutError::TextMismatch { line: i + 1 });
        }

        let ref_words = find_word_boundaries(&binary_representation(&reference));
        let pred_words = find_word_boundaries(&binary_representation(&prediction));
        let correct = find_words_correctly_tokenised(&ref_words, &pred_words);

        let chars: Vec<char> = unmarked(&reference).chars().collect();
        for (&(start, end), ok) in ref_words.iter().zip(correct) {
            let word: String = chars[start..end].iter().collect();
            if ok && oov.contains_key(word.as_str()) {
                *found.entry(word).or_insert(0) += 1;
            }
        }
    }

    let report = OovReport {
        oov_words: oov.len(),
        oov_freq: oov.values().sum(),
        correct_words: found.len(),
        correct_freq: found.values().sum(),
    };
    log::info!(
        "{} oov words (freq {}), {} segmented correctly (freq {})",
        report.oov_words,
        report.oov_freq,
        report.correct_words,
        report.correct_freq
    );
    Ok(report)
}
