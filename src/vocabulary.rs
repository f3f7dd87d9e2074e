//! Unit vocabulary for feature lookup.
//!
//! Units are looked up by their class token (see [`syllable_to_token`]), so
//! every number shares `<NUMBER>` and so on, while generic syllables are kept
//! by their own text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::label_scheme::SequenceExample;
use crate::token_class::syllable_to_token;

/// Padding token
pub const PAD: &str = "<PAD>";
/// Unknown token
pub const UNK: &str = "<UNK>";
/// Id of [`PAD`]
pub const PAD_ID: usize = 0;
/// Id of [`UNK`]
pub const UNK_ID: usize = 1;

/// Token to id mapping; ids are dense and `<PAD>`, `<UNK>` come first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// A vocabulary holding only the reserved tokens
    pub fn new() -> Self {
        let mut vocab = Vocabulary {
            tokens: Vec::new(),
            ids: HashMap::new(),
        };
        vocab.insert(PAD);
        vocab.insert(UNK);
        vocab
    }

    /// Build from training examples, keeping tokens seen at least
    /// `min_freq` times. More frequent tokens get smaller ids.
    pub fn build<'a, I>(examples: I, min_freq: usize) -> Self
    where
        I: IntoIterator<Item = &'a SequenceExample>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for example in examples {
            for unit in &example.units {
                *counts.entry(syllable_to_token(unit).into_owned()).or_insert(0) += 1;
            }
        }

        let total = counts.len();
        let mut kept: Vec<(String, usize)> = counts
            .into_iter()
            .filter(|(_, count)| *count >= min_freq)
            .collect();
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut vocab = Vocabulary::new();
        for (token, _) in &kept {
            vocab.insert(token);
        }
        log::info!(
            "vocabulary: kept {} of {} distinct tokens (min freq {})",
            kept.len(),
            total,
            min_freq
        );
        vocab
    }

    /// Add a token if absent and return its id
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.tokens.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        id
    }

    /// Id of a token, if known
    pub fn get(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    /// Id of a token, [`UNK_ID`] if unknown
    pub fn id(&self, token: &str) -> usize {
        self.get(token).unwrap_or(UNK_ID)
    }

    /// Token of an id
    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    /// Number of tokens, reserved ones included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Map unit strings to ids through their class tokens
    pub fn encode_units<S: AsRef<str>>(&self, units: &[S]) -> Vec<usize> {
        units
            .iter()
            .map(|u| self.id(&syllable_to_token(u.as_ref())))
            .collect()
    }

    /// Write as a JSON list of tokens ordered by id
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &self.tokens)?;
        Ok(())
    }

    /// Read a JSON list of tokens
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let vocab: Vocabulary = serde_json::from_reader(reader)?;
        log::debug!("loaded vocabulary of {} tokens", vocab.len());
        Ok(vocab)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(tokens: Vec<String>) -> Self {
        let mut vocab = Vocabulary::new();
        for token in &tokens {
            vocab.insert(token);
        }
        vocab
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.tokens
    }
}
