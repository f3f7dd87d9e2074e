//! # sylcut
//!
//! Thai syllable tokenization and word-boundary tagging for
//! sequence-labelling word segmenters.
//!
//! Raw text goes through a [`normalizer`] pipeline, is cut into syllable-like
//! units by the [`Syllabifier`], and each unit is either mapped to a coarse
//! token class for feature lookup or given a word-boundary label for
//! training. Predicted labels decode back into words.
//!
//! ## Quick Start
//!
//! ```rust
//! use sylcut::{preprocess_default, syllable_tokenize};
//!
//! let text = preprocess_default("<NE>วันนี้ โรงเรียนเปิด</NE>");
//! let units = syllable_tokenize(&text);
//! assert_eq!(units, vec!["วัน", "นี้", " ", "โรง", "เรียน", "เปิด"]);
//! ```
//!
//! ## Tagging
//!
//! References mark word boundaries with `|`. A [`LabelScheme`] encodes them
//! as one label per unit and decodes predictions back into words:
//!
//! ```rust
//! use sylcut::LabelScheme;
//!
//! let scheme: LabelScheme = "BI".parse().unwrap();
//! let example = scheme.encode("ผม|ไม่|ชอบ");
//! assert_eq!(example.labels, vec![1, 1, 1]);
//!
//! let words = scheme.decode_words(&[1, 0, 1], &example.units).unwrap();
//! assert_eq!(words, vec!["ผมไม่", "ชอบ"]);
//! ```

pub mod char_categories;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod label_scheme;
pub mod model_params;
pub mod normalizer;
pub mod patterns;
pub mod reference;
pub mod splitter;
pub mod syllabifier;
pub mod syllable;
pub mod token_class;
pub mod unit;
pub mod vocabulary;

// Re-export main types for convenience
pub use char_categories::{char_type_ids, get_char_category, CategorizedText, CharCategory};
pub use error::{Result, SylcutError};
pub use evaluation::{compute_stats, evaluate, BoundaryStats, OovReport};
pub use label_scheme::{find_words_from_preds, LabelScheme, SequenceExample, WordSpan};
pub use model_params::{parse_model_params, ModelParams, ParamValue};
pub use normalizer::{default_steps, preprocess, preprocess_default, Rule, Step};
pub use patterns::expand_camel_case_to_tokens;
pub use reference::MarkedText;
pub use splitter::{split_long_sequence, LongSequenceSplitter, OversizePolicy};
pub use syllabifier::{syllable_tokenize, Matcher, Syllabifier};
pub use token_class::{syllable_to_token, TokenClass};
pub use unit::{Unit, UnitKind};
pub use vocabulary::Vocabulary;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
