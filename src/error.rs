//! Error types.

/// Errors from tokenization, tag coding and corpus handling.
#[derive(Debug, thiserror::Error)]
pub enum SylcutError {
    /// The predicted label sequence does not line up with the units.
    #[error("label sequence has {labels} labels but there are {units} units")]
    LengthMismatch {
        /// Number of labels given.
        labels: usize,
        /// Number of units given.
        units: usize,
    },

    /// A label id outside the selected scheme.
    #[error("label {label} is out of range for a scheme with {num_classes} classes")]
    InvalidLabel {
        /// The offending label.
        label: u8,
        /// Number of classes of the scheme.
        num_classes: usize,
    },

    /// Unrecognized label-scheme identifier.
    #[error("unknown label scheme `{0}`")]
    UnknownScheme(String),

    /// Unrecognized normalizer step name.
    #[error("unknown preprocessing step `{0}`")]
    UnknownStep(String),

    /// A substitution rule that does not compile.
    #[error("cannot create rule `{pattern}` because `{reason}`")]
    InvalidRule {
        /// The regex source.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A required model parameter is absent.
    #[error("missing model parameter `{0}`")]
    MissingParam(String),

    /// A model parameter is malformed or has the wrong type.
    #[error("invalid model parameter `{key}`: {reason}")]
    InvalidParam {
        /// Parameter key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An argument outside its domain.
    #[error("invalid argument `{arg}`: {msg}")]
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Error message.
        msg: String,
    },

    /// A single word is longer than the sequence limit.
    #[error("word `{word}` spans {units} units, more than the limit of {max_length}")]
    WordTooLong {
        /// Text of the word.
        word: String,
        /// Units it spans.
        units: usize,
        /// The limit that was exceeded.
        max_length: usize,
    },

    /// Reference and prediction disagree on the underlying text.
    #[error("reference and prediction texts differ at line {line}")]
    TextMismatch {
        /// One-based line number.
        line: usize,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SylcutError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument {
            arg,
            msg: msg.into(),
        }
    }
}

/// Result type for sylcut operations.
pub type Result<T, E = SylcutError> = std::result::Result<T, E>;
