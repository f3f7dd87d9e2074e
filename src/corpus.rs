//! Loading of `|`-marked reference corpora.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::label_scheme::{LabelScheme, SequenceExample};
use crate::normalizer::{preprocess, Step};

/// Training split file name
pub const TRAINING_FILE: &str = "training.txt";
/// Validation split file name
pub const VALIDATION_FILE: &str = "val.txt";

/// Normalize and encode every non-blank line of `reader`
pub fn read_examples<R: BufRead>(
    reader: R,
    scheme: LabelScheme,
    steps: &[Step],
) -> Result<Vec<SequenceExample>> {
    let mut examples = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let example = scheme.encode(&preprocess(line, steps));
        if !example.is_empty() {
            examples.push(example);
        }
    }
    Ok(examples)
}

/// Load a corpus file, one marked line per example
pub fn load_examples<P: AsRef<Path>>(
    path: P,
    scheme: LabelScheme,
    steps: &[Step],
) -> Result<Vec<SequenceExample>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let examples = read_examples(reader, scheme, steps)?;

    let units: usize = examples.iter().map(SequenceExample::len).sum();
    log::info!(
        "{}: {} examples, {} units, scheme {}",
        path.display(),
        examples.len(),
        units,
        scheme
    );
    Ok(examples)
}

/// Path of a split file inside a corpus directory
pub fn split_path<P: AsRef<Path>>(dir: P, file: &str) -> PathBuf {
    dir.as_ref().join(file)
}

/// Load one split, e.g. [`TRAINING_FILE`], of a corpus directory
pub fn load_split<P: AsRef<Path>>(
    dir: P,
    file: &str,
    scheme: LabelScheme,
    steps: &[Step],
) -> Result<Vec<SequenceExample>> {
    load_examples(split_path(dir, file), scheme, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::default_steps;
    use std::io::Cursor;

    #[test]
    fn test_read_examples() {
        let corpus = "<NE>ผม</NE>|ชอบ\n\n   \nวัน|ที่ ๑\n";
        let examples =
            read_examples(Cursor::new(corpus), LabelScheme::Binary, &default_steps()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].units, vec!["ผม", "ชอบ"]);
        assert_eq!(examples[0].labels, vec![1, 1]);
        assert_eq!(examples[1].units, vec!["วัน", "ที่", " ", "1"]);
        assert_eq!(examples[1].labels, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_split_path() {
        let path = split_path("data/best", TRAINING_FILE);
        assert!(path.ends_with("training.txt"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_split("/nonexistent/corpus", VALIDATION_FILE, LabelScheme::default(), &[]);
        assert!(err.is_err());
    }
}
