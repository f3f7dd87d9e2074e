//! Text normalization pipeline.
//!
//! A pipeline is an ordered list of [`Step`]s, each a pure text-to-text
//! rewrite. Steps are applied strictly in order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, SylcutError};
use crate::patterns::expand_camel_case_to_tokens;

/// Opening or closing markup tag such as `<AZ>` or `</AZ>`
static TAG_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Z]+>").expect("valid tag regex"));

/// NIKHAHIT typed before SARA AA, possibly around a tone mark
static SARA_AM_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("\u{0E4D}([\u{0E48}-\u{0E4B}]?)\u{0E32}").expect("valid sara am regex")
});

/// A substitution rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Regular expression to search for
    pub pattern: String,
    /// Replacement, may refer to capture groups as `$1`
    pub replacement: String,
}

/// A substitution rule with its pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Compiled pattern
    pub pattern: Regex,
    /// Replacement text
    pub replacement: String,
}

impl CompiledRule {
    /// Compile a rule
    pub fn from_rule(rule: &Rule) -> Result<CompiledRule> {
        let pattern = Regex::new(&rule.pattern).map_err(|e| SylcutError::InvalidRule {
            pattern: rule.pattern.clone(),
            reason: e.to_string(),
        })?;
        Ok(CompiledRule {
            pattern,
            replacement: rule.replacement.clone(),
        })
    }

    /// Compile a list of rules, failing on the first bad one
    pub fn from_rules(rules: &[Rule]) -> Result<Vec<CompiledRule>> {
        rules.iter().map(Self::from_rule).collect()
    }

    /// Apply the rule to every match in `text`
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// One rewrite pass of the pipeline
#[derive(Clone)]
pub enum Step {
    /// Strip opening and closing markup tags
    RemoveTags,
    /// Convert Thai digits `๐`..`๙` to `0`..`9`
    ThaiDigitToArabicDigit,
    /// Replace line breaks with a space
    NewLineAsSpace,
    /// Insert a space at each lowercase-to-uppercase transition
    ExpandCamelCase,
    /// Collapse runs of three or more identical Thai characters to one
    CollapseRepeatedChars,
    /// Unicode canonical composition
    Nfc,
    /// Rewrite NIKHAHIT + SARA AA as SARA AM
    ComposeSaraAm,
    /// A regex substitution
    Replace(CompiledRule),
    /// Any other pure rewrite
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Step {
    /// Look up a built-in step by name
    pub fn from_name(name: &str) -> Result<Step> {
        match name {
            "remove_tags" => Ok(Step::RemoveTags),
            "thai_digit_to_arabic_digit" => Ok(Step::ThaiDigitToArabicDigit),
            "new_line_as_space" => Ok(Step::NewLineAsSpace),
            "expand_camel_case" => Ok(Step::ExpandCamelCase),
            "collapse_repeated_chars" => Ok(Step::CollapseRepeatedChars),
            "nfc" => Ok(Step::Nfc),
            "compose_sara_am" => Ok(Step::ComposeSaraAm),
            _ => Err(SylcutError::UnknownStep(name.to_string())),
        }
    }

    /// A substitution step from a rule
    pub fn replace(rule: &Rule) -> Result<Step> {
        Ok(Step::Replace(CompiledRule::from_rule(rule)?))
    }

    /// A step from an arbitrary function
    pub fn custom<F>(f: F) -> Step
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Step::Custom(Arc::new(f))
    }

    /// Name of the step
    pub fn name(&self) -> &'static str {
        match self {
            Step::RemoveTags => "remove_tags",
            Step::ThaiDigitToArabicDigit => "thai_digit_to_arabic_digit",
            Step::NewLineAsSpace => "new_line_as_space",
            Step::ExpandCamelCase => "expand_camel_case",
            Step::CollapseRepeatedChars => "collapse_repeated_chars",
            Step::Nfc => "nfc",
            Step::ComposeSaraAm => "compose_sara_am",
            Step::Replace(_) => "replace",
            Step::Custom(_) => "custom",
        }
    }

    /// Apply this step to `text`
    pub fn apply(&self, text: &str) -> String {
        match self {
            Step::RemoveTags => TAG_RX.replace_all(text, "").into_owned(),
            Step::ThaiDigitToArabicDigit => text.chars().map(thai_digit_to_arabic).collect(),
            Step::NewLineAsSpace => text
                .replace("\r\n", " ")
                .replace(|c: char| c == '\n' || c == '\r', " "),
            Step::ExpandCamelCase => expand_camel_case_to_tokens(text).join(" "),
            Step::CollapseRepeatedChars => collapse_repeated_chars(text),
            Step::Nfc => text.nfc().collect(),
            Step::ComposeSaraAm => SARA_AM_RX.replace_all(text, "${1}\u{0E33}").into_owned(),
            Step::Replace(rule) => rule.apply(text),
            Step::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Replace(rule) => write!(
                f,
                "Replace({:?} -> {:?})",
                rule.pattern.as_str(),
                rule.replacement
            ),
            _ => f.write_str(self.name()),
        }
    }
}

fn thai_digit_to_arabic(c: char) -> char {
    match c {
        '\u{0E50}'..='\u{0E59}' => char::from(b'0' + (c as u32 - 0x0E50) as u8),
        _ => c,
    }
}

fn collapse_repeated_chars(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] == c {
            j += 1;
        }
        let is_thai = ('\u{0E00}'..='\u{0E7F}').contains(&c);
        if is_thai && j - i >= 3 {
            out.push(c);
        } else {
            out.extend(&chars[i..j]);
        }
        i = j;
    }
    out
}

/// Names of the default steps
pub const DEFAULT_STEPS: [&str; 2] = ["remove_tags", "thai_digit_to_arabic_digit"];

/// The default pipeline: strip tags, then convert Thai digits
pub fn default_steps() -> Vec<Step> {
    vec![Step::RemoveTags, Step::ThaiDigitToArabicDigit]
}

/// Build a pipeline from step names
pub fn steps_from_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<Step>> {
    names.iter().map(|n| Step::from_name(n.as_ref())).collect()
}

/// An entry of a JSON step list: a step name or a substitution rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSpec {
    /// Built-in step by name
    Name(String),
    /// Substitution rule
    Rule(Rule),
}

impl StepSpec {
    /// Resolve to a step
    pub fn to_step(&self) -> Result<Step> {
        match self {
            StepSpec::Name(name) => Step::from_name(name),
            StepSpec::Rule(rule) => Step::replace(rule),
        }
    }
}

/// Parse a JSON list of step names and rules,
/// e.g. `["remove_tags", {"pattern": "ชอบ", "replacement": "เกลียด"}]`
pub fn parse_steps_json(json: &str) -> Result<Vec<Step>> {
    let specs: Vec<StepSpec> = serde_json::from_str(json)?;
    let steps = specs.iter().map(StepSpec::to_step).collect::<Result<Vec<_>>>()?;
    log::debug!("loaded {} preprocessing steps: {:?}", steps.len(), steps);
    Ok(steps)
}

/// Read a JSON step list from a file
pub fn load_steps_json<P: AsRef<Path>>(path: P) -> Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)?;
    parse_steps_json(&json)
}

/// Apply `steps` to `text` in order
pub fn preprocess(text: &str, steps: &[Step]) -> String {
    steps
        .iter()
        .fold(text.to_string(), |acc, step| step.apply(&acc))
}

/// Apply the default pipeline
pub fn preprocess_default(text: &str) -> String {
    preprocess(text, &default_steps())
}
