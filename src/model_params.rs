//! Model parameter strings such as `embs:8|conv:16|l1:16|do:0.0|oc:BI`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SylcutError};
use crate::label_scheme::LabelScheme;

/// Key of the output scheme parameter
pub const OUTPUT_SCHEME_KEY: &str = "oc";

/// A parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Bare key without a value, e.g. `crf`
    Flag(bool),
    /// All-digit value
    Int(i64),
    /// Value with a decimal point
    Float(f64),
    /// Anything else
    Str(String),
}

impl ParamValue {
    fn parse(value: &str) -> ParamValue {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(v) = value.parse() {
                return ParamValue::Int(v);
            }
        }
        if value.contains('.') {
            if let Ok(v) = value.parse() {
                return ParamValue::Float(v);
            }
        }
        ParamValue::Str(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag(_) => Ok(()),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{:?}", v),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

/// Parsed model parameters, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelParams {
    params: BTreeMap<String, ParamValue>,
}

impl ModelParams {
    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Set a value
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.params.insert(key.into(), value);
    }

    fn required(&self, key: &str) -> Result<&ParamValue> {
        self.get(key)
            .ok_or_else(|| SylcutError::MissingParam(key.to_string()))
    }

    fn invalid(key: &str, expected: &str, value: &ParamValue) -> SylcutError {
        SylcutError::InvalidParam {
            key: key.to_string(),
            reason: format!("expected {}, got `{}`", expected, value),
        }
    }

    /// Get an integer parameter
    pub fn get_int(&self, key: &str) -> Result<i64> {
        match self.required(key)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(Self::invalid(key, "an integer", other)),
        }
    }

    /// Get a float parameter; integers are widened
    pub fn get_float(&self, key: &str) -> Result<f64> {
        match self.required(key)? {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            other => Err(Self::invalid(key, "a number", other)),
        }
    }

    /// Get a string parameter
    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.required(key)? {
            ParamValue::Str(v) => Ok(v),
            other => Err(Self::invalid(key, "a string", other)),
        }
    }

    /// Get a float parameter, or `default` when absent
    pub fn get_float_or(&self, key: &str, default: f64) -> Result<f64> {
        if self.contains(key) {
            self.get_float(key)
        } else {
            Ok(default)
        }
    }

    /// Resolve the output scheme named by `oc`
    pub fn label_scheme(&self) -> Result<LabelScheme> {
        self.get_str(OUTPUT_SCHEME_KEY)?.parse()
    }
}

impl FromStr for ModelParams {
    type Err = SylcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut params = ModelParams::default();
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once(':') {
                Some((key, value)) => (key.trim(), ParamValue::parse(value.trim())),
                None => (part, ParamValue::Flag(true)),
            };
            if key.is_empty() {
                return Err(SylcutError::InvalidParam {
                    key: part.to_string(),
                    reason: "empty key".to_string(),
                });
            }
            params.insert(key, value);
        }
        Ok(params)
    }
}

impl fmt::Display for ModelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            match value {
                ParamValue::Flag(_) => f.write_str(key)?,
                _ => write!(f, "{}:{}", key, value)?,
            }
        }
        Ok(())
    }
}

/// Parse a `|`-separated list of `key:value` pairs
pub fn parse_model_params(s: &str) -> Result<ModelParams> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let params = parse_model_params("embs:8|conv:16|l1:16|do:0.0|oc:BI").unwrap();
        assert_eq!(params.get_int("embs").unwrap(), 8);
        assert_eq!(params.get_int("conv").unwrap(), 16);
        assert_eq!(params.get_float("do").unwrap(), 0.0);
        assert_eq!(params.get_str("oc").unwrap(), "BI");
        assert_eq!(params.label_scheme().unwrap(), LabelScheme::default());
    }

    #[test]
    fn test_flags_and_strings() {
        let params = parse_model_params("embs:sy-300|crf|oc:SchemeA").unwrap();
        assert!(params.contains("crf"));
        assert_eq!(params.get_str("embs").unwrap(), "sy-300");
        assert_eq!(params.label_scheme().unwrap(), LabelScheme::SchemeA);
        assert_eq!(params.get_float_or("do", 0.1).unwrap(), 0.1);
    }

    #[test]
    fn test_errors() {
        let params = parse_model_params("conv:abc|oc:BIES").unwrap();
        assert!(matches!(
            params.get_int("l1"),
            Err(SylcutError::MissingParam(_))
        ));
        assert!(matches!(
            params.get_int("conv"),
            Err(SylcutError::InvalidParam { .. })
        ));
        assert!(matches!(
            params.label_scheme(),
            Err(SylcutError::UnknownScheme(_))
        ));
        assert!(parse_model_params(":3").is_err());
    }

    #[test]
    fn test_display() {
        let params = parse_model_params("oc:BI|do:0.5|crf|l1:16").unwrap();
        assert_eq!(params.to_string(), "crf|do:0.5|l1:16|oc:BI");
        assert_eq!(parse_model_params(&params.to_string()).unwrap(), params);
    }
}
