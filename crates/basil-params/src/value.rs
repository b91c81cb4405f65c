//! Parameter values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parameter value: numeric or text
///
/// Serializes untagged, so `1.5` and `"ethanol"` appear as plain JSON
/// primitives in the plain form and in imported datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric value
    Number(f64),
    /// Label, SMILES string or other text
    Text(String),
}

impl ParamValue {
    /// Numeric content, if any
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Text content, if any
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    /// Check if the value is numeric
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_csv_friendly() {
        assert_eq!(ParamValue::Number(5.0).to_string(), "5");
        assert_eq!(ParamValue::Number(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::from("CCO").to_string(), "CCO");
    }

    #[test]
    fn untagged_json() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[1, 2.5, "X"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ParamValue::Number(1.0),
                ParamValue::Number(2.5),
                ParamValue::Text("X".into())
            ]
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(ParamValue::from(3).as_f64(), Some(3.0));
        assert_eq!(ParamValue::from("a").as_text(), Some("a"));
        assert!(ParamValue::from(1.0).is_number());
        assert!(ParamValue::from("1").as_f64().is_none());
    }
}
