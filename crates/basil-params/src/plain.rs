//! Plain-form representation
//!
//! The persistence boundary handed to storage and UI layers:
//! `{"name": ..., "type": ..., "constraints": {...}}`.

use crate::error::ParameterError;
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Constraint record: field name to JSON primitive or list
pub type Constraints = serde_json::Map<String, JsonValue>;

/// Serializable parameter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainParameter {
    /// Parameter name
    pub name: String,

    /// Type tag
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Type-specific constraints
    #[serde(default)]
    pub constraints: Constraints,
}

impl PlainParameter {
    /// Create from parts
    #[inline]
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, constraints: Constraints) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            constraints,
        }
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or misses `name`/`type`
    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails (rare for JSON)
    pub fn to_json(&self) -> Result<String, ParameterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to a generic JSON value
    #[must_use]
    pub fn to_value(&self) -> JsonValue {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), JsonValue::String(self.name.clone()));
        map.insert("type".into(), JsonValue::String(self.type_tag.clone()));
        map.insert(
            "constraints".into(),
            JsonValue::Object(self.constraints.clone()),
        );
        JsonValue::Object(map)
    }
}

/// Build a constraint record from key/value pairs
pub(crate) fn constraint_map<const N: usize>(entries: [(&str, JsonValue); N]) -> Constraints {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Typed access to a constraint record
pub(crate) struct ConstraintReader<'a> {
    type_tag: &'static str,
    map: &'a Constraints,
}

impl<'a> ConstraintReader<'a> {
    pub(crate) fn new(type_tag: &'static str, map: &'a Constraints) -> Self {
        Self { type_tag, map }
    }

    fn get(&self, key: &str) -> Result<&'a JsonValue, ParameterError> {
        self.map
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ParameterError::MissingConstraint {
                type_tag: self.type_tag.to_string(),
                key: key.to_string(),
            })
    }

    fn malformed(&self, key: &str, reason: impl Into<String>) -> ParameterError {
        ParameterError::MalformedConstraint {
            type_tag: self.type_tag.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn number(&self, key: &str) -> Result<f64, ParameterError> {
        let value = self.get(key)?;
        value
            .as_f64()
            .ok_or_else(|| self.malformed(key, format!("expected a number, got {value}")))
    }

    pub(crate) fn numbers(&self, key: &str) -> Result<Vec<f64>, ParameterError> {
        let items = self.array(key)?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_f64().ok_or_else(|| {
                    self.malformed(key, format!("value at index {i} ({item}) is not a number"))
                })
            })
            .collect()
    }

    /// Strings; numeric entries are accepted and rendered as text
    pub(crate) fn strings(&self, key: &str) -> Result<Vec<String>, ParameterError> {
        let items = self.array(key)?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                JsonValue::String(s) => Ok(s.clone()),
                JsonValue::Number(n) => Ok(n.to_string()),
                other => Err(self.malformed(
                    key,
                    format!("value at index {i} ({other}) is not a string"),
                )),
            })
            .collect()
    }

    pub(crate) fn value(&self, key: &str) -> Result<ParamValue, ParameterError> {
        match self.get(key)? {
            JsonValue::Number(n) => n
                .as_f64()
                .map(ParamValue::Number)
                .ok_or_else(|| self.malformed(key, "number out of range")),
            JsonValue::String(s) => Ok(ParamValue::Text(s.clone())),
            other => Err(self.malformed(
                key,
                format!("expected a number or string, got {other}"),
            )),
        }
    }

    fn array(&self, key: &str) -> Result<&'a Vec<JsonValue>, ParameterError> {
        let value = self.get(key)?;
        value
            .as_array()
            .ok_or_else(|| self.malformed(key, format!("expected a list, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_form_json_shape() {
        let plain = PlainParameter::new(
            "temperature",
            "continuous_numerical",
            constraint_map([("min", json!(0.0)), ("max", json!(100.0))]),
        );
        let value: JsonValue = serde_json::from_str(&plain.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "continuous_numerical");
        assert_eq!(value["constraints"]["max"], 100.0);
        assert_eq!(value, plain.to_value());
    }

    #[test]
    fn missing_type_is_rejected() {
        let err = PlainParameter::from_json(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, ParameterError::PlainForm(_)));
    }

    #[test]
    fn constraints_default_to_empty() {
        let plain = PlainParameter::from_json(r#"{"name": "x", "type": "fixed"}"#).unwrap();
        assert!(plain.constraints.is_empty());
    }

    #[test]
    fn reader_reports_missing_and_malformed() {
        let map = constraint_map([("min", json!("low")), ("values", json!([1, "a"]))]);
        let reader = ConstraintReader::new("continuous_numerical", &map);

        assert!(matches!(
            reader.number("max"),
            Err(ParameterError::MissingConstraint { .. })
        ));
        assert!(matches!(
            reader.number("min"),
            Err(ParameterError::MalformedConstraint { .. })
        ));
        assert!(matches!(
            reader.numbers("values"),
            Err(ParameterError::MalformedConstraint { .. })
        ));
        assert_eq!(reader.strings("values").unwrap(), vec!["1", "a"]);
    }
}
