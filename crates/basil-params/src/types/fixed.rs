//! Fixed parameter: a single constant value

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::parameter::{
    approx_eq, convert_number, convert_text, normalize_name, require_finite, Parameter,
    ParameterType,
};
use crate::plain::{ConstraintReader, Constraints};
use crate::value::ParamValue;
use rand::RngCore;
use serde_json::json;

/// Constant parameter; numeric or text
#[derive(Debug, Clone, PartialEq)]
pub struct Fixed {
    name: String,
    value: ParamValue,
}

impl Fixed {
    /// Create with the constant value; text is trimmed
    ///
    /// # Errors
    /// Returns error for non-finite numbers or blank text
    pub fn new(name: &str, value: impl Into<ParamValue>) -> Result<Self, ParameterError> {
        let name = normalize_name(name)?;
        let value = match value.into() {
            ParamValue::Number(n) => {
                require_finite(&name, "value", n)?;
                ParamValue::Number(n)
            }
            ParamValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParameterError::invalid(name, "fixed value cannot be empty"));
                }
                ParamValue::Text(trimmed.to_string())
            }
        };
        Ok(Self { name, value })
    }

    /// The constant
    #[inline]
    #[must_use]
    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}

impl ParameterType for Fixed {
    const TYPE_TAG: &'static str = "fixed";
    const DISPLAY_NAME: &'static str = "Fixed";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(name, reader.value("value")?)
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, 1.0)
    }
}

impl Parameter for Fixed {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate(&self, value: &ParamValue) -> Result<(), ValueIssue> {
        let matches = match (&self.value, value) {
            (ParamValue::Number(expected), ParamValue::Number(got)) => approx_eq(*expected, *got),
            (ParamValue::Text(expected), ParamValue::Text(got)) => expected == got.trim(),
            (ParamValue::Number(_), ParamValue::Text(got)) => {
                return Err(ValueIssue::TypeMismatch(format!(
                    "Parameter '{}' expects a number, got '{got}'",
                    self.name
                )))
            }
            (ParamValue::Text(_), ParamValue::Number(got)) => {
                return Err(ValueIssue::TypeMismatch(format!(
                    "Parameter '{}' expects text, got number {got}",
                    self.name
                )))
            }
        };
        if matches {
            Ok(())
        } else {
            Err(ValueIssue::NotInAllowedSet(format!(
                "Value '{value}' does not match fixed value '{}'",
                self.value
            )))
        }
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        match self.value {
            ParamValue::Number(_) => convert_number(&self.name, raw),
            ParamValue::Text(_) => convert_text(&self.name, raw),
        }
    }

    fn example_value(&self, _rng: &mut dyn RngCore) -> ParamValue {
        self.value.clone()
    }

    fn constraints(&self) -> Constraints {
        let mut map = Constraints::new();
        let value = match &self.value {
            ParamValue::Number(n) => json!(n),
            ParamValue::Text(s) => json!(s),
        };
        map.insert("value".to_string(), value);
        map
    }

    fn describe_constraints(&self) -> String {
        format!("Value: {}", self.value)
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}
