//! Parameter traits
//!
//! [`Parameter`] is the object-safe side used through `Box<dyn Parameter>`
//! by drafts, the template generator and the importer. [`ParameterType`] is
//! the static side each variant implements so the registry can build it from
//! a type tag.

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::plain::{Constraints, PlainParameter};
use crate::value::ParamValue;
use rand::RngCore;
use std::fmt::Debug;

/// Tolerance for floating-point membership and step alignment checks
///
/// Applied to the step ratio `(v - min) / step` and, scaled by magnitude,
/// to set membership of numeric values.
pub const STEP_TOLERANCE: f64 = 1e-9;

/// Capability set shared by all parameter variants
///
/// # Contract
/// - `validate` and `parse_cell` are pure and never panic
/// - `example_value` always returns a value that `validate` accepts
/// - `to_plain_form` captures everything needed to rebuild the parameter
pub trait Parameter: Debug + Send + Sync {
    /// Unique name within a campaign
    fn name(&self) -> &str;

    /// Stable type tag (plain-form `type` field)
    fn type_tag(&self) -> &'static str;

    /// Human-readable type name
    fn display_name(&self) -> &'static str;

    /// Check a candidate value against the constraints
    ///
    /// # Errors
    /// Returns the reason the value is not acceptable
    fn validate(&self, value: &ParamValue) -> Result<(), ValueIssue>;

    /// Convert a raw cell to this parameter's value kind without
    /// checking constraints
    ///
    /// # Errors
    /// Returns [`ValueIssue::TypeMismatch`] for blank or unconvertible cells
    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue>;

    /// Convert and validate a raw cell
    ///
    /// # Errors
    /// Returns the first issue found (conversion before constraints)
    fn parse_cell(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        let value = self.convert(raw)?;
        self.validate(&value)?;
        Ok(value)
    }

    /// Representative value consistent with the constraints
    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue;

    /// Constraint record for the plain form
    fn constraints(&self) -> Constraints;

    /// Short constraint summary for display and exports
    fn describe_constraints(&self) -> String;

    /// Clone into a new box
    fn clone_box(&self) -> Box<dyn Parameter>;

    /// Serializable record of tag, name and constraints
    fn to_plain_form(&self) -> PlainParameter {
        PlainParameter::new(self.name(), self.type_tag(), self.constraints())
    }
}

impl Clone for Box<dyn Parameter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Static side of a parameter variant
///
/// Implemented by every concrete variant; [`crate::ParameterRegistry::register_type`]
/// uses it to derive the registry constructors.
pub trait ParameterType: Parameter + Clone + Sized + 'static {
    /// Unique type tag
    const TYPE_TAG: &'static str;

    /// Display name
    const DISPLAY_NAME: &'static str;

    /// Build from a plain-form constraint record
    ///
    /// # Errors
    /// Returns error if keys are missing or constraints are inconsistent
    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError>;

    /// Build with the variant's default constraints
    ///
    /// # Errors
    /// Returns error only for an invalid name
    fn with_defaults(name: &str) -> Result<Self, ParameterError>;
}

/// Trim and check a parameter name
pub(crate) fn normalize_name(name: &str) -> Result<String, ParameterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ParameterError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Reject NaN and infinities in a numeric constraint
pub(crate) fn require_finite(name: &str, field: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::invalid(
            name,
            format!("{field} must be a finite number, got {value}"),
        ))
    }
}

/// Parse a raw cell as a finite number
pub(crate) fn convert_number(name: &str, raw: &str) -> Result<ParamValue, ValueIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValueIssue::TypeMismatch(format!(
            "Empty value for parameter '{name}'"
        )));
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(ParamValue::Number(n)),
        _ => Err(ValueIssue::TypeMismatch(format!(
            "Cannot convert '{trimmed}' for parameter '{name}' to a number"
        ))),
    }
}

/// Take a raw cell as trimmed, non-blank text
pub(crate) fn convert_text(name: &str, raw: &str) -> Result<ParamValue, ValueIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValueIssue::TypeMismatch(format!(
            "Empty value for parameter '{name}'"
        )));
    }
    Ok(ParamValue::Text(trimmed.to_string()))
}

/// Extract a number or report a type mismatch
pub(crate) fn expect_number(name: &str, value: &ParamValue) -> Result<f64, ValueIssue> {
    match value {
        ParamValue::Number(n) => Ok(*n),
        ParamValue::Text(s) => Err(ValueIssue::TypeMismatch(format!(
            "Parameter '{name}' expects a number, got '{s}'"
        ))),
    }
}

/// Extract text or report a type mismatch
pub(crate) fn expect_text<'v>(name: &str, value: &'v ParamValue) -> Result<&'v str, ValueIssue> {
    match value {
        ParamValue::Text(s) => Ok(s.trim()),
        ParamValue::Number(n) => Err(ValueIssue::TypeMismatch(format!(
            "Parameter '{name}' expects text, got number {n}"
        ))),
    }
}

/// Numeric equality within [`STEP_TOLERANCE`], scaled for large magnitudes
#[inline]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= STEP_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Render a list of numbers as `[1, 2, 5]`
pub(crate) fn format_numbers(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Render a list of labels as `['A', 'B']`
pub(crate) fn format_labels(values: &[String]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    format!("[{}]", parts.join(", "))
}

/// Position of the first duplicate in an already trimmed list
pub(crate) fn first_duplicate<T: PartialEq>(values: &[T]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .find(|(i, v)| values[..*i].contains(v))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_name("  temp ").unwrap(), "temp");
        assert_eq!(normalize_name("   "), Err(ParameterError::EmptyName));
        assert_eq!(normalize_name(""), Err(ParameterError::EmptyName));
    }

    #[test]
    fn number_conversion() {
        assert_eq!(convert_number("t", " 12.5 "), Ok(ParamValue::Number(12.5)));
        assert!(matches!(
            convert_number("t", "abc"),
            Err(ValueIssue::TypeMismatch(_))
        ));
        assert!(matches!(
            convert_number("t", "NaN"),
            Err(ValueIssue::TypeMismatch(_))
        ));
        assert!(matches!(
            convert_number("t", ""),
            Err(ValueIssue::TypeMismatch(_))
        ));
    }

    #[test]
    fn approx_equality() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(approx_eq(1e12, 1e12 + 1e-3));
        assert!(!approx_eq(1.0, 1.001));
    }

    #[test]
    fn duplicate_detection() {
        assert_eq!(first_duplicate(&[1, 2, 3]), None);
        assert_eq!(first_duplicate(&["a", "b", "a"]), Some(2));
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_numbers(&[1.0, 2.0, 5.0]), "[1, 2, 5]");
        assert_eq!(
            format_labels(&["A".to_string(), "B".to_string()]),
            "['A', 'B']"
        );
    }
}
