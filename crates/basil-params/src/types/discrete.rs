//! Discrete numerical parameters
//!
//! - [`DiscreteNumericalRegular`]: grid `min, min + step, ..., <= max`
//! - [`DiscreteNumericalIrregular`]: explicit list of numbers

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::parameter::{
    approx_eq, convert_number, expect_number, first_duplicate, format_numbers, normalize_name,
    require_finite, Parameter, ParameterType, STEP_TOLERANCE,
};
use crate::plain::{constraint_map, ConstraintReader, Constraints};
use crate::value::ParamValue;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::json;

/// Regularly spaced numeric parameter
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteNumericalRegular {
    name: String,
    min: f64,
    max: f64,
    step: f64,
}

impl DiscreteNumericalRegular {
    /// Create a grid parameter
    ///
    /// # Errors
    /// Returns error unless `min < max`, `step > 0` and `step <= max - min`
    pub fn new(name: &str, min: f64, max: f64, step: f64) -> Result<Self, ParameterError> {
        let name = normalize_name(name)?;
        require_finite(&name, "min", min)?;
        require_finite(&name, "max", max)?;
        require_finite(&name, "step", step)?;

        if min >= max {
            return Err(ParameterError::invalid(
                name,
                "minimum value must be less than maximum value",
            ));
        }
        if step <= 0.0 {
            return Err(ParameterError::invalid(name, "step size must be positive"));
        }
        if step > (max - min) + STEP_TOLERANCE * step {
            return Err(ParameterError::invalid(
                name,
                "step size cannot be larger than the range",
            ));
        }
        Ok(Self {
            name,
            min,
            max,
            step,
        })
    }

    /// Lower bound (first grid point)
    #[inline]
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    #[inline]
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Grid spacing
    #[inline]
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points in `[min, max]`, saturating at `u64::MAX`
    #[must_use]
    pub fn level_count(&self) -> u64 {
        self.last_level().saturating_add(1)
    }

    /// Index of the last grid point; float-to-int `as` saturates on wide grids
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn last_level(&self) -> u64 {
        ((self.max - self.min) / self.step + STEP_TOLERANCE).floor() as u64
    }

    fn slack(&self) -> f64 {
        STEP_TOLERANCE * self.step
    }
}

impl ParameterType for DiscreteNumericalRegular {
    const TYPE_TAG: &'static str = "discrete_numerical_regular";
    const DISPLAY_NAME: &'static str = "Discrete Numerical Regular";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(
            name,
            reader.number("min")?,
            reader.number("max")?,
            reader.number("step")?,
        )
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, 0.0, 10.0, 1.0)
    }
}

impl Parameter for DiscreteNumericalRegular {
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
        let v = expect_number(&self.name, value)?;
        if v < self.min - self.slack() || v > self.max + self.slack() {
            return Err(ValueIssue::OutOfRange(format!(
                "Value {v} is outside range [{}, {}]",
                self.min, self.max
            )));
        }
        let ratio = (v - self.min) / self.step;
        if (ratio - ratio.round()).abs() > STEP_TOLERANCE {
            return Err(ValueIssue::NotInAllowedSet(format!(
                "Value {v} does not align with step size {} from {}",
                self.step, self.min
            )));
        }
        Ok(())
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        convert_number(&self.name, raw)
    }

    #[allow(clippy::cast_precision_loss)]
    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue {
        let level = rng.gen_range(0..=self.last_level());
        let exact = self.min + level as f64 * self.step;
        // strip accumulation noise such as 0.30000000000000004 when it stays on-grid
        let tidy = (exact * 1e9).round() / 1e9;
        if tidy.is_finite() && self.validate(&ParamValue::Number(tidy)).is_ok() {
            ParamValue::Number(tidy)
        } else {
            ParamValue::Number(exact)
        }
    }

    fn constraints(&self) -> Constraints {
        constraint_map([
            ("min", json!(self.min)),
            ("max", json!(self.max)),
            ("step", json!(self.step)),
        ])
    }

    fn describe_constraints(&self) -> String {
        format!(
            "start: {}, stop: {}, step: {}",
            self.min, self.max, self.step
        )
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}

/// Numeric parameter restricted to an explicit value list
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteNumericalIrregular {
    name: String,
    values: Vec<f64>,
}

impl DiscreteNumericalIrregular {
    /// Create from the allowed values, keeping their order
    ///
    /// # Errors
    /// Returns error if the list is empty, holds non-finite numbers or duplicates
    pub fn new(name: &str, values: Vec<f64>) -> Result<Self, ParameterError> {
        let name = normalize_name(name)?;
        if values.is_empty() {
            return Err(ParameterError::invalid(name, "at least one value is required"));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ParameterError::invalid(
                name,
                format!("value at index {i} ({}) is not a finite number", values[i]),
            ));
        }
        if first_duplicate(&values).is_some() {
            return Err(ParameterError::invalid(name, "duplicate values are not allowed"));
        }
        Ok(Self { name, values })
    }

    /// Allowed values in declaration order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ParameterType for DiscreteNumericalIrregular {
    const TYPE_TAG: &'static str = "discrete_numerical_irregular";
    const DISPLAY_NAME: &'static str = "Discrete Numerical Irregular";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(name, reader.numbers("values")?)
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, vec![1.0, 2.0, 5.0])
    }
}

impl Parameter for DiscreteNumericalIrregular {
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
        let v = expect_number(&self.name, value)?;
        if self.values.iter().any(|allowed| approx_eq(*allowed, v)) {
            Ok(())
        } else {
            Err(ValueIssue::NotInAllowedSet(format!(
                "Value {v} is not in allowed values {}",
                format_numbers(&self.values)
            )))
        }
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        convert_number(&self.name, raw)
    }

    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue {
        // constructor guarantees a non-empty list
        let value = self.values.choose(rng).copied().unwrap_or(self.values[0]);
        ParamValue::Number(value)
    }

    fn constraints(&self) -> Constraints {
        constraint_map([("values", json!(self.values))])
    }

    fn describe_constraints(&self) -> String {
        let parts: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        parts.join(", ")
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}
