//! Continuous numerical parameter: any number in `[min, max]`

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::parameter::{convert_number, expect_number, normalize_name, require_finite};
use crate::parameter::{Parameter, ParameterType};
use crate::plain::{constraint_map, ConstraintReader, Constraints};
use crate::value::ParamValue;
use rand::{Rng, RngCore};
use serde_json::json;

/// Continuous range parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousNumerical {
    name: String,
    min: f64,
    max: f64,
}

impl ContinuousNumerical {
    /// Create with bounds
    ///
    /// # Errors
    /// Returns error if the name is blank, a bound is not finite, or `min > max`
    pub fn new(name: &str, min: f64, max: f64) -> Result<Self, ParameterError> {
        let name = normalize_name(name)?;
        require_finite(&name, "min", min)?;
        require_finite(&name, "max", max)?;
        if min > max {
            return Err(ParameterError::invalid(
                name,
                format!("minimum value {min} must not exceed maximum value {max}"),
            ));
        }
        Ok(Self { name, min, max })
    }

    /// Lower bound
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
}

impl ParameterType for ContinuousNumerical {
    const TYPE_TAG: &'static str = "continuous_numerical";
    const DISPLAY_NAME: &'static str = "Continuous Numerical";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(name, reader.number("min")?, reader.number("max")?)
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, 0.0, 1.0)
    }
}

impl Parameter for ContinuousNumerical {
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
        if v < self.min || v > self.max {
            return Err(ValueIssue::OutOfRange(format!(
                "Value {v} is outside range [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        convert_number(&self.name, raw)
    }

    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue {
        if self.min == self.max {
            return ParamValue::Number(self.min);
        }
        if !(self.max - self.min).is_finite() {
            return ParamValue::Number(self.min / 2.0 + self.max / 2.0);
        }
        let sample = rng.gen_range(self.min..=self.max);
        // three decimals keep templates readable; clamp undoes rounding past a bound
        let rounded = (sample * 1000.0).round() / 1000.0;
        let value = if rounded.is_finite() {
            rounded.clamp(self.min, self.max)
        } else {
            sample
        };
        ParamValue::Number(value)
    }

    fn constraints(&self) -> Constraints {
        constraint_map([("min", json!(self.min)), ("max", json!(self.max))])
    }

    fn describe_constraints(&self) -> String {
        format!("start: {}, end: {}", self.min, self.max)
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}
