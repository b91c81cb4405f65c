//! Categorical parameter: one label out of a fixed list

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::parameter::{
    convert_text, expect_text, first_duplicate, format_labels, normalize_name, Parameter,
    ParameterType,
};
use crate::plain::{constraint_map, ConstraintReader, Constraints};
use crate::value::ParamValue;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde_json::json;

/// Label parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorical {
    name: String,
    categories: Vec<String>,
}

impl Categorical {
    /// Create from labels; each label is trimmed
    ///
    /// # Errors
    /// Returns error for an empty list, blank labels or duplicates after trimming
    pub fn new<I, S>(name: &str, categories: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = normalize_name(name)?;
        let categories: Vec<String> = categories
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .collect();

        if categories.is_empty() {
            return Err(ParameterError::invalid(
                name,
                "at least one category is required",
            ));
        }
        if let Some(i) = categories.iter().position(String::is_empty) {
            return Err(ParameterError::invalid(
                name,
                format!("category at index {i} cannot be empty"),
            ));
        }
        if first_duplicate(&categories).is_some() {
            return Err(ParameterError::invalid(
                name,
                "duplicate categories are not allowed",
            ));
        }
        Ok(Self { name, categories })
    }

    /// Allowed labels in declaration order
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

impl ParameterType for Categorical {
    const TYPE_TAG: &'static str = "categorical";
    const DISPLAY_NAME: &'static str = "Categorical";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(name, reader.strings("values")?)
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, ["A", "B", "C"])
    }
}

impl Parameter for Categorical {
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
        let label = expect_text(&self.name, value)?;
        if self.categories.iter().any(|c| c == label) {
            Ok(())
        } else {
            Err(ValueIssue::NotInAllowedSet(format!(
                "Value '{label}' is not in allowed categories {}",
                format_labels(&self.categories)
            )))
        }
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        convert_text(&self.name, raw)
    }

    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue {
        let label = self
            .categories
            .choose(rng)
            .unwrap_or(&self.categories[0])
            .clone();
        ParamValue::Text(label)
    }

    fn constraints(&self) -> Constraints {
        constraint_map([("values", json!(self.categories))])
    }

    fn describe_constraints(&self) -> String {
        self.categories.join(", ")
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}
