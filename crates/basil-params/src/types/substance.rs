//! Substance parameter: one molecule out of a list of SMILES strings

use crate::error::ParameterError;
use crate::issue::ValueIssue;
use crate::parameter::{
    convert_text, expect_text, first_duplicate, format_labels, normalize_name, Parameter,
    ParameterType,
};
use crate::plain::{constraint_map, ConstraintReader, Constraints};
use crate::smiles::check_smiles;
use crate::value::ParamValue;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde_json::json;

/// Molecule parameter identified by SMILES
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substance {
    name: String,
    smiles: Vec<String>,
}

impl Substance {
    /// Create from SMILES strings; each entry is trimmed
    ///
    /// # Errors
    /// Returns error for an empty list, malformed entries or duplicates
    pub fn new<I, S>(name: &str, smiles: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = normalize_name(name)?;
        let smiles: Vec<String> = smiles
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .collect();

        if smiles.is_empty() {
            return Err(ParameterError::invalid(
                name,
                "at least one SMILES string is required",
            ));
        }
        for (i, entry) in smiles.iter().enumerate() {
            check_smiles(entry).map_err(|err| {
                ParameterError::invalid(&name, format!("SMILES at index {i} ('{entry}'): {err}"))
            })?;
        }
        if first_duplicate(&smiles).is_some() {
            return Err(ParameterError::invalid(
                name,
                "duplicate SMILES strings are not allowed",
            ));
        }
        Ok(Self { name, smiles })
    }

    /// Allowed SMILES in declaration order
    #[inline]
    #[must_use]
    pub fn smiles(&self) -> &[String] {
        &self.smiles
    }
}

impl ParameterType for Substance {
    const TYPE_TAG: &'static str = "substance";
    const DISPLAY_NAME: &'static str = "Substance";

    fn from_constraints(name: &str, constraints: &Constraints) -> Result<Self, ParameterError> {
        let reader = ConstraintReader::new(Self::TYPE_TAG, constraints);
        Self::new(name, reader.strings("values")?)
    }

    fn with_defaults(name: &str) -> Result<Self, ParameterError> {
        Self::new(name, ["CCO", "CCCCO"])
    }
}

impl Parameter for Substance {
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
        let smiles = expect_text(&self.name, value)?;
        if let Err(err) = check_smiles(smiles) {
            return Err(ValueIssue::TypeMismatch(format!(
                "'{smiles}' is not a valid SMILES string: {err}"
            )));
        }
        if self.smiles.iter().any(|s| s == smiles) {
            Ok(())
        } else {
            Err(ValueIssue::NotInAllowedSet(format!(
                "SMILES '{smiles}' is not in allowed list {}",
                format_labels(&self.smiles)
            )))
        }
    }

    fn convert(&self, raw: &str) -> Result<ParamValue, ValueIssue> {
        convert_text(&self.name, raw)
    }

    fn example_value(&self, rng: &mut dyn RngCore) -> ParamValue {
        let smiles = self.smiles.choose(rng).unwrap_or(&self.smiles[0]).clone();
        ParamValue::Text(smiles)
    }

    fn constraints(&self) -> Constraints {
        constraint_map([("values", json!(self.smiles))])
    }

    fn describe_constraints(&self) -> String {
        format!("SMILES: {}", self.smiles.join(", "))
    }

    fn clone_box(&self) -> Box<dyn Parameter> {
        Box::new(self.clone())
    }
}
