//! Plain form of a draft
//!
//! [`DraftRecord`] is the serializable mirror of [`CampaignDraft`]: targets
//! as-is, parameters as [`PlainParameter`] records. Rebuilding goes through
//! the draft's own mutators so a hand-edited record cannot smuggle in
//! duplicate names or inconsistent targets.

use crate::draft::{
    CampaignDraft, DataRow, DEFAULT_ACQUISITION_FUNCTION, DEFAULT_SURROGATE_MODEL,
};
use crate::error::DraftError;
use crate::target::Target;
use basil_params::{ParameterRegistry, PlainParameter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_acquisition_function() -> String {
    DEFAULT_ACQUISITION_FUNCTION.to_string()
}

fn default_surrogate_model() -> String {
    DEFAULT_SURROGATE_MODEL.to_string()
}

/// Serializable draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub targets: Vec<Target>,

    #[serde(default)]
    pub parameters: Vec<PlainParameter>,

    #[serde(default)]
    pub initial_dataset: Vec<DataRow>,

    #[serde(default = "default_acquisition_function")]
    pub acquisition_function: String,

    #[serde(default = "default_surrogate_model")]
    pub surrogate_model: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl CampaignDraft {
    /// Serializable record of the whole draft
    #[must_use]
    pub fn to_plain_form(&self) -> DraftRecord {
        DraftRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            targets: self.targets.clone(),
            parameters: self.parameters.iter().map(|p| p.to_plain_form()).collect(),
            initial_dataset: self.initial_dataset.clone(),
            acquisition_function: self.acquisition_function.clone(),
            surrogate_model: self.surrogate_model.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Rebuild a draft, resolving parameter types through `registry`
    ///
    /// Id and timestamps are taken from the record.
    ///
    /// # Errors
    /// Returns error for unknown parameter types, invalid constraints,
    /// invalid targets or clashing names
    pub fn from_plain_form(
        record: DraftRecord,
        registry: &ParameterRegistry,
    ) -> Result<Self, DraftError> {
        let mut draft = Self::new(&record.name);
        draft.description = record.description;
        draft.acquisition_function = record.acquisition_function;
        draft.surrogate_model = record.surrogate_model;

        for parameter in registry.from_plain_forms(&record.parameters)? {
            draft.add_parameter(parameter)?;
        }
        for target in record.targets {
            draft.add_target(target)?;
        }
        draft.initial_dataset = record.initial_dataset;

        draft.id = record.id;
        draft.created_at = record.created_at;
        draft.updated_at = record.updated_at;
        Ok(draft)
    }

    /// Encode as pretty JSON
    ///
    /// # Errors
    /// Returns [`DraftError::Json`] if encoding fails
    pub fn to_json(&self) -> Result<String, DraftError> {
        Ok(serde_json::to_string_pretty(&self.to_plain_form())?)
    }

    /// Decode from JSON
    ///
    /// # Errors
    /// Returns [`DraftError::Json`] for malformed input, otherwise as
    /// [`Self::from_plain_form`]
    pub fn from_json(json: &str, registry: &ParameterRegistry) -> Result<Self, DraftError> {
        let record: DraftRecord = serde_json::from_str(json)?;
        Self::from_plain_form(record, registry)
    }

    /// Encode as YAML
    ///
    /// # Errors
    /// Returns [`DraftError::Yaml`] if encoding fails
    pub fn to_yaml(&self) -> Result<String, DraftError> {
        Ok(serde_yaml::to_string(&self.to_plain_form())?)
    }

    /// Decode from YAML
    ///
    /// # Errors
    /// Returns [`DraftError::Yaml`] for malformed input, otherwise as
    /// [`Self::from_plain_form`]
    pub fn from_yaml(yaml: &str, registry: &ParameterRegistry) -> Result<Self, DraftError> {
        let record: DraftRecord = serde_yaml::from_str(yaml)?;
        Self::from_plain_form(record, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetMode;
    use basil_params::{registry, Categorical, ParameterError};
    use serde_json::json;

    #[test]
    fn record_keeps_identity() {
        let draft = CampaignDraft::builder("Screening")
            .parameter(Categorical::new("catalyst", ["X", "Y"]).unwrap())
            .target(Target::new("yield", TargetMode::Max).unwrap())
            .build()
            .unwrap();

        let rebuilt =
            CampaignDraft::from_plain_form(draft.to_plain_form(), registry::global()).unwrap();
        assert_eq!(rebuilt.id(), draft.id());
        assert_eq!(rebuilt.created_at(), draft.created_at());
        assert_eq!(rebuilt.to_plain_form(), draft.to_plain_form());
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = json!({
            "name": "minimal",
            "parameters": [
                {"name": "temp", "type": "continuous_numerical", "constraints": {"min": 0, "max": 10}}
            ]
        });
        let draft = CampaignDraft::from_json(&json.to_string(), registry::global()).unwrap();
        assert_eq!(draft.acquisition_function(), "qLogEI");
        assert_eq!(draft.parameter_names(), vec!["temp"]);
        assert!(draft.targets().is_empty());
    }

    #[test]
    fn unknown_type_is_reported() {
        let json = json!({
            "name": "bad",
            "parameters": [{"name": "q", "type": "quantum"}]
        });
        let err = CampaignDraft::from_json(&json.to_string(), registry::global()).unwrap_err();
        assert_eq!(
            err,
            DraftError::Parameter(ParameterError::UnknownType("quantum".into()))
        );
    }

    #[test]
    fn duplicate_names_in_record_are_rejected() {
        let json = json!({
            "name": "dup",
            "parameters": [
                {"name": "t", "type": "fixed", "constraints": {"value": 1}},
                {"name": "t", "type": "fixed", "constraints": {"value": 2}}
            ]
        });
        assert!(matches!(
            CampaignDraft::from_json(&json.to_string(), registry::global()),
            Err(DraftError::DuplicateParameter(_))
        ));
    }

    #[test]
    fn malformed_json_and_yaml() {
        assert!(matches!(
            CampaignDraft::from_json("{", registry::global()),
            Err(DraftError::Json(_))
        ));
        assert!(matches!(
            CampaignDraft::from_yaml("name: [", registry::global()),
            Err(DraftError::Yaml(_))
        ));
    }
}
