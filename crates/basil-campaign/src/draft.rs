//! Campaign draft
//!
//! The in-progress campaign assembled step by step. A draft is a plain value
//! owned by one session and handed from step to step; every mutation goes
//! through a method that keeps the column namespace consistent:
//! parameter names are unique, target names are unique, and no target shares
//! a name with a parameter.

use crate::builder::DraftBuilder;
use crate::error::DraftError;
use crate::target::Target;
use basil_params::{ParamValue, Parameter};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

/// Default acquisition function for new drafts
pub const DEFAULT_ACQUISITION_FUNCTION: &str = "qLogEI";

/// Default surrogate model for new drafts
pub const DEFAULT_SURROGATE_MODEL: &str = "GaussianProcess";

/// One accepted data row: column name to value
///
/// Targets that were not yet measured are absent from the row.
pub type DataRow = IndexMap<String, ParamValue>;

/// Readiness problem reported by [`CampaignDraft::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftIssue {
    /// Campaign name is blank
    MissingName,
    /// No target defined
    NoTargets,
    /// A target's own fields are inconsistent (1-based position)
    InvalidTarget {
        position: usize,
        name: String,
        reason: String,
    },
    /// Multi-target campaign with a target lacking bounds
    MissingBounds { position: usize, name: String },
    /// Multi-target campaign with a target lacking a weight
    MissingWeight { position: usize, name: String },
}

impl std::fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "Campaign name is required."),
            Self::NoTargets => write!(f, "At least one target is required."),
            Self::InvalidTarget {
                position,
                name,
                reason,
            } => write!(f, "Target {position} ({name}): {reason}"),
            Self::MissingBounds { position, name } => write!(
                f,
                "Target {position} ({name}): Bounds (min/max values) are required for multi-target campaigns."
            ),
            Self::MissingWeight { position, name } => write!(
                f,
                "Target {position} ({name}): Weights are required for multi-target campaigns."
            ),
        }
    }
}

/// In-progress campaign
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) targets: Vec<Target>,
    pub(crate) parameters: Vec<Box<dyn Parameter>>,
    pub(crate) initial_dataset: Vec<DataRow>,
    pub(crate) acquisition_function: String,
    pub(crate) surrogate_model: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self::new("")
    }
}

impl CampaignDraft {
    /// Create an empty draft with a fresh id
    #[must_use]
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: String::new(),
            targets: Vec::new(),
            parameters: Vec::new(),
            initial_dataset: Vec::new(),
            acquisition_function: DEFAULT_ACQUISITION_FUNCTION.to_string(),
            surrogate_model: DEFAULT_SURROGATE_MODEL.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Start a builder
    #[inline]
    #[must_use]
    pub fn builder(name: &str) -> DraftBuilder {
        DraftBuilder::new(name)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn acquisition_function(&self) -> &str {
        &self.acquisition_function
    }

    pub fn set_acquisition_function(&mut self, acquisition_function: &str) {
        self.acquisition_function = acquisition_function.to_string();
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn surrogate_model(&self) -> &str {
        &self.surrogate_model
    }

    pub fn set_surrogate_model(&mut self, surrogate_model: &str) {
        self.surrogate_model = surrogate_model.to_string();
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    /// Append a parameter
    ///
    /// # Errors
    /// Returns error if the name is already used by a parameter or target
    pub fn add_parameter(&mut self, parameter: Box<dyn Parameter>) -> Result<(), DraftError> {
        let name = parameter.name();
        if self.parameter_index(name).is_some() {
            return Err(DraftError::DuplicateParameter(name.to_string()));
        }
        if self.target_index(name).is_some() {
            return Err(DraftError::NameCollision(name.to_string()));
        }
        tracing::debug!(
            parameter = name,
            type_tag = parameter.type_tag(),
            "Adding parameter to draft"
        );
        self.parameters.push(parameter);
        self.touch();
        Ok(())
    }

    /// Re-configure a parameter in place, keeping its position
    ///
    /// The replacement may carry a different name as long as it does not
    /// collide with another column. Returns the previous parameter.
    ///
    /// # Errors
    /// Returns error if `name` is unknown or the new name collides
    pub fn replace_parameter(
        &mut self,
        name: &str,
        parameter: Box<dyn Parameter>,
    ) -> Result<Box<dyn Parameter>, DraftError> {
        let index = self
            .parameter_index(name)
            .ok_or_else(|| DraftError::ParameterNotFound(name.to_string()))?;
        let new_name = parameter.name();
        if new_name != name {
            if self.parameter_index(new_name).is_some() {
                return Err(DraftError::DuplicateParameter(new_name.to_string()));
            }
            if self.target_index(new_name).is_some() {
                return Err(DraftError::NameCollision(new_name.to_string()));
            }
        }
        tracing::debug!(parameter = name, replacement = new_name, "Replacing parameter");
        let previous = std::mem::replace(&mut self.parameters[index], parameter);
        self.touch();
        Ok(previous)
    }

    /// Remove a parameter by name
    ///
    /// # Errors
    /// Returns [`DraftError::ParameterNotFound`] if absent
    pub fn remove_parameter(&mut self, name: &str) -> Result<Box<dyn Parameter>, DraftError> {
        let index = self
            .parameter_index(name)
            .ok_or_else(|| DraftError::ParameterNotFound(name.to_string()))?;
        let removed = self.parameters.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Move a parameter to a new position, shifting the others
    ///
    /// # Errors
    /// Returns error if `name` is unknown or `to` is past the end
    pub fn move_parameter(&mut self, name: &str, to: usize) -> Result<(), DraftError> {
        let from = self
            .parameter_index(name)
            .ok_or_else(|| DraftError::ParameterNotFound(name.to_string()))?;
        let len = self.parameters.len();
        if to >= len {
            return Err(DraftError::IndexOutOfBounds { index: to, len });
        }
        let parameter = self.parameters.remove(from);
        self.parameters.insert(to, parameter);
        self.touch();
        Ok(())
    }

    /// Look up a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&dyn Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    /// Parameters in column order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Box<dyn Parameter>] {
        &self.parameters
    }

    /// Parameter names in column order
    #[must_use]
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name()).collect()
    }

    fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    // ------------------------------------------------------------------
    // Targets
    // ------------------------------------------------------------------

    /// Append a target
    ///
    /// # Errors
    /// Returns error if the target is invalid or its name is taken
    pub fn add_target(&mut self, target: Target) -> Result<(), DraftError> {
        target.check()?;
        let name = target.name();
        if self.target_index(name).is_some() {
            return Err(DraftError::DuplicateTarget(name.to_string()));
        }
        if self.parameter_index(name).is_some() {
            return Err(DraftError::NameCollision(name.to_string()));
        }
        tracing::debug!(target_name = name, mode = %target.mode(), "Adding target to draft");
        self.targets.push(target);
        self.touch();
        Ok(())
    }

    /// Remove a target by name
    ///
    /// # Errors
    /// Returns [`DraftError::TargetNotFound`] if absent
    pub fn remove_target(&mut self, name: &str) -> Result<Target, DraftError> {
        let index = self
            .target_index(name)
            .ok_or_else(|| DraftError::TargetNotFound(name.to_string()))?;
        let removed = self.targets.remove(index);
        self.touch();
        Ok(removed)
    }

    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(Target::name).collect()
    }

    fn target_index(&self, name: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.name() == name)
    }

    // ------------------------------------------------------------------
    // Dataset
    // ------------------------------------------------------------------

    /// Replace the initial dataset with accepted rows
    pub fn set_initial_dataset(&mut self, rows: Vec<DataRow>) {
        tracing::info!(rows = rows.len(), "Initial dataset attached to draft");
        self.initial_dataset = rows;
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn initial_dataset(&self) -> &[DataRow] {
        &self.initial_dataset
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Every readiness problem; empty when the draft can proceed
    #[must_use]
    pub fn validate(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(DraftIssue::MissingName);
        }
        if self.targets.is_empty() {
            issues.push(DraftIssue::NoTargets);
            return issues;
        }

        for (i, target) in self.targets.iter().enumerate() {
            for reason in target.issues() {
                issues.push(DraftIssue::InvalidTarget {
                    position: i + 1,
                    name: target.name().to_string(),
                    reason,
                });
            }
        }

        if self.targets.len() > 1 {
            for (i, target) in self.targets.iter().enumerate() {
                if !target.has_bounds() {
                    issues.push(DraftIssue::MissingBounds {
                        position: i + 1,
                        name: target.name().to_string(),
                    });
                }
                if target.weight().is_none() {
                    issues.push(DraftIssue::MissingWeight {
                        position: i + 1,
                        name: target.name().to_string(),
                    });
                }
            }
        }
        issues
    }

    /// Check if [`Self::validate`] reports nothing
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.validate().is_empty()
    }

    /// Return to a fresh state with a new id
    pub fn reset(&mut self) {
        tracing::debug!(id = %self.id, "Resetting draft");
        *self = Self::new("");
    }
}
