//! Error types for campaign drafts
//!
//! Covers the hard invariants of a draft (unique names, consistent targets)
//! and plain-form encoding. Readiness checks such as "at least one target"
//! are reported as [`crate::DraftIssue`] values instead.

use basil_params::ParameterError;

/// Errors raised by draft operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    /// Target name is empty or whitespace only
    #[error("target name is required")]
    EmptyTargetName,

    /// Target bounds or weight are inconsistent
    #[error("invalid target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    /// A parameter with this name already exists
    #[error("parameter '{0}' already exists in the draft")]
    DuplicateParameter(String),

    /// A target with this name already exists
    #[error("target '{0}' already exists in the draft")]
    DuplicateTarget(String),

    /// Name already used by a column of the other kind
    #[error("name '{0}' is already used by a parameter or target column")]
    NameCollision(String),

    /// No parameter with this name
    #[error("parameter '{0}' not found")]
    ParameterNotFound(String),

    /// No target with this name
    #[error("target '{0}' not found")]
    TargetNotFound(String),

    /// Position outside the parameter list
    #[error("index {index} out of bounds for {len} parameters")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Parameter could not be rebuilt
    #[error("parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML encoding or decoding failed
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl DraftError {
    /// Create invalid target error
    pub fn invalid_target(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error comes from a name clash
    #[inline]
    #[must_use]
    pub fn is_name_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateParameter(_) | Self::DuplicateTarget(_) | Self::NameCollision(_)
        )
    }
}

impl From<serde_json::Error> for DraftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for DraftError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}
