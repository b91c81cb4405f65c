//! Construction-time errors
//!
//! These are the only hard failures of the parameter model: a parameter with
//! inconsistent constraints is never built. Value validation reports through
//! [`crate::ValueIssue`] instead.

/// Errors raised while building or deserializing a parameter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Name is empty or whitespace only
    #[error("parameter name cannot be empty")]
    EmptyName,

    /// Constraints are internally inconsistent
    #[error("invalid constraints for parameter '{name}': {reason}")]
    InvalidConstraints { name: String, reason: String },

    /// No constructor registered for the type tag
    #[error("unknown parameter type: '{0}'")]
    UnknownType(String),

    /// Type tag is registered without a default constructor
    #[error("parameter type '{0}' has no default constraints")]
    NoDefaults(String),

    /// Required constraint key absent from the plain form
    #[error("missing constraint '{key}' for {type_tag} parameter")]
    MissingConstraint { type_tag: String, key: String },

    /// Constraint key present but of the wrong shape
    #[error("malformed constraint '{key}' for {type_tag} parameter: {reason}")]
    MalformedConstraint {
        type_tag: String,
        key: String,
        reason: String,
    },

    /// Plain form could not be encoded or decoded
    #[error("invalid plain form: {0}")]
    PlainForm(String),
}

impl ParameterError {
    /// Create invalid constraints error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraints {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error stems from the constraint values themselves
    #[inline]
    #[must_use]
    pub fn is_constraint_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConstraints { .. }
                | Self::MissingConstraint { .. }
                | Self::MalformedConstraint { .. }
        )
    }
}

impl From<serde_json::Error> for ParameterError {
    fn from(err: serde_json::Error) -> Self {
        Self::PlainForm(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_display() {
        let err = ParameterError::UnknownType("quantum".to_string());
        assert_eq!(err.to_string(), "unknown parameter type: 'quantum'");
    }

    #[test]
    fn invalid_constraints_display() {
        let err = ParameterError::invalid("temp", "step size must be positive");
        assert_eq!(
            err.to_string(),
            "invalid constraints for parameter 'temp': step size must be positive"
        );
        assert!(err.is_constraint_error());
        assert!(!ParameterError::EmptyName.is_constraint_error());
    }
}
