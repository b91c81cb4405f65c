//! Value validation outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a candidate value was rejected by a parameter
///
/// Returned as data from [`crate::Parameter::validate`]; never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum ValueIssue {
    /// Value has the wrong shape (text for a number, malformed SMILES, blank)
    #[error("{0}")]
    TypeMismatch(String),

    /// Numeric value outside the declared bounds
    #[error("{0}")]
    OutOfRange(String),

    /// Value not among the declared members (or off the step grid)
    #[error("{0}")]
    NotInAllowedSet(String),
}

impl ValueIssue {
    /// Human-readable reason
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::TypeMismatch(r) | Self::OutOfRange(r) | Self::NotInAllowedSet(r) => r,
        }
    }

    /// Discriminant without the reason
    #[inline]
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::TypeMismatch(_) => IssueKind::TypeMismatch,
            Self::OutOfRange(_) => IssueKind::OutOfRange,
            Self::NotInAllowedSet(_) => IssueKind::NotInAllowedSet,
        }
    }
}

/// Issue category, used for counting and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TypeMismatch,
    OutOfRange,
    NotInAllowedSet,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeMismatch => "type mismatch",
            Self::OutOfRange => "out of range",
            Self::NotInAllowedSet => "not in allowed set",
        };
        f.write_str(label)
    }
}
