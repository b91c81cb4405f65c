//! Optimization targets
//!
//! A target is a measured objective. It occupies a CSV column next to the
//! parameters and is blank until the experiment has been run.

use crate::error::DraftError;
use serde::{Deserialize, Serialize};

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetMode {
    /// Minimize
    Min,
    /// Maximize
    #[default]
    Max,
    /// Hit a value inside the bounds
    Match,
}

impl std::fmt::Display for TargetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Min => write!(f, "Min"),
            Self::Max => write!(f, "Max"),
            Self::Match => write!(f, "Match"),
        }
    }
}

/// Desirability transformation applied to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Transformation {
    #[default]
    None,
    Linear,
    Bell,
    Triangular,
    Logarithmic,
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Linear => "Linear",
            Self::Bell => "Bell",
            Self::Triangular => "Triangular",
            Self::Logarithmic => "Logarithmic",
        };
        f.write_str(name)
    }
}

/// Campaign target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    name: String,
    #[serde(default)]
    mode: TargetMode,
    #[serde(default)]
    min_value: Option<f64>,
    #[serde(default)]
    max_value: Option<f64>,
    #[serde(default)]
    transformation: Transformation,
    #[serde(default)]
    weight: Option<f64>,
}

impl Target {
    /// Create an unbounded, unweighted target
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyTargetName`] for a blank name
    pub fn new(name: &str, mode: TargetMode) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyTargetName);
        }
        Ok(Self {
            name: name.to_string(),
            mode,
            min_value: None,
            max_value: None,
            transformation: Transformation::None,
            weight: None,
        })
    }

    /// With bounds
    ///
    /// # Errors
    /// Returns error unless both bounds are finite and `min < max`
    pub fn with_bounds(mut self, min: f64, max: f64) -> Result<Self, DraftError> {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self.check()?;
        Ok(self)
    }

    /// With weight
    ///
    /// # Errors
    /// Returns error unless the weight is finite and positive
    pub fn with_weight(mut self, weight: f64) -> Result<Self, DraftError> {
        self.weight = Some(weight);
        self.check()?;
        Ok(self)
    }

    /// With transformation
    #[inline]
    #[must_use]
    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = transformation;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    #[inline]
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    #[inline]
    #[must_use]
    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    #[inline]
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Both bounds are set
    #[inline]
    #[must_use]
    pub fn has_bounds(&self) -> bool {
        self.min_value.is_some() && self.max_value.is_some()
    }

    /// Every problem with the target's own fields
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push("Target name is required".to_string());
        }
        for (label, bound) in [("Min", self.min_value), ("Max", self.max_value)] {
            if bound.is_some_and(|v| !v.is_finite()) {
                issues.push(format!("{label} value must be a valid number"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min >= max {
                issues.push("Min value must be less than max value".to_string());
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() {
                issues.push("Weight must be a valid number".to_string());
            } else if weight <= 0.0 {
                issues.push("Weight must be a positive number".to_string());
            }
        }
        issues
    }

    /// Fail on the first problem reported by [`Self::issues`]
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyTargetName`] or [`DraftError::InvalidTarget`]
    pub fn check(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyTargetName);
        }
        match self.issues().into_iter().next() {
            Some(reason) => Err(DraftError::invalid_target(&self.name, reason)),
            None => Ok(()),
        }
    }
}
