//! BASIL Parameter Model
//!
//! Typed experiment parameters with constraint checking, value validation and
//! a plain-form (JSON) representation.
//!
//! # Core Concepts
//!
//! - [`Parameter`]: Object-safe capability set shared by every parameter variant
//! - [`ParameterType`]: Static side of a variant (type tag, constructors)
//! - [`ParameterRegistry`]: Maps a type tag to a constructor
//! - [`ParamValue`]: A cell value, numeric or text
//! - [`ValueIssue`]: Why a value was rejected
//! - [`PlainParameter`]: Serializable record of tag, name and constraints
//!
//! # Example
//!
//! ```rust
//! use basil_params::{registry, ParamValue, Parameter};
//! use serde_json::json;
//!
//! let constraints = json!({"min": 0.0, "max": 10.0, "step": 2.5});
//! let param = registry::global()
//!     .create(
//!         "discrete_numerical_regular",
//!         "temperature",
//!         constraints.as_object().unwrap(),
//!     )
//!     .unwrap();
//!
//! assert!(param.validate(&ParamValue::Number(5.0)).is_ok());
//! assert!(param.validate(&ParamValue::Number(6.0)).is_err());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod issue;
mod parameter;
mod plain;
mod smiles;
mod value;

pub mod registry;
pub mod types;

// Re-exports
pub use error::ParameterError;
pub use issue::{IssueKind, ValueIssue};
pub use parameter::{Parameter, ParameterType, STEP_TOLERANCE};
pub use plain::{Constraints, PlainParameter};
pub use registry::{Constructor, ParameterRegistry};
pub use smiles::{check_smiles, SmilesError};
pub use types::{
    Categorical, ContinuousNumerical, DiscreteNumericalIrregular, DiscreteNumericalRegular, Fixed,
    Substance,
};
pub use value::ParamValue;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_builtin_example_value_validates() {
        let registry = ParameterRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(7);

        for tag in registry.type_tags() {
            let param = registry.create_default(tag, "sample").unwrap();
            for _ in 0..20 {
                let value = param.example_value(&mut rng);
                assert!(
                    param.validate(&value).is_ok(),
                    "{tag}: example {value} rejected"
                );
            }
        }
    }

    #[test]
    fn example_values_survive_text_conversion() {
        let registry = ParameterRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(11);

        for tag in registry.type_tags() {
            let param = registry.create_default(tag, "sample").unwrap();
            let value = param.example_value(&mut rng);
            let parsed = param.parse_cell(&value.to_string()).unwrap();
            assert_eq!(parsed, value);
        }
    }
}
