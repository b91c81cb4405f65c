//! BASIL Campaign Drafts
//!
//! The in-progress campaign threaded through the setup wizard as a value:
//! name, description, targets, ordered parameters and the initial dataset.
//!
//! # Core Concepts
//!
//! - [`CampaignDraft`]: The draft aggregate and its column namespace
//! - [`DraftBuilder`]: Fluent construction
//! - [`Target`]: Measured objective with mode, bounds and weight
//! - [`DraftIssue`]: Readiness problem found by [`CampaignDraft::validate`]
//! - [`DraftRecord`]: Plain form (JSON or YAML)
//!
//! # Example
//!
//! ```rust
//! use basil_campaign::{CampaignDraft, Target, TargetMode};
//! use basil_params::ContinuousNumerical;
//!
//! let draft = CampaignDraft::builder("Screening")
//!     .parameter(ContinuousNumerical::new("temp", 20.0, 80.0).unwrap())
//!     .target(Target::new("yield", TargetMode::Max).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(draft.validate().is_empty());
//! assert_eq!(draft.parameter_names(), vec!["temp"]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod builder;
mod draft;
mod error;
mod plain;
mod target;

pub use builder::DraftBuilder;
pub use draft::{
    CampaignDraft, DataRow, DraftIssue, DEFAULT_ACQUISITION_FUNCTION, DEFAULT_SURROGATE_MODEL,
};
pub use error::DraftError;
pub use plain::DraftRecord;
pub use target::{Target, TargetMode, Transformation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
