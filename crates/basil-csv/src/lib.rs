//! BASIL CSV
//!
//! CSV surfaces of a campaign draft: the data template, validated import of
//! experiment data, and a human-readable campaign summary.
//!
//! # Core Concepts
//!
//! - [`TemplateGenerator`]: Header plus example rows for a draft
//! - [`CsvImporter`]: Validates a CSV document against a draft's schema
//! - [`ImportReport`]: Every header, row and cell outcome of an import
//! - [`CampaignSummary`]: Sectioned export of a draft
//! - [`BasilConfig`]: TOML configuration for import and template settings
//!
//! # Example
//!
//! ```rust
//! use basil_campaign::CampaignDraft;
//! use basil_csv::CsvImporter;
//! use basil_params::{Categorical, ContinuousNumerical};
//!
//! let draft = CampaignDraft::builder("Screening")
//!     .parameter(ContinuousNumerical::new("temp", 0.0, 100.0).unwrap())
//!     .parameter(Categorical::new("catalyst", ["X", "Y"]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let report = CsvImporter::new(&draft).import_str("temp,catalyst\n150,X\n50,Y\n");
//! assert_eq!(report.valid_rows().count(), 1);
//! assert_eq!(
//!     report.formatted_errors(),
//!     "Row 1, Column 'temp': Value 150 is outside range [0, 100]"
//! );
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod dialect;
mod error;
mod importer;
mod report;
mod summary;
mod template;

pub use config::{
    BasilConfig, ColumnOrder, ConfigError, ImportConfig, TemplateConfig, DEFAULT_TEMPLATE_ROWS,
};
pub use dialect::{detect_delimiter, CANDIDATE_DELIMITERS};
pub use error::CsvError;
pub use importer::CsvImporter;
pub use report::{
    CellOutcome, ErrorCounts, ImportError, ImportReport, ImportWarning, ImportedRow, LocatedError,
};
pub use summary::{CampaignSummary, PARAMETER_COLUMNS, TARGET_COLUMNS};
pub use template::{TemplateGenerator, TemplateInfo, TARGET_EXAMPLE_VALUES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
