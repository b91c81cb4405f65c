//! Campaign summary export
//!
//! Renders a draft as a sectioned CSV document for people rather than for
//! re-import: campaign information, targets, then parameters with their
//! constraint summaries.

use crate::error::CsvError;
use basil_campaign::{CampaignDraft, Target};
use std::path::Path;

/// Header of the targets section
pub const TARGET_COLUMNS: [&str; 6] = ["Target Name", "Mode", "Min", "Max", "Transformation", "Weight"];

/// Header of the parameters section
pub const PARAMETER_COLUMNS: [&str; 3] = ["Parameter Name", "Type", "Values"];

/// Sectioned CSV export of a draft
#[derive(Debug, Clone, Copy)]
pub struct CampaignSummary<'a> {
    draft: &'a CampaignDraft,
}

impl<'a> CampaignSummary<'a> {
    #[inline]
    #[must_use]
    pub fn new(draft: &'a CampaignDraft) -> Self {
        Self { draft }
    }

    /// Render the summary
    ///
    /// # Errors
    /// Returns error if the CSV writer fails
    pub fn render(&self) -> Result<String, CsvError> {
        let draft = self.draft;
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(["Campaign Information"])?;
        writer.write_record(["Name", draft.name()])?;
        writer.write_record(["Description", draft.description()])?;
        writer.write_record(["Acquisition Function", draft.acquisition_function()])?;
        writer.write_record(["Surrogate Model", draft.surrogate_model()])?;

        writer.write_record(["Targets"])?;
        writer.write_record(TARGET_COLUMNS)?;
        for target in draft.targets() {
            writer.write_record(target_row(target))?;
        }

        writer.write_record(["Parameters"])?;
        writer.write_record(PARAMETER_COLUMNS)?;
        for parameter in draft.parameters() {
            writer.write_record([
                parameter.name().to_string(),
                parameter.display_name().to_string(),
                parameter.describe_constraints(),
            ])?;
        }

        let text = String::from_utf8(writer.into_inner()?)?;
        tracing::info!(
            campaign = draft.name(),
            targets = draft.targets().len(),
            parameters = draft.parameters().len(),
            "Campaign summary rendered"
        );
        Ok(text)
    }

    /// Render and write the summary to `path`
    ///
    /// # Errors
    /// Returns error if rendering or writing fails
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), CsvError> {
        let path = path.as_ref();
        std::fs::write(path, self.render()?)?;
        tracing::info!(path = %path.display(), "Campaign summary written");
        Ok(())
    }
}

fn target_row(target: &Target) -> [String; 6] {
    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    [
        target.name().to_string(),
        target.mode().to_string(),
        optional(target.min_value()),
        optional(target.max_value()),
        target.transformation().to_string(),
        optional(target.weight()),
    ]
}
