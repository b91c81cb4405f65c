//! Testing utilities for the BASIL workspace
//!
//! Shared draft fixtures and CSV text builders.

#![allow(missing_docs)]

use basil_campaign::{CampaignDraft, Target, TargetMode};
use basil_params::{
    Categorical, ContinuousNumerical, DiscreteNumericalIrregular, DiscreteNumericalRegular, Fixed,
    Substance,
};

/// `temp` (continuous 0..100) and `catalyst` (categorical X, Y), no targets
pub fn screening_draft() -> CampaignDraft {
    CampaignDraft::builder("Screening")
        .parameter(ContinuousNumerical::new("temp", 0.0, 100.0).unwrap())
        .parameter(Categorical::new("catalyst", ["X", "Y"]).unwrap())
        .build()
        .unwrap()
}

/// Screening draft with a `yield` target
pub fn screening_draft_with_target() -> CampaignDraft {
    let mut draft = screening_draft();
    draft
        .add_target(Target::new("yield", TargetMode::Max).unwrap())
        .unwrap();
    draft
}

/// One parameter of every builtin type and two bounded, weighted targets
pub fn full_draft() -> CampaignDraft {
    CampaignDraft::builder("Full campaign")
        .description("Every parameter type")
        .parameter(ContinuousNumerical::new("temperature", 20.0, 80.0).unwrap())
        .parameter(DiscreteNumericalRegular::new("time", 0.0, 10.0, 2.5).unwrap())
        .parameter(DiscreteNumericalIrregular::new("loading", vec![1.0, 2.0, 5.0]).unwrap())
        .parameter(Categorical::new("solvent", ["THF", "DMF", "Toluene"]).unwrap())
        .parameter(Substance::new("additive", ["CCO", "CCCCO"]).unwrap())
        .parameter(Fixed::new("pressure", 5.0).unwrap())
        .target(
            Target::new("yield", TargetMode::Max)
                .unwrap()
                .with_bounds(0.0, 100.0)
                .unwrap()
                .with_weight(2.0)
                .unwrap(),
        )
        .target(
            Target::new("impurity", TargetMode::Min)
                .unwrap()
                .with_bounds(0.0, 10.0)
                .unwrap()
                .with_weight(1.0)
                .unwrap(),
        )
        .build()
        .unwrap()
}

/// Join a header and rows into comma-separated text
pub fn csv_text(headers: &[&str], rows: &[&[&str]]) -> String {
    csv_text_with(',', headers, rows)
}

/// Join a header and rows with `delimiter`; cells are written as given
pub fn csv_text_with(delimiter: char, headers: &[&str], rows: &[&[&str]]) -> String {
    let separator = delimiter.to_string();
    let mut text = headers.join(&separator);
    text.push('\n');
    for row in rows {
        text.push_str(&row.join(&separator));
        text.push('\n');
    }
    text
}
