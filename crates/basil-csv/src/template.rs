//! CSV template generation
//!
//! A template is the header the importer expects plus a few example rows
//! drawn from each parameter's constraints. Re-importing an unchanged
//! template yields no errors.

use crate::config::TemplateConfig;
use crate::dialect::CANDIDATE_DELIMITERS;
use crate::error::CsvError;
use basil_campaign::CampaignDraft;
use basil_params::{ParamValue, Parameter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;

/// Example target values, cycled across rows
pub const TARGET_EXAMPLE_VALUES: [f64; 3] = [0.85, 0.92, 0.78];

/// Shape of the template that would be generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub parameter_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub example_rows: usize,
    pub parameter_types: Vec<&'static str>,
}

/// Generator for a draft's CSV template
#[derive(Debug, Clone)]
pub struct TemplateGenerator<'a> {
    parameters: &'a [Box<dyn Parameter>],
    targets: Vec<&'a str>,
    config: TemplateConfig,
}

impl<'a> TemplateGenerator<'a> {
    /// Create generator for a draft's parameters and targets
    #[must_use]
    pub fn new(draft: &'a CampaignDraft) -> Self {
        Self::from_parts(draft.parameters(), draft.target_names())
    }

    /// Create generator from an explicit schema
    #[must_use]
    pub fn from_parts(parameters: &'a [Box<dyn Parameter>], targets: Vec<&'a str>) -> Self {
        Self {
            parameters,
            targets,
            config: TemplateConfig::default(),
        }
    }

    /// With configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    /// Column names: parameters in order, then targets
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|p| p.name())
            .chain(self.targets.iter().copied())
            .collect()
    }

    /// Template metadata without rendering rows
    #[must_use]
    pub fn info(&self) -> TemplateInfo {
        let columns: Vec<String> = self.headers().into_iter().map(str::to_string).collect();
        TemplateInfo {
            parameter_count: self.parameters.len(),
            column_count: columns.len(),
            columns,
            example_rows: self.config.rows,
            parameter_types: self.parameters.iter().map(|p| p.type_tag()).collect(),
        }
    }

    /// Example rows as text cells
    #[must_use]
    pub fn example_rows(&self) -> Vec<Vec<String>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        (0..self.config.rows)
            .map(|row_index| {
                let mut row: Vec<String> = self
                    .parameters
                    .iter()
                    .map(|p| p.example_value(&mut rng).to_string())
                    .collect();
                let target_value =
                    TARGET_EXAMPLE_VALUES[row_index % TARGET_EXAMPLE_VALUES.len()];
                row.extend(
                    self.targets
                        .iter()
                        .map(|_| ParamValue::Number(target_value).to_string()),
                );
                row
            })
            .collect()
    }

    /// Render the template as comma-separated text
    ///
    /// Header names holding any candidate delimiter are quoted so delimiter
    /// detection still reads the header as comma-separated.
    ///
    /// # Errors
    /// Returns error if the row count is zero or the CSV writer fails
    pub fn generate(&self) -> Result<String, CsvError> {
        self.config.validate()?;

        let headers = self.headers();
        let header_quoting = if headers
            .iter()
            .any(|h| h.bytes().any(|b| CANDIDATE_DELIMITERS.contains(&b)))
        {
            csv::QuoteStyle::Always
        } else {
            csv::QuoteStyle::Necessary
        };
        let mut header_writer = csv::WriterBuilder::new()
            .quote_style(header_quoting)
            .from_writer(Vec::new());
        header_writer.write_record(&headers)?;

        let mut writer = csv::Writer::from_writer(header_writer.into_inner()?);
        let rows = self.example_rows();
        for row in &rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner()?;
        let text = String::from_utf8(bytes)?;

        tracing::info!(
            columns = self.parameters.len() + self.targets.len(),
            rows = rows.len(),
            "CSV template generated"
        );
        Ok(text)
    }

    /// Render and write the template to `path`
    ///
    /// # Errors
    /// Returns error if rendering or writing fails
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), CsvError> {
        let path = path.as_ref();
        let text = self.generate()?;
        std::fs::write(path, text)?;
        tracing::info!(path = %path.display(), "CSV template written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use basil_campaign::{Target, TargetMode};
    use basil_params::{Categorical, ContinuousNumerical, Fixed};

    fn draft() -> CampaignDraft {
        CampaignDraft::builder("template")
            .parameter(ContinuousNumerical::new("temp", 0.0, 100.0).unwrap())
            .parameter(Categorical::new("catalyst", ["X", "Y"]).unwrap())
            .parameter(Fixed::new("pressure", 5.0).unwrap())
            .target(Target::new("yield", TargetMode::Max).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn header_and_target_cells() {
        let draft = draft();
        let generator = TemplateGenerator::new(&draft).with_config(TemplateConfig::new().with_seed(1));
        let text = generator.generate().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "temp,catalyst,pressure,yield");
        assert!(lines[1].ends_with(",5,0.85"));
        assert!(lines[2].ends_with(",5,0.92"));
        assert!(lines[3].ends_with(",5,0.78"));
    }

    #[test]
    fn seeded_templates_are_reproducible() {
        let draft = draft();
        let config = TemplateConfig::new().with_seed(99).with_rows(6);
        let a = TemplateGenerator::new(&draft).with_config(config.clone()).generate().unwrap();
        let b = TemplateGenerator::new(&draft).with_config(config).generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 7);
    }

    #[test]
    fn no_targets_means_parameter_columns_only() {
        let draft = CampaignDraft::builder("bare")
            .parameter(ContinuousNumerical::new("temp", 0.0, 1.0).unwrap())
            .build()
            .unwrap();
        let generator = TemplateGenerator::new(&draft);
        assert_eq!(generator.headers(), vec!["temp"]);
        let info = generator.info();
        assert_eq!(info.column_count, 1);
        assert_eq!(info.example_rows, 3);
        assert_eq!(info.parameter_types, vec!["continuous_numerical"]);
    }

    #[test]
    fn zero_rows_rejected() {
        let draft = draft();
        let err = TemplateGenerator::new(&draft)
            .with_config(TemplateConfig::new().with_rows(0))
            .generate()
            .unwrap_err();
        assert!(matches!(err, CsvError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn delimiter_in_header_is_quoted() {
        let draft = CampaignDraft::builder("quoted")
            .parameter(ContinuousNumerical::new("a;b;c", 0.0, 1.0).unwrap())
            .parameter(Categorical::new("cat", ["X"]).unwrap())
            .build()
            .unwrap();
        let text = TemplateGenerator::new(&draft)
            .with_config(TemplateConfig::new().with_seed(3))
            .generate()
            .unwrap();
        assert_eq!(text.lines().next(), Some("\"a;b;c\",\"cat\""));
        assert_eq!(crate::dialect::detect_delimiter(&text), b',');
    }

    #[test]
    fn info_lists_columns() {
        let draft = draft();
        let info = TemplateGenerator::new(&draft).info();
        assert_eq!(info.parameter_count, 3);
        assert_eq!(info.column_count, 4);
        assert_eq!(info.columns, vec!["temp", "catalyst", "pressure", "yield"]);
        assert_eq!(
            info.parameter_types,
            vec!["continuous_numerical", "categorical", "fixed"]
        );
    }
}
