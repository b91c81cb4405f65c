//! Import report
//!
//! The structured result of a CSV import: header-level errors, warnings and
//! every data row with a per-cell outcome. Nothing here is rendered for a
//! particular front end; [`ImportReport::formatted_errors`] and
//! [`ImportReport::summary`] give plain-text views.

use basil_campaign::DataRow;
use basil_params::{ParamValue, ValueIssue};
use indexmap::IndexMap;
use serde::Serialize;

/// Why an import location was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// Header does not describe the expected schema (duplicates, unexpected
    /// columns, strict order violations, empty header)
    #[error("{0}")]
    SchemaMismatch(String),
    /// Expected column absent from the header
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),
    /// Cell could not be read as the column's kind
    #[error("{0}")]
    TypeMismatch(String),
    /// Numeric cell outside the allowed range
    #[error("{0}")]
    OutOfRange(String),
    /// Cell not among the allowed values
    #[error("{0}")]
    NotInAllowedSet(String),
    /// Row structure is broken (field count, encoding)
    #[error("{0}")]
    MalformedRow(String),
}

impl ImportError {
    /// Check if the error prevents any row from being validated
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::SchemaMismatch(_) | Self::MissingColumn(_))
    }
}

impl From<ValueIssue> for ImportError {
    fn from(issue: ValueIssue) -> Self {
        match issue {
            ValueIssue::TypeMismatch(reason) => Self::TypeMismatch(reason),
            ValueIssue::OutOfRange(reason) => Self::OutOfRange(reason),
            ValueIssue::NotInAllowedSet(reason) => Self::NotInAllowedSet(reason),
        }
    }
}

/// An error with its position in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedError {
    /// 1-based data row; `None` for header errors
    pub row: Option<usize>,
    /// Column name for cell errors
    pub column: Option<String>,
    pub error: ImportError,
}

impl std::fmt::Display for LocatedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.row, &self.column) {
            (Some(row), Some(column)) => write!(f, "Row {row}, Column '{column}': {}", self.error),
            (Some(row), None) => write!(f, "Row {row}: {}", self.error),
            _ => write!(f, "File: {}", self.error),
        }
    }
}

/// Accepted-but-noteworthy condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// Unexpected column ignored
    ExtraColumn(String),
    /// Columns present in a different order and mapped by name
    ColumnOrder {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Row with only blank cells, skipped
    EmptyRow(usize),
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtraColumn(column) => {
                write!(f, "Extra column found: '{column}' (will be ignored)")
            }
            Self::ColumnOrder { expected, found } => write!(
                f,
                "Columns are in a different order than expected ({}); found ({})",
                expected.join(", "),
                found.join(", ")
            ),
            Self::EmptyRow(row) => write!(f, "Row {row} is empty and was skipped"),
        }
    }
}

/// Outcome for one expected column of a row
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    /// Converted and accepted value
    Valid(ParamValue),
    /// Blank target cell (not yet measured)
    Blank,
    /// Rejected cell with its raw text
    Invalid { raw: String, error: ImportError },
}

impl CellOutcome {
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    /// Accepted value, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&ParamValue> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ImportError> {
        match self {
            Self::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// One data row with its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    /// 1-based position among data rows
    pub number: usize,
    /// Header column to trimmed raw text
    pub raw: IndexMap<String, String>,
    /// Expected column to outcome, in schema order
    pub cells: IndexMap<String, CellOutcome>,
    /// Row-level structural errors
    pub row_errors: Vec<ImportError>,
}

impl ImportedRow {
    /// Valid when every cell is valid and there is no row-level error
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.row_errors.is_empty() && self.cells.values().all(CellOutcome::is_valid)
    }

    /// Accepted values; blank targets are omitted
    #[must_use]
    pub fn values(&self) -> DataRow {
        self.cells
            .iter()
            .filter_map(|(column, outcome)| {
                outcome.value().map(|value| (column.clone(), value.clone()))
            })
            .collect()
    }

    /// Errors of this row with their location
    #[must_use]
    pub fn errors(&self) -> Vec<LocatedError> {
        let row_level = self.row_errors.iter().map(|error| LocatedError {
            row: Some(self.number),
            column: None,
            error: error.clone(),
        });
        let cell_level = self.cells.iter().filter_map(|(column, outcome)| {
            outcome.error().map(|error| LocatedError {
                row: Some(self.number),
                column: Some(column.clone()),
                error: error.clone(),
            })
        });
        row_level.chain(cell_level).collect()
    }
}

/// Counts by error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ErrorCounts {
    /// Header and row-level errors
    pub structure_errors: usize,
    /// Invalid cells
    pub cell_errors: usize,
    /// Missing expected columns
    pub missing_columns: usize,
    pub warnings: usize,
}

/// Result of validating a CSV document against a schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportReport {
    pub(crate) delimiter: u8,
    pub(crate) columns: Vec<String>,
    pub(crate) header_errors: Vec<ImportError>,
    pub(crate) warnings: Vec<ImportWarning>,
    pub(crate) rows: Vec<ImportedRow>,
}

impl ImportReport {
    /// Report for a document rejected before reading its header
    pub(crate) fn rejected(error: ImportError) -> Self {
        Self {
            delimiter: b',',
            header_errors: vec![error],
            ..Self::default()
        }
    }

    /// No error anywhere
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.header_errors.is_empty() && self.rows.iter().all(ImportedRow::is_valid)
    }

    /// Header-level errors stopped row validation
    #[inline]
    #[must_use]
    pub fn has_critical_errors(&self) -> bool {
        !self.header_errors.is_empty()
    }

    /// Delimiter used to read the document
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> char {
        char::from(self.delimiter)
    }

    /// Header columns as read (trimmed)
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Every data row, valid or not
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[ImportedRow] {
        &self.rows
    }

    pub fn valid_rows(&self) -> impl Iterator<Item = &ImportedRow> {
        self.rows.iter().filter(|row| row.is_valid())
    }

    pub fn invalid_rows(&self) -> impl Iterator<Item = &ImportedRow> {
        self.rows.iter().filter(|row| !row.is_valid())
    }

    /// Values of the valid rows, ready for a draft's initial dataset
    #[must_use]
    pub fn dataset(&self) -> Vec<DataRow> {
        self.valid_rows().map(ImportedRow::values).collect()
    }

    /// Every error with its location: header first, then rows in order
    #[must_use]
    pub fn errors(&self) -> Vec<LocatedError> {
        let header = self.header_errors.iter().map(|error| LocatedError {
            row: None,
            column: None,
            error: error.clone(),
        });
        header
            .chain(self.rows.iter().flat_map(ImportedRow::errors))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn error_counts(&self) -> ErrorCounts {
        let row_errors: usize = self.rows.iter().map(|row| row.row_errors.len()).sum();
        let cell_errors = self
            .rows
            .iter()
            .flat_map(|row| row.cells.values())
            .filter(|outcome| !outcome.is_valid())
            .count();
        let missing_columns = self
            .header_errors
            .iter()
            .filter(|error| matches!(error, ImportError::MissingColumn(_)))
            .count();
        ErrorCounts {
            structure_errors: self.header_errors.len() + row_errors,
            cell_errors,
            missing_columns,
            warnings: self.warnings.len(),
        }
    }

    /// One-line outcome
    #[must_use]
    pub fn summary(&self) -> String {
        let problems = self.errors().len();
        if problems == 0 {
            let valid = self.valid_rows().count();
            format!("Validation passed: {valid}/{} rows valid", self.rows.len())
        } else {
            format!("Validation found issues: {problems} problems detected")
        }
    }

    /// One line per error, header errors first
    #[must_use]
    pub fn formatted_errors(&self) -> String {
        self.errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
