//! CSV data import
//!
//! Validates a CSV document against a draft's schema (parameters, then
//! targets) and returns an [`ImportReport`]. The pipeline never stops at the
//! first problem:
//!
//! 1. Detect the delimiter (unless configured) and read all records
//! 2. Check the header; any header error is critical and ends the import
//! 3. Convert and validate every expected cell of every data row
//!
//! Only I/O failures are returned as `Err`; everything about the content
//! lands in the report.

use crate::config::{ColumnOrder, ImportConfig};
use crate::dialect::{detect_delimiter, first_line};
use crate::error::CsvError;
use crate::report::{CellOutcome, ImportError, ImportReport, ImportWarning, ImportedRow};
use basil_campaign::CampaignDraft;
use basil_params::{ParamValue, Parameter};
use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column the importer expects
#[derive(Debug, Clone, Copy)]
enum Column<'a> {
    Parameter(&'a dyn Parameter),
    Target(&'a str),
}

impl<'a> Column<'a> {
    fn name(&self) -> &'a str {
        match *self {
            Self::Parameter(parameter) => parameter.name(),
            Self::Target(name) => name,
        }
    }

    fn check(&self, raw: &str) -> CellOutcome {
        match self {
            Self::Parameter(parameter) => match parameter.parse_cell(raw) {
                Ok(value) => CellOutcome::Valid(value),
                Err(issue) => CellOutcome::Invalid {
                    raw: raw.to_string(),
                    error: issue.into(),
                },
            },
            Self::Target(name) => {
                if raw.is_empty() {
                    return CellOutcome::Blank;
                }
                match raw.parse::<f64>() {
                    Ok(value) if value.is_finite() => CellOutcome::Valid(ParamValue::Number(value)),
                    _ => CellOutcome::Invalid {
                        raw: raw.to_string(),
                        error: ImportError::TypeMismatch(format!(
                            "Cannot convert '{raw}' for target '{name}' to a number"
                        )),
                    },
                }
            }
        }
    }
}

/// Data row before validation
struct RawRow {
    number: usize,
    fields: Option<Vec<String>>,
    errors: Vec<ImportError>,
}

/// Importer bound to a schema
#[derive(Debug, Clone)]
pub struct CsvImporter<'a> {
    parameters: &'a [Box<dyn Parameter>],
    targets: Vec<&'a str>,
    config: ImportConfig,
}

impl<'a> CsvImporter<'a> {
    /// Create importer for a draft's parameters and targets
    #[must_use]
    pub fn new(draft: &'a CampaignDraft) -> Self {
        Self::from_parts(draft.parameters(), draft.target_names())
    }

    /// Create importer from an explicit schema
    #[must_use]
    pub fn from_parts(parameters: &'a [Box<dyn Parameter>], targets: Vec<&'a str>) -> Self {
        Self {
            parameters,
            targets,
            config: ImportConfig::default(),
        }
    }

    /// With configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Expected column names in schema order
    #[must_use]
    pub fn expected_columns(&self) -> Vec<&str> {
        self.columns().iter().map(Column::name).collect()
    }

    fn columns(&self) -> Vec<Column<'a>> {
        self.parameters
            .iter()
            .map(|p| Column::Parameter(&**p))
            .chain(self.targets.iter().copied().map(Column::Target))
            .collect()
    }

    /// Import CSV text
    #[must_use]
    pub fn import_str(&self, text: &str) -> ImportReport {
        self.import_bytes(text.as_bytes())
    }

    /// Import raw bytes; rows that are not UTF-8 are reported, not fatal
    #[must_use]
    pub fn import_bytes(&self, bytes: &[u8]) -> ImportReport {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ImportReport::rejected(ImportError::SchemaMismatch(
                "CSV file is empty".to_string(),
            ));
        }

        let delimiter = match self.config.delimiter_byte() {
            Ok(Some(delimiter)) => delimiter,
            Ok(None) => detect_delimiter(&first_line(bytes)),
            Err(err) => {
                return ImportReport::rejected(ImportError::SchemaMismatch(err.to_string()))
            }
        };
        tracing::debug!(delimiter = %char::from(delimiter), "Reading CSV");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(bytes);

        let mut records = reader.byte_records();
        let headers = match records.next() {
            Some(Ok(record)) => match decode(&record) {
                Ok(fields) => fields,
                Err(_) => {
                    return reject_with(
                        delimiter,
                        ImportError::SchemaMismatch("CSV header is not valid UTF-8".to_string()),
                    )
                }
            },
            Some(Err(err)) => {
                return reject_with(
                    delimiter,
                    ImportError::SchemaMismatch(format!("Failed to read CSV header: {err}")),
                )
            }
            None => {
                return reject_with(
                    delimiter,
                    ImportError::SchemaMismatch("CSV file is empty".to_string()),
                )
            }
        };

        let rows: Vec<RawRow> = records
            .enumerate()
            .map(|(i, result)| {
                let number = i + 1;
                match result {
                    Ok(record) => match decode(&record) {
                        Ok(fields) => RawRow {
                            number,
                            fields: Some(fields),
                            errors: Vec::new(),
                        },
                        Err(lossy) => RawRow {
                            number,
                            fields: Some(lossy),
                            errors: vec![ImportError::MalformedRow(
                                "Row contains bytes that are not valid UTF-8".to_string(),
                            )],
                        },
                    },
                    Err(err) => RawRow {
                        number,
                        fields: None,
                        errors: vec![ImportError::MalformedRow(format!(
                            "Failed to read row: {err}"
                        ))],
                    },
                }
            })
            .collect();

        self.validate_rows(delimiter, headers, rows)
    }

    /// Read a whole stream, then import it
    ///
    /// # Errors
    /// Returns error only if reading fails
    pub fn import_reader<R: Read>(&self, mut reader: R) -> Result<ImportReport, CsvError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.import_bytes(&bytes))
    }

    /// Read a file, then import it
    ///
    /// # Errors
    /// Returns error only if the file cannot be read
    pub fn import_path(&self, path: impl AsRef<Path>) -> Result<ImportReport, CsvError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Importing CSV file");
        Ok(self.import_bytes(&bytes))
    }

    /// Validate already tabulated records
    ///
    /// `headers` names the columns of every record; records are validated
    /// exactly like CSV data rows.
    #[must_use]
    pub fn validate_records<H, R, C>(&self, headers: &[H], records: &[R]) -> ImportReport
    where
        H: AsRef<str>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let headers = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();
        let rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| RawRow {
                number: i + 1,
                fields: Some(
                    record
                        .as_ref()
                        .iter()
                        .map(|c| c.as_ref().trim().to_string())
                        .collect(),
                ),
                errors: Vec::new(),
            })
            .collect();
        self.validate_rows(b',', headers, rows)
    }

    fn validate_rows(&self, delimiter: u8, headers: Vec<String>, rows: Vec<RawRow>) -> ImportReport {
        let columns = self.columns();
        let mut report = ImportReport {
            delimiter,
            columns: headers,
            ..ImportReport::default()
        };

        let Some(positions) = self.check_header(&columns, &mut report) else {
            tracing::warn!(
                errors = report.header_errors.len(),
                "CSV header rejected; rows not validated"
            );
            return report;
        };

        for raw_row in rows {
            let row = validate_row(
                &columns,
                &positions,
                &report.columns,
                raw_row,
                &mut report.warnings,
            );
            if let Some(row) = row {
                report.rows.push(row);
            }
        }

        tracing::info!(
            valid = report.valid_rows().count(),
            total = report.rows.len(),
            "CSV import completed"
        );
        report
    }

    /// Check header against the schema; returns each expected column's
    /// position in the header, or `None` after recording critical errors
    fn check_header(&self, columns: &[Column<'a>], report: &mut ImportReport) -> Option<Vec<usize>> {
        let headers = &report.columns;
        let mut errors = Vec::new();

        if headers.iter().all(String::is_empty) {
            report
                .header_errors
                .push(ImportError::SchemaMismatch("CSV header row is empty".to_string()));
            return None;
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut reported: Vec<&str> = Vec::new();
        for header in headers {
            if seen.contains(&header.as_str()) {
                if !reported.contains(&header.as_str()) {
                    errors.push(ImportError::SchemaMismatch(format!(
                        "Duplicate column header: '{header}'"
                    )));
                    reported.push(header);
                }
            } else {
                seen.push(header);
            }
        }

        let expected: Vec<&str> = columns.iter().map(Column::name).collect();
        for name in &expected {
            if !headers.iter().any(|h| h == name) {
                tracing::error!(column = *name, "Required column missing from CSV");
                errors.push(ImportError::MissingColumn((*name).to_string()));
            }
        }

        let mut warnings = Vec::new();
        for header in headers {
            if !expected.contains(&header.as_str()) {
                if self.config.allow_extra_columns {
                    tracing::warn!(column = %header, "Extra column ignored");
                    warnings.push(ImportWarning::ExtraColumn(header.clone()));
                } else {
                    errors.push(ImportError::SchemaMismatch(format!(
                        "Unexpected column: '{header}'"
                    )));
                }
            }
        }

        if errors.is_empty() {
            let found: Vec<&str> = headers
                .iter()
                .map(String::as_str)
                .filter(|h| expected.contains(h))
                .collect();
            if found != expected {
                match self.config.column_order {
                    ColumnOrder::Reorder => {
                        tracing::warn!("CSV columns are out of order; mapping by name");
                        warnings.push(ImportWarning::ColumnOrder {
                            expected: owned(&expected),
                            found: owned(&found),
                        });
                    }
                    ColumnOrder::Strict => errors.push(ImportError::SchemaMismatch(format!(
                        "Column order does not match: expected [{}], found [{}]",
                        expected.join(", "),
                        found.join(", ")
                    ))),
                }
            }
        }

        if !errors.is_empty() {
            report.header_errors = errors;
            report.warnings = warnings;
            return None;
        }

        let positions = expected
            .iter()
            .filter_map(|name| headers.iter().position(|h| h == name))
            .collect();
        report.warnings = warnings;
        Some(positions)
    }
}

fn validate_row(
    columns: &[Column<'_>],
    positions: &[usize],
    headers: &[String],
    raw_row: RawRow,
    warnings: &mut Vec<ImportWarning>,
) -> Option<ImportedRow> {
    let RawRow {
        number,
        fields,
        mut errors,
    } = raw_row;

    let Some(fields) = fields else {
        return Some(ImportedRow {
            number,
            raw: IndexMap::new(),
            cells: IndexMap::new(),
            row_errors: errors,
        });
    };

    if errors.is_empty() && fields.iter().all(String::is_empty) {
        tracing::debug!(row = number, "Skipping empty row");
        warnings.push(ImportWarning::EmptyRow(number));
        return None;
    }

    if fields.len() != headers.len() {
        errors.push(ImportError::MalformedRow(format!(
            "Row has {} fields, expected {}",
            fields.len(),
            headers.len()
        )));
    }

    let raw: IndexMap<String, String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.clone(), fields.get(i).cloned().unwrap_or_default()))
        .collect();

    let cells = columns
        .iter()
        .zip(positions)
        .map(|(column, position)| {
            let cell = fields.get(*position).map_or("", String::as_str);
            (column.name().to_string(), column.check(cell))
        })
        .collect();

    Some(ImportedRow {
        number,
        raw,
        cells,
        row_errors: errors,
    })
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

/// Trimmed UTF-8 fields, or the lossy decoding when any field is invalid
fn decode(record: &csv::ByteRecord) -> Result<Vec<String>, Vec<String>> {
    let mut fields = Vec::with_capacity(record.len());
    let mut valid = true;
    for field in record {
        match std::str::from_utf8(field) {
            Ok(text) => fields.push(text.trim().to_string()),
            Err(_) => {
                valid = false;
                fields.push(String::from_utf8_lossy(field).trim().to_string());
            }
        }
    }
    if valid {
        Ok(fields)
    } else {
        Err(fields)
    }
}

fn reject_with(delimiter: u8, error: ImportError) -> ImportReport {
    let mut report = ImportReport::rejected(error);
    report.delimiter = delimiter;
    report
}
