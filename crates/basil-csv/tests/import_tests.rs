//! Import scenarios against shared draft fixtures

use basil_csv::{
    CellOutcome, ColumnOrder, CsvImporter, ErrorCounts, ImportConfig, ImportError, ImportWarning,
};
use basil_params::ParamValue;
use basil_test_utils::{csv_text, csv_text_with, full_draft, screening_draft, screening_draft_with_target};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn out_of_range_and_unknown_category_are_located() {
    let draft = screening_draft();
    let text = csv_text(&["temp", "catalyst"], &[&["150", "X"], &["50", "Z"]]);
    let report = CsvImporter::new(&draft).import_str(&text);

    assert!(!report.is_valid());
    assert!(!report.has_critical_errors());
    assert_eq!(report.rows().len(), 2);

    let first = &report.rows()[0];
    assert!(matches!(
        first.cells["temp"],
        CellOutcome::Invalid { error: ImportError::OutOfRange(_), .. }
    ));
    assert_eq!(
        first.cells["catalyst"],
        CellOutcome::Valid(ParamValue::Text("X".into()))
    );

    let second = &report.rows()[1];
    assert_eq!(second.cells["temp"], CellOutcome::Valid(ParamValue::Number(50.0)));
    assert!(matches!(
        second.cells["catalyst"],
        CellOutcome::Invalid { error: ImportError::NotInAllowedSet(_), .. }
    ));

    assert_eq!(
        report.formatted_errors(),
        "Row 1, Column 'temp': Value 150 is outside range [0, 100]\n\
         Row 2, Column 'catalyst': Value 'Z' is not in allowed categories ['X', 'Y']"
    );
    assert_eq!(report.summary(), "Validation found issues: 2 problems detected");
}

#[test]
fn valid_file_builds_dataset() {
    let draft = screening_draft_with_target();
    let text = csv_text(
        &["temp", "catalyst", "yield"],
        &[&["25.5", "X", "0.9"], &[" 70 ", "Y", ""]],
    );
    let report = CsvImporter::new(&draft).import_str(&text);

    assert!(report.is_valid(), "{}", report.formatted_errors());
    assert_eq!(report.summary(), "Validation passed: 2/2 rows valid");

    let dataset = report.dataset();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset[0]["yield"], ParamValue::Number(0.9));
    assert_eq!(dataset[1]["temp"], ParamValue::Number(70.0));
    assert!(!dataset[1].contains_key("yield"));
}

#[test]
fn non_numeric_target_is_type_mismatch() {
    let draft = screening_draft_with_target();
    let text = csv_text(&["temp", "catalyst", "yield"], &[&["50", "X", "high"]]);
    let report = CsvImporter::new(&draft).import_str(&text);

    assert_eq!(
        report.formatted_errors(),
        "Row 1, Column 'yield': Cannot convert 'high' for target 'yield' to a number"
    );
}

#[test]
fn missing_column_is_critical() {
    let draft = screening_draft_with_target();
    let text = csv_text(&["temp", "catalyst"], &[&["50", "X"]]);
    let report = CsvImporter::new(&draft).import_str(&text);

    assert!(report.has_critical_errors());
    assert!(report.rows().is_empty());
    assert_eq!(report.formatted_errors(), "File: Missing required column: 'yield'");
    assert_eq!(
        report.error_counts(),
        ErrorCounts {
            structure_errors: 1,
            cell_errors: 0,
            missing_columns: 1,
            warnings: 0,
        }
    );
}

#[test]
fn duplicate_header_is_critical() {
    let draft = screening_draft();
    let text = csv_text(&["temp", "catalyst", "temp"], &[&["50", "X", "60"]]);
    let report = CsvImporter::new(&draft).import_str(&text);

    assert!(report.has_critical_errors());
    assert_eq!(report.formatted_errors(), "File: Duplicate column header: 'temp'");
}

#[test]
fn extra_columns_need_opt_in() {
    let draft = screening_draft();
    let text = csv_text(&["temp", "catalyst", "notes"], &[&["50", "X", "ok"]]);

    let strict = CsvImporter::new(&draft).import_str(&text);
    assert!(strict.has_critical_errors());
    assert_eq!(strict.formatted_errors(), "File: Unexpected column: 'notes'");

    let lenient = CsvImporter::new(&draft)
        .with_config(ImportConfig::new().with_extra_columns(true))
        .import_str(&text);
    assert!(lenient.is_valid());
    assert_eq!(lenient.warnings(), &[ImportWarning::ExtraColumn("notes".into())]);
    assert_eq!(
        lenient.warnings()[0].to_string(),
        "Extra column found: 'notes' (will be ignored)"
    );
    assert_eq!(lenient.rows()[0].raw["notes"], "ok");
    assert!(!lenient.dataset()[0].contains_key("notes"));
}

#[test]
fn reordered_columns_map_by_name_unless_strict() {
    let draft = screening_draft();
    let text = csv_text(&["catalyst", "temp"], &[&["Y", "42"]]);

    let report = CsvImporter::new(&draft).import_str(&text);
    assert!(report.is_valid());
    assert!(matches!(report.warnings(), [ImportWarning::ColumnOrder { .. }]));
    assert_eq!(report.dataset()[0]["temp"], ParamValue::Number(42.0));
    assert_eq!(
        report.dataset()[0].keys().collect::<Vec<_>>(),
        vec!["temp", "catalyst"]
    );

    let strict = CsvImporter::new(&draft)
        .with_config(ImportConfig::new().with_column_order(ColumnOrder::Strict))
        .import_str(&text);
    assert!(strict.has_critical_errors());
    assert_eq!(
        strict.formatted_errors(),
        "File: Column order does not match: expected [temp, catalyst], found [catalyst, temp]"
    );
}

#[test]
fn detects_semicolons_and_tabs() {
    let draft = screening_draft();
    for delimiter in [';', '\t'] {
        let text = csv_text_with(delimiter, &["temp", "catalyst"], &[&["50", "X"]]);
        let report = CsvImporter::new(&draft).import_str(&text);
        assert!(report.is_valid(), "{delimiter:?}: {}", report.formatted_errors());
        assert_eq!(report.delimiter(), delimiter);
    }
}

#[test]
fn leading_blank_line_does_not_hide_delimiter() {
    let draft = screening_draft();
    let report = CsvImporter::new(&draft).import_str("\ntemp;catalyst\n50;X\n");
    assert!(report.is_valid(), "{}", report.formatted_errors());
    assert_eq!(report.delimiter(), ';');
    assert_eq!(report.columns(), &["temp".to_string(), "catalyst".to_string()]);
}

#[test]
fn configured_delimiter_overrides_detection() {
    let draft = screening_draft();
    let text = "temp;catalyst\n50;X\n";
    let report = CsvImporter::new(&draft)
        .with_config(ImportConfig::new().with_delimiter(','))
        .import_str(text);
    assert!(report.has_critical_errors());
    assert_eq!(report.columns(), &["temp;catalyst".to_string()]);
}

#[test]
fn short_and_long_rows_are_malformed() {
    let draft = screening_draft();
    let report = CsvImporter::new(&draft).import_str("temp,catalyst\n50\n60,Y,extra\n70,X\n");

    assert_eq!(report.rows().len(), 3);
    assert_eq!(report.valid_rows().count(), 1);
    let errors: Vec<String> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        errors,
        vec![
            "Row 1: Row has 1 fields, expected 2".to_string(),
            "Row 1, Column 'catalyst': Empty value for parameter 'catalyst'".to_string(),
            "Row 2: Row has 3 fields, expected 2".to_string(),
        ]
    );
    assert_eq!(report.error_counts().structure_errors, 2);
}

#[test]
fn invalid_utf8_row_is_malformed_but_validated() {
    let draft = screening_draft();
    let mut bytes = b"temp,catalyst\n50,X\n60,".to_vec();
    bytes.extend_from_slice(b"\xFF\n");
    let report = CsvImporter::new(&draft).import_bytes(&bytes);

    assert!(!report.has_critical_errors());
    assert_eq!(report.valid_rows().count(), 1);
    let bad = &report.rows()[1];
    assert!(matches!(bad.row_errors[..], [ImportError::MalformedRow(_)]));
    assert_eq!(bad.cells["temp"], CellOutcome::Valid(ParamValue::Number(60.0)));
}

#[test]
fn validate_records_matches_text_import() {
    let draft = screening_draft();
    let headers = ["temp", "catalyst"];
    let records = vec![vec!["150", "X"], vec!["50", "Z"]];
    let from_records = CsvImporter::new(&draft).validate_records(&headers, &records);
    let from_text = CsvImporter::new(&draft)
        .import_str(&csv_text(&headers, &[&["150", "X"], &["50", "Z"]]));

    assert_eq!(from_records.errors(), from_text.errors());
}

#[test]
fn imports_from_file_and_reader() {
    let draft = full_draft();
    let text = csv_text(
        &[
            "temperature",
            "time",
            "loading",
            "solvent",
            "additive",
            "pressure",
            "yield",
            "impurity",
        ],
        &[
            &["35", "7.5", "2", "DMF", "CCO", "5", "81.2", "0.4"],
            &["50", "6", "3", "THF", "C", "5", "", ""],
        ],
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    let importer = CsvImporter::new(&draft);
    let report = importer.import_path(file.path()).unwrap();
    assert_eq!(report, importer.import_reader(text.as_bytes()).unwrap());

    assert_eq!(report.valid_rows().count(), 1);
    let columns: Vec<Option<String>> = report.errors().into_iter().map(|e| e.column).collect();
    assert_eq!(
        columns,
        vec![
            Some("time".to_string()),
            Some("loading".to_string()),
            Some("additive".to_string()),
        ]
    );
}

#[test]
fn missing_file_is_io_error() {
    let draft = screening_draft();
    let dir = tempfile::tempdir().unwrap();
    let result = CsvImporter::new(&draft).import_path(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(basil_csv::CsvError::Io(_))));
}
