//! I/O level errors
//!
//! Content problems in an imported file never surface here; they are
//! collected in [`crate::ImportReport`]. `CsvError` covers the cases where
//! no report can be produced at all.

/// Errors reading or writing CSV documents
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    /// File or stream I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writer produced bytes that are not UTF-8
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Configuration rejected at use time
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl<W> From<csv::IntoInnerError<W>> for CsvError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        Self::Io(err.into_error())
    }
}
