//! Import and template configuration
//!
//! Loaded from a TOML file with `[import]` and `[template]` tables. Every
//! field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [import]
//! delimiter = ";"
//! column_order = "strict"
//! allow_extra_columns = true
//!
//! [template]
//! rows = 5
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of example rows in a template
pub const DEFAULT_TEMPLATE_ROWS: usize = 3;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but are unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How the importer treats a header with the right columns in another order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrder {
    /// Accept and map columns by name, with a warning
    #[default]
    Reorder,
    /// Reject as a schema mismatch
    Strict,
}

/// Importer settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Field delimiter; detected from the header line when unset
    pub delimiter: Option<char>,
    /// Column order policy
    pub column_order: ColumnOrder,
    /// Accept unexpected columns as warnings
    pub allow_extra_columns: bool,
}

impl ImportConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fixed delimiter
    #[inline]
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// With column order policy
    #[inline]
    #[must_use]
    pub fn with_column_order(mut self, column_order: ColumnOrder) -> Self {
        self.column_order = column_order;
        self
    }

    /// With extra columns accepted
    #[inline]
    #[must_use]
    pub fn with_extra_columns(mut self, allow: bool) -> Self {
        self.allow_extra_columns = allow;
        self
    }

    /// Delimiter as the single byte the CSV reader expects
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for a non-ASCII or quote/newline delimiter
    pub fn delimiter_byte(&self) -> Result<Option<u8>, ConfigError> {
        match self.delimiter {
            None => Ok(None),
            Some(ch) if ch.is_ascii() && !matches!(ch, '"' | '\n' | '\r') => {
                Ok(u8::try_from(ch).ok())
            }
            Some(ch) => Err(ConfigError::Invalid(format!(
                "delimiter {ch:?} must be a single ASCII character other than a quote or newline"
            ))),
        }
    }
}

/// Template generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Number of example rows
    pub rows: usize,
    /// Seed for reproducible example values; random when unset
    pub seed: Option<u64>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_TEMPLATE_ROWS,
            seed: None,
        }
    }
}

impl TemplateConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With example row count
    #[inline]
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// With seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the row count
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when `rows` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Invalid(
                "template.rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasilConfig {
    pub import: ImportConfig,
    pub template: TemplateConfig,
}

impl BasilConfig {
    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns error for malformed TOML or invalid values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for zero template rows or a bad delimiter
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.template.validate()?;
        self.import.delimiter_byte()?;
        Ok(())
    }
}
