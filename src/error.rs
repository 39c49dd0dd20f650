//! Error types for recommendation sessions.

use thiserror::Error;

/// Top-level error type.
///
/// `NotFound`, `NotReady` and `EmptyCorpus` come from the recommendation core.
/// The remaining variants are raised at the corpus-loading boundary.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Query title is not in the current document table.
    #[error("Book title not found: {title}")]
    NotFound { title: String },

    /// Query issued before any corpus was loaded.
    #[error("Please upload and process a file first")]
    NotReady,

    /// Normalization removed every document.
    #[error("corpus contains no usable documents after normalization")]
    EmptyCorpus,

    #[error("unsupported file format: {extension:?} (expected .csv, .tsv, .xls or .xlsx)")]
    UnsupportedFormat { extension: String },

    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

impl RecommendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecommendError::NotFound { .. })
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, RecommendError::NotReady)
    }
}

/// Result type for recommender operations.
pub type Result<T> = std::result::Result<T, RecommendError>;
