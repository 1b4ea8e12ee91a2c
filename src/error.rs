// ⚠️ Error Taxonomy - every failure the catalog core can report

use thiserror::Error;

/// Errors produced by the store, export and parsing layers.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was empty. The store is never touched when this fires.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Book not found: {id}")]
    NotFound { id: String },

    #[error("Unknown genre: {0}")]
    InvalidGenre(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Import failure; `row` is the 1-based data row (header excluded).
    #[error("Import failed at row {row}: {source}")]
    Import {
        row: usize,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    pub fn validation(field: &str, message: &str) -> Self {
        CatalogError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// True for errors caused by caller input rather than the storage engine.
    pub fn is_user_error(&self) -> bool {
        match self {
            CatalogError::Validation { .. }
            | CatalogError::InvalidGenre(_)
            | CatalogError::InvalidDate(_) => true,
            CatalogError::Import { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
