use serde_json::{json, Value};
use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Application-level error type.
/// Rendered by `main` as a JSON error object on stderr with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnsupportedDocument(_) => "UNSUPPORTED_DOCUMENT",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Embedding(_) => "EMBEDDING_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::NotFound(_)
            | AppError::Validation(_)
            | AppError::UnsupportedDocument(_)
            | AppError::Catalog(_) => 2,
            _ => 1,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AppError::Embedding(e) => tracing::error!("Embedding error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        })
    }
}
