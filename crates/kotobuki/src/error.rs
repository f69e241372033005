//! Error types for the Kotobuki renderer.
//!
//! Rendering itself never fails on data problems; these errors only come
//! from the boundary (decoding documents, loading template files).

use thiserror::Error;

/// All errors that can occur in Kotobuki
#[derive(Error, Debug)]
pub enum KotobukiError {
    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Kotobuki operations
pub type Result<T> = std::result::Result<T, KotobukiError>;
