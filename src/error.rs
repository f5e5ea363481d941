//! Error types for the sentiment library.
//!
//! All fallible operations return [`SentimentError`]. The variants follow the
//! workflow's failure taxonomy: missing inputs, malformed data, training
//! problems, incompatible persisted models, and unexpected internal faults.
//! None of these are transient, so nothing in the crate retries.
//!
//! # Examples
//!
//! ```
//! use sentiment::error::{Result, SentimentError};
//!
//! fn check_folds(folds: usize) -> Result<()> {
//!     if folds < 2 {
//!         return Err(SentimentError::config("folds must be at least 2"));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_folds(1).unwrap_err();
//! assert_eq!(err.exit_code(), 2);
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sentiment operations.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// A data file or model file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A row or column in the input data is malformed, or a model file is corrupt.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Training cannot proceed on the given data (too few rows, single class, ...).
    #[error("Training error: {0}")]
    Training(String),

    /// A persisted model was written by an incompatible format or feature schema.
    #[error("Model version error: {0}")]
    ModelVersion(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors not covered by a more specific variant.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SentimentError.
pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SentimentError::NotFound(msg.into())
    }

    /// Create a new data format error.
    pub fn data_format<S: Into<String>>(msg: S) -> Self {
        SentimentError::DataFormat(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SentimentError::Training(msg.into())
    }

    /// Create a new model version error.
    pub fn model_version<S: Into<String>>(msg: S) -> Self {
        SentimentError::ModelVersion(msg.into())
    }

    /// Create a new invalid config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentimentError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentimentError::Analysis(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SentimentError::Internal(msg.into())
    }

    /// Map an I/O error on `path` to the taxonomy, turning a missing file into
    /// [`SentimentError::NotFound`].
    pub fn from_io(err: io::Error, path: &std::path::Path) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            SentimentError::NotFound(path.display().to_string())
        } else {
            SentimentError::Io(err)
        }
    }

    /// Process exit code for the CLI.
    ///
    /// 2 for data, format, version and configuration problems, 3 for training
    /// problems, 1 for anything unexpected.
    pub fn exit_code(&self) -> i32 {
        match self {
            SentimentError::NotFound(_)
            | SentimentError::DataFormat(_)
            | SentimentError::ModelVersion(_)
            | SentimentError::Config(_) => 2,
            SentimentError::Training(_) => 3,
            SentimentError::Analysis(_)
            | SentimentError::Internal(_)
            | SentimentError::Io(_)
            | SentimentError::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SentimentError::data_format("line 3: missing label column");
        assert_eq!(
            error.to_string(),
            "Data format error: line 3: missing label column"
        );

        let error = SentimentError::training("only one label class");
        assert_eq!(error.to_string(), "Training error: only one label class");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SentimentError::not_found("x").exit_code(), 2);
        assert_eq!(SentimentError::data_format("x").exit_code(), 2);
        assert_eq!(SentimentError::model_version("x").exit_code(), 2);
        assert_eq!(SentimentError::training("x").exit_code(), 3);
        assert_eq!(SentimentError::internal("x").exit_code(), 1);
    }

    #[test]
    fn test_io_not_found_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SentimentError::from_io(io_error, std::path::Path::new("/tmp/missing.tsv"));

        match error {
            SentimentError::NotFound(path) => assert_eq!(path, "/tmp/missing.tsv"),
            _ => panic!("Expected NotFound variant"),
        }

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = SentimentError::from_io(io_error, std::path::Path::new("/tmp/x"));
        assert!(matches!(error, SentimentError::Io(_)));
    }
}
