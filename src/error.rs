//! Error types for exotriage
//!
//! Every failure mode is a distinct, catchable condition: callers recover by
//! re-supplying correct data, retraining, or regenerating the artifact. A
//! record that cannot be scored raises instead of defaulting to a label.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exotriage error types
#[derive(Error, Debug)]
pub enum Error {
    /// Feature set mismatch between training and inference, or missing column
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// Zero usable rows for the requested operation
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A feature column has no observed values, so its imputation mean is undefined
    #[error("Feature column '{0}' has no observed values; its imputation mean is undefined")]
    AllMissingFeature(String),

    /// Persisted model artifact cannot be deserialized
    #[error("Corrupt model artifact: {0}")]
    CorruptArtifact(String),

    /// Persisted model artifact is stale or was trained against a different schema
    #[error("Incompatible model artifact: {0}")]
    IncompatibleSchema(String),

    /// Configuration rejected during startup validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage error (Parquet/Arrow or artifact IO)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
