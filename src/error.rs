//! Error types for plotstore.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for plotstore operations.
pub type Result<T> = std::result::Result<T, PlotStoreError>;

/// Errors that can occur in plotstore.
#[derive(Debug, Error)]
pub enum PlotStoreError {
    /// The handle is not a line or an error-bar group.
    #[error("Unsupported input: {kind}. Please consider filing a bug-report")]
    Unsupported {
        /// Kind of the rejected handle.
        kind: String,
    },

    /// The key cannot be written to.
    #[error("Invalid target '{key}': {reason}")]
    InvalidTarget {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Data that cannot be interpreted (bad shapes, unknown error-bar geometry, ...).
    #[error("Data error: {0}")]
    Data(String),

    /// Key not present in the container.
    #[error("Node not found: {path}")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// Failed to read or write a netCDF/HDF5 file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Failed to encode or decode a nested mapping.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotStoreError {
    /// Create an Unsupported error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    /// Create an InvalidTarget error.
    pub fn invalid_target(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a Data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

impl From<netcdf::Error> for PlotStoreError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PlotStoreError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Data(format!("Invalid shape/data size: {}", err))
    }
}
