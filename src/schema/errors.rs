//! Dataset error types
//!
//! Error codes:
//! - SCREEN_DATASET_IO
//! - SCREEN_DATASET_JSON
//! - SCREEN_DATASET_INVALID_RECORD

use std::fmt;
use std::io;

use thiserror::Error;

/// Dataset error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetErrorCode {
    /// Dataset file could not be read
    ScreenDatasetIo,
    /// Dataset file is not valid JSON or has the wrong shape
    ScreenDatasetJson,
    /// A record violates the record schema
    ScreenDatasetInvalidRecord,
}

impl DatasetErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DatasetErrorCode::ScreenDatasetIo => "SCREEN_DATASET_IO",
            DatasetErrorCode::ScreenDatasetJson => "SCREEN_DATASET_JSON",
            DatasetErrorCode::ScreenDatasetInvalidRecord => "SCREEN_DATASET_INVALID_RECORD",
        }
    }
}

impl fmt::Display for DatasetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading a record collection
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

impl DatasetError {
    /// Returns the error code
    pub fn code(&self) -> DatasetErrorCode {
        match self {
            DatasetError::Io { .. } => DatasetErrorCode::ScreenDatasetIo,
            DatasetError::Json(_) => DatasetErrorCode::ScreenDatasetJson,
            DatasetError::InvalidRecord { .. } => DatasetErrorCode::ScreenDatasetInvalidRecord,
        }
    }

    pub(crate) fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        DatasetError::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
