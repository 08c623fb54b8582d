//! CLI-specific error types
//!
//! `CliError` ends the process. `SessionError` is reported on the
//! response line and the session keeps going.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::planner::QueryError;
use crate::schema::DatasetError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Dataset could not be loaded
    DatasetError,
    /// Bad command-line value or rejected query
    InvalidArgument,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SCREEN_CLI_CONFIG_ERROR",
            Self::IoError => "SCREEN_CLI_IO_ERROR",
            Self::DatasetError => "SCREEN_CLI_DATASET_ERROR",
            Self::InvalidArgument => "SCREEN_CLI_INVALID_ARGUMENT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// No dataset given on the command line or in the config
    pub fn no_dataset() -> Self {
        Self::new(
            CliErrorCode::ConfigError,
            "No dataset given. Pass --data <file> or set data_file in the config.",
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        Self::new(
            CliErrorCode::DatasetError,
            format!("{} ({})", e, e.code().code()),
        )
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::invalid_argument(format!("{} ({})", e, e.code().code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Error reported for one session request
#[derive(Debug, Error)]
pub enum SessionError {
    /// Request line is not a valid request object
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Request is well-formed but carries an unusable value
    #[error("{0}")]
    InvalidValue(String),

    /// Search text was rejected by the parser
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl SessionError {
    /// Stable error code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::BadRequest(_) => "SCREEN_SESSION_BAD_REQUEST",
            SessionError::InvalidValue(_) => "SCREEN_SESSION_INVALID_VALUE",
            SessionError::Query(err) => err.code().code(),
        }
    }
}
