//! Query parse error types
//!
//! Error codes:
//! - SCREEN_QUERY_EMPTY (REJECT)
//! - SCREEN_QUERY_NO_CONDITIONS (REJECT)
//! - SCREEN_QUERY_MALFORMED_CONDITION (REJECT)
//! - SCREEN_QUERY_UNKNOWN_FIELD (REJECT)
//!
//! Every parse error rejects the whole query. The message is meant to be
//! shown to the user verbatim.

use std::fmt;

use thiserror::Error;

/// Query error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Blank or whitespace-only input
    ScreenQueryEmpty,
    /// Input held only AND keywords and whitespace
    ScreenQueryNoConditions,
    /// A fragment does not match `<field> <op> <number>`
    ScreenQueryMalformedCondition,
    /// A fragment names a field with no alias entry
    ScreenQueryUnknownField,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::ScreenQueryEmpty => "SCREEN_QUERY_EMPTY",
            QueryErrorCode::ScreenQueryNoConditions => "SCREEN_QUERY_NO_CONDITIONS",
            QueryErrorCode::ScreenQueryMalformedCondition => "SCREEN_QUERY_MALFORMED_CONDITION",
            QueryErrorCode::ScreenQueryUnknownField => "SCREEN_QUERY_UNKNOWN_FIELD",
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query parse failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Query contains no valid conditions")]
    NoConditions,

    #[error("Invalid condition format: {fragment}")]
    MalformedCondition { fragment: String },

    #[error("Invalid field: {alias}. Available fields are: {}", .known.join(", "))]
    UnknownField { alias: String, known: Vec<String> },
}

impl QueryError {
    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        match self {
            QueryError::EmptyQuery => QueryErrorCode::ScreenQueryEmpty,
            QueryError::NoConditions => QueryErrorCode::ScreenQueryNoConditions,
            QueryError::MalformedCondition { .. } => QueryErrorCode::ScreenQueryMalformedCondition,
            QueryError::UnknownField { .. } => QueryErrorCode::ScreenQueryUnknownField,
        }
    }

    pub fn malformed(fragment: impl Into<String>) -> Self {
        QueryError::MalformedCondition {
            fragment: fragment.into(),
        }
    }

    pub fn unknown_field(alias: impl Into<String>, known: &[&str]) -> Self {
        QueryError::UnknownField {
            alias: alias.into(),
            known: known.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The offending fragment or alias, if the error carries one
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            QueryError::MalformedCondition { fragment } => Some(fragment),
            QueryError::UnknownField { alias, .. } => Some(alias),
            _ => None,
        }
    }
}

/// Result type for parse operations
pub type QueryResult<T> = Result<T, QueryError>;
