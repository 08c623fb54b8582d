//! Query parser
//!
//! Turns a free-text query into a list of typed conditions:
//! split on `AND` → lex each fragment → resolve field → convert number.
//! Parsing is all-or-nothing; the first failing fragment, left to right,
//! decides the error.

use crate::schema::FieldResolver;

use super::ast::{Condition, ParsedQuery};
use super::errors::{QueryError, QueryResult};
use super::lexer::{lex_condition, split_conditions};

/// Stateless query parser
pub struct QueryParser;

impl QueryParser {
    /// Parses a query string
    pub fn parse(query: &str) -> QueryResult<ParsedQuery> {
        if query.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let conditions = split_conditions(query)
            .into_iter()
            .map(Self::build_condition)
            .collect::<QueryResult<Vec<_>>>()?;

        ParsedQuery::new(conditions).ok_or(QueryError::NoConditions)
    }

    /// Builds one condition from a trimmed fragment
    fn build_condition(fragment: &str) -> QueryResult<Condition> {
        let tokens = lex_condition(fragment)?;

        let metric = FieldResolver::resolve(tokens.field)
            .map_err(|miss| QueryError::unknown_field(miss.alias, &miss.known))?;

        // The lexer only admits `-?[0-9]+(\.[0-9]*)?`, which always parses
        let value = tokens
            .number
            .parse::<f64>()
            .map_err(|_| QueryError::malformed(fragment))?;

        Ok(Condition::new(metric, tokens.op, value))
    }
}
