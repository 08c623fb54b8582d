//! Explain output for a query string
//!
//! Shows how each condition was understood, with fields in canonical form,
//! or why the query was rejected.

use std::fmt;

use serde::Serialize;

use crate::schema::FieldResolver;

use super::ast::ParsedQuery;
use super::errors::QueryError;

/// One explained condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedCondition {
    /// Canonical field identifier
    pub field: &'static str,
    /// Dataset column
    pub column: &'static str,
    pub op: &'static str,
    pub value: f64,
    /// Rendering that parses back to the same condition
    pub canonical: String,
}

/// Explain output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainPlan {
    /// Whether parsing succeeded
    pub accepted: bool,
    pub conditions: Vec<ExplainedCondition>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<&'static str>,
}

impl ExplainPlan {
    /// Creates an explain plan from a parsed query
    pub fn from_query(query: &ParsedQuery) -> Self {
        let conditions = query
            .conditions()
            .iter()
            .map(|c| ExplainedCondition {
                field: c.metric.canonical(),
                column: c.metric.column(),
                op: c.op.symbol(),
                value: c.value,
                canonical: c.to_string(),
            })
            .collect();

        Self {
            accepted: true,
            conditions,
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a parse error
    pub fn from_error(err: &QueryError) -> Self {
        Self {
            accepted: false,
            conditions: Vec::new(),
            rejection_reason: Some(err.to_string()),
            rejection_code: Some(err.code().code()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            writeln!(f, "Conditions (all must hold):")?;
            for cond in &self.conditions {
                writeln!(
                    f,
                    "  - {} {} {}    [{}]",
                    cond.field, cond.op, cond.value, cond.canonical
                )?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}

/// Alias table grouped by field, for `screener fields`
pub fn alias_listing() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    crate::schema::Metric::ALL
        .iter()
        .map(|m| (m.canonical(), m.column(), FieldResolver::aliases_for(*m)))
        .collect()
}
