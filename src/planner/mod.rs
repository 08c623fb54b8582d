//! Query planner: turns query text into typed conditions
//!
//! # Grammar
//!
//! ```text
//! query     := condition ( "AND" condition )*
//! condition := field ws* op ws* number
//! op        := ">=" | "<=" | ">" | "<" | "="
//! number    := "-"? digit+ ( "." digit* )?
//! ```
//!
//! `field` is matched exactly against the alias table. Conditions are
//! AND-combined; there is no OR.

mod ast;
mod errors;
mod explain;
mod lexer;
mod parser;

pub use ast::{
    CompareOp, Condition, PageRequest, PageSize, ParsedQuery, SortDirection, SortSpec,
};
pub use errors::{QueryError, QueryErrorCode, QueryResult};
pub use explain::{alias_listing, ExplainPlan, ExplainedCondition};
pub use lexer::{lex_condition, split_conditions, ConditionTokens, AND_KEYWORD};
pub use parser::QueryParser;
