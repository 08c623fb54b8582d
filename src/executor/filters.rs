//! Condition filtering
//!
//! A record matches when every condition holds. Comparisons are plain
//! IEEE-754: `=` is exact equality, so `ROE = 0.3` will not match a stored
//! `0.1 + 0.2`. No epsilon is applied.

use crate::planner::Condition;
use crate::schema::StockRecord;

/// Evaluates conditions against records
pub struct ConditionFilter;

impl ConditionFilter {
    /// Checks if a record satisfies all conditions (AND semantics).
    /// An empty condition list matches every record.
    pub fn matches(record: &StockRecord, conditions: &[Condition]) -> bool {
        conditions
            .iter()
            .all(|cond| cond.op.evaluate(record.metric(cond.metric), cond.value))
    }

    /// Returns the matching records in input order
    pub fn apply<'a>(records: &'a [StockRecord], conditions: &[Condition]) -> Vec<&'a StockRecord> {
        records
            .iter()
            .filter(|record| Self::matches(record, conditions))
            .collect()
    }
}
