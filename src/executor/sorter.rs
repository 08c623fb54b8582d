//! Result sorting
//!
//! Numeric-only, stable, and non-mutating: the caller's slice is left as is
//! and a new ordering is returned.

use std::cmp::Ordering;

use crate::planner::{SortDirection, SortSpec};
use crate::schema::StockRecord;

/// Sorts records by a metric
pub struct RecordSorter;

impl RecordSorter {
    /// Returns the records ordered by `spec`. Without a sort field the input
    /// order is returned unchanged. Records with equal values keep their
    /// relative input order.
    pub fn sort<'a>(records: &[&'a StockRecord], spec: &SortSpec) -> Vec<&'a StockRecord> {
        let mut ordered = records.to_vec();

        if let Some(metric) = spec.field {
            ordered.sort_by(|a, b| {
                Self::compare_values(a.metric(metric), b.metric(metric), spec.direction)
            });
        }

        ordered
    }

    /// Subtraction-based comparison: sign of `(a - b) * ±1`.
    ///
    /// `a - b` is undefined only for non-finite inputs (`inf - inf`, NaN);
    /// those fall back to IEEE total ordering so the comparator stays a
    /// total preorder.
    pub fn compare_values(a: f64, b: f64, direction: SortDirection) -> Ordering {
        let delta = (a - b) * direction.multiplier();
        match delta.partial_cmp(&0.0) {
            Some(ordering) => ordering,
            None => match direction {
                SortDirection::Asc => a.total_cmp(&b),
                SortDirection::Desc => b.total_cmp(&a),
            },
        }
    }
}
