//! Query executor: filter, sort, paginate
//!
//! # Execution Flow (strict order)
//!
//! 1. Parse the query (rejections stop here)
//! 2. Keep records satisfying every condition, in dataset order
//! 3. Stable sort by the chosen metric, if any
//! 4. Slice out the requested page
//!
//! # Invariants
//!
//! - Filtering and sorting never mutate or reorder the source records
//! - Records with equal sort values keep their dataset order
//! - Pages past the end are empty, not errors

mod executor;
mod filters;
mod paginator;
mod result;
mod sorter;

pub use executor::{QueryEngine, RecordSource};
pub use filters::ConditionFilter;
pub use paginator::{PageLink, Paginator};
pub use result::ResultPage;
pub use sorter::RecordSorter;
