//! Record schema, field aliases and dataset loading
//!
//! # Design Principles
//!
//! - The record layout is closed: one identifier, nine numeric metrics
//! - Only numeric fields can be filtered or sorted
//! - Alias lookup is exact; no case folding, no fuzzy matching
//! - Datasets are validated on load and read-only afterwards

mod aliases;
mod errors;
mod loader;
mod types;

pub use aliases::{FieldResolver, UnknownAlias, ALIASES};
pub use errors::{DatasetError, DatasetErrorCode, DatasetResult};
pub use loader::{Dataset, DatasetLoader};
pub use types::{Field, Metric, StockRecord};
