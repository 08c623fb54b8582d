//! screener - a boolean-AND stock screening query engine
//!
//! Queries are plain text such as `Market Cap > 300 AND PE < 15`. The
//! planner turns them into typed conditions; the executor filters a
//! read-only record collection, sorts it stably by one metric, and cuts
//! out a page.
//!
//! ```ignore
//! use screener::executor::QueryEngine;
//! use screener::planner::{PageRequest, SortSpec};
//! use screener::schema::{DatasetLoader, Metric};
//!
//! let dataset = DatasetLoader::load_file("stocks.json".as_ref())?;
//! let page = QueryEngine::execute(
//!     &dataset,
//!     "Market Cap > 300 AND PE < 15",
//!     &SortSpec::desc(Metric::MarketCapB),
//!     PageRequest::default(),
//! )?;
//! println!("{}", page.summary());
//! ```

pub mod cli;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod schema;
