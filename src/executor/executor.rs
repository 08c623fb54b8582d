//! Query executor for the screener
//!
//! Execution flow (strict order):
//! 1. Parse the query; a rejected query never touches the records
//! 2. Filter records by every condition
//! 3. Apply sort (if specified)
//! 4. Slice out the requested page
//! 5. Return the page with the total match count

use crate::planner::{Condition, PageRequest, QueryParser, QueryResult, SortSpec};
use crate::schema::{Dataset, StockRecord};

use super::filters::ConditionFilter;
use super::paginator::Paginator;
use super::result::ResultPage;
use super::sorter::RecordSorter;

/// Trait for reading the record collection
pub trait RecordSource {
    /// All records in dataset order
    fn records(&self) -> &[StockRecord];
}

impl RecordSource for [StockRecord] {
    fn records(&self) -> &[StockRecord] {
        self
    }
}

impl RecordSource for Vec<StockRecord> {
    fn records(&self) -> &[StockRecord] {
        self
    }
}

impl RecordSource for Dataset {
    fn records(&self) -> &[StockRecord] {
        &self.records
    }
}

/// Runs queries against a record source
pub struct QueryEngine;

impl QueryEngine {
    /// Parses `query` and executes it.
    ///
    /// Same records + same arguments = same page.
    pub fn execute<S>(
        source: &S,
        query: &str,
        sort: &SortSpec,
        page: PageRequest,
    ) -> QueryResult<ResultPage>
    where
        S: RecordSource + ?Sized,
    {
        let parsed = QueryParser::parse(query)?;
        Ok(Self::execute_conditions(
            source,
            parsed.conditions(),
            sort,
            page,
        ))
    }

    /// Executes already-parsed conditions. An empty list selects every
    /// record, which is how browsing without a query works.
    pub fn execute_conditions<S>(
        source: &S,
        conditions: &[Condition],
        sort: &SortSpec,
        page: PageRequest,
    ) -> ResultPage
    where
        S: RecordSource + ?Sized,
    {
        let records = source.records();

        let matching = ConditionFilter::apply(records, conditions);
        let ordered = RecordSorter::sort(&matching, sort);
        let slice = Paginator::page(&ordered, page.page, page.size);

        ResultPage {
            records: slice.iter().map(|r| (*r).clone()).collect(),
            total_matches: ordered.len(),
            scanned_count: records.len(),
            page: page.page,
            page_size: page.size,
        }
    }
}
