//! Interactive screening session
//!
//! Holds the state of one results view over a loaded dataset: the accepted
//! conditions, the sort, and the page. Every request recomputes the page
//! from scratch; nothing is cached between requests. Only searches count
//! as executed queries in the metrics.
//!
//! Request lines are JSON objects tagged by `op`:
//!
//! ```text
//! {"op":"search","query":"PE < 15 AND ROE > 20"}
//! {"op":"sort","field":"Market Cap"}
//! {"op":"page","page":2}
//! {"op":"page_size","size":25}
//! {"op":"reset"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::executor::{PageLink, QueryEngine, ResultPage};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::planner::{Condition, PageRequest, PageSize, QueryParser, SortSpec};
use crate::schema::{FieldResolver, StockRecord};

use super::errors::SessionError;
use super::io::{error_envelope, ok_envelope};

/// One session request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionRequest {
    /// Apply a new query. Blank text is rejected; `reset` shows every record
    Search { query: String },
    /// Select a sort column, toggling direction on repeat
    Sort { field: String },
    /// Jump to a page
    Page { page: usize },
    /// Change the page size
    PageSize { size: usize },
    /// Back to the unfiltered, unsorted first page
    Reset,
}

/// State returned after every successful request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub request_id: Uuid,
    /// Accepted query text, `None` when browsing every record
    pub query: Option<String>,
    pub sort: SortSpec,
    pub total_pages: usize,
    pub summary: String,
    pub window: Vec<PageLink>,
    pub result: ResultPage,
}

/// A results view over a read-only record collection
pub struct ScreenSession<'a> {
    records: &'a [StockRecord],
    metrics: &'a MetricsRegistry,
    default_size: PageSize,
    query: Option<String>,
    conditions: Vec<Condition>,
    sort: SortSpec,
    page: PageRequest,
}

impl<'a> ScreenSession<'a> {
    /// Starts on page 1 of every record, unsorted
    pub fn new(
        records: &'a [StockRecord],
        default_size: PageSize,
        metrics: &'a MetricsRegistry,
    ) -> Self {
        Self {
            records,
            metrics,
            default_size,
            query: None,
            conditions: Vec::new(),
            sort: SortSpec::none(),
            page: PageRequest::first(default_size),
        }
    }

    /// Handles one raw request line and returns its response envelope
    pub fn handle_line(&mut self, line: &str) -> Value {
        let request_id = Uuid::new_v4();

        let outcome = serde_json::from_str::<SessionRequest>(line)
            .map_err(|e| SessionError::BadRequest(e.to_string()))
            .and_then(|request| self.apply(request, request_id));

        match outcome {
            Ok(view) => match serde_json::to_value(&view) {
                Ok(data) => ok_envelope(data),
                Err(e) => {
                    Self::error_response(&SessionError::BadRequest(e.to_string()), request_id)
                }
            },
            Err(err) => Self::error_response(&err, request_id),
        }
    }

    /// Applies a request and returns the refreshed view.
    ///
    /// On error the session state is left exactly as it was.
    pub fn apply(
        &mut self,
        request: SessionRequest,
        request_id: Uuid,
    ) -> Result<SessionView, SessionError> {
        let searched = matches!(request, SessionRequest::Search { .. });

        match request {
            SessionRequest::Search { query } => self.search(&query)?,
            SessionRequest::Sort { field } => {
                let metric = FieldResolver::resolve_column(&field).map_err(|miss| {
                    SessionError::InvalidValue(format!(
                        "Cannot sort by '{}'. Sortable fields are: {}",
                        miss.alias,
                        miss.known.join(", ")
                    ))
                })?;
                self.sort = self.sort.toggled(metric);
            }
            SessionRequest::Page { page } => {
                if page == 0 {
                    return Err(SessionError::InvalidValue(
                        "page must be at least 1".to_string(),
                    ));
                }
                self.page.page = page;
            }
            SessionRequest::PageSize { size } => {
                let size = PageSize::try_from(size).map_err(SessionError::InvalidValue)?;
                self.page = PageRequest::first(size);
            }
            SessionRequest::Reset => {
                self.query = None;
                self.conditions.clear();
                self.sort = SortSpec::none();
                self.page = PageRequest::first(self.default_size);
            }
        }

        let view = self.view(request_id);
        if searched {
            self.metrics
                .record_execution(view.result.scanned_count, view.result.total_matches);
        }

        Ok(view)
    }

    /// Current page without changing any state
    pub fn current(&self) -> ResultPage {
        QueryEngine::execute_conditions(self.records, &self.conditions, &self.sort, self.page)
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn search(&mut self, query: &str) -> Result<(), SessionError> {
        match QueryParser::parse(query) {
            Ok(parsed) => {
                self.query = Some(query.trim().to_string());
                self.conditions = parsed.into_conditions();
                self.page.page = 1;
                Ok(())
            }
            Err(err) => {
                self.metrics.increment_queries_rejected();
                log_event_with_fields(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("query", query)],
                );
                Err(err.into())
            }
        }
    }

    fn view(&self, request_id: Uuid) -> SessionView {
        let result = self.current();

        let matches = result.total_matches.to_string();
        let page = result.page.to_string();
        let request = request_id.to_string();
        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("matches", matches.as_str()),
                ("page", page.as_str()),
                ("request_id", request.as_str()),
            ],
        );

        SessionView {
            request_id,
            query: self.query.clone(),
            sort: self.sort,
            total_pages: result.total_pages(),
            summary: result.summary(),
            window: result.window(),
            result,
        }
    }

    fn error_response(err: &SessionError, request_id: Uuid) -> Value {
        let mut envelope = error_envelope(err.code(), &err.to_string());
        if let Some(obj) = envelope.as_object_mut() {
            obj.insert("request_id".to_string(), Value::String(request_id.to_string()));
        }
        envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SortDirection;
    use crate::schema::Metric;

    fn records(n: usize) -> Vec<StockRecord> {
        (0..n)
            .map(|i| {
                StockRecord::new(format!("T{:02}", i))
                    .with(Metric::MarketCapB, (i * 10) as f64)
                    .with(Metric::PERatio, (i % 5) as f64)
            })
            .collect()
    }

    fn search(query: &str) -> SessionRequest {
        SessionRequest::Search {
            query: query.to_string(),
        }
    }

    #[test]
    fn test_request_parsing() {
        let req: SessionRequest =
            serde_json::from_str(r#"{"op":"page_size","size":25}"#).unwrap();
        assert_eq!(req, SessionRequest::PageSize { size: 25 });

        let req: SessionRequest = serde_json::from_str(r#"{"op":"reset"}"#).unwrap();
        assert_eq!(req, SessionRequest::Reset);

        assert!(serde_json::from_str::<SessionRequest>(r#"{"op":"drop"}"#).is_err());
    }

    #[test]
    fn test_starts_with_all_records() {
        let data = records(23);
        let metrics = MetricsRegistry::new();
        let session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        let page = session.current();
        assert_eq!(page.total_matches, 23);
        assert_eq!(page.len(), 10);
    }

    #[test]
    fn test_search_resets_page() {
        let data = records(23);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        session.apply(SessionRequest::Page { page: 3 }, Uuid::nil()).unwrap();
        let view = session.apply(search("Market Cap >= 50"), Uuid::nil()).unwrap();

        assert_eq!(view.result.page, 1);
        assert_eq!(view.result.total_matches, 18);
        assert_eq!(view.query.as_deref(), Some("Market Cap >= 50"));
    }

    #[test]
    fn test_failed_search_keeps_previous_results() {
        let data = records(23);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        session.apply(search("PE = 0"), Uuid::nil()).unwrap();
        session.apply(SessionRequest::Page { page: 2 }, Uuid::nil()).unwrap();

        let err = session.apply(search("Foo > 1"), Uuid::nil()).unwrap_err();
        assert_eq!(err.code(), "SCREEN_QUERY_UNKNOWN_FIELD");

        assert_eq!(session.query(), Some("PE = 0"));
        assert_eq!(session.page().page, 2);
        assert_eq!(session.current().total_matches, 5);
        assert_eq!(metrics.snapshot().queries_rejected, 1);
    }

    #[test]
    fn test_blank_search_is_empty_query() {
        let data = records(5);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        session.apply(search("PE > 2"), Uuid::nil()).unwrap();
        let err = session.apply(search("   "), Uuid::nil()).unwrap_err();

        assert_eq!(err.code(), "SCREEN_QUERY_EMPTY");
        assert_eq!(err.to_string(), "Query cannot be empty");
        assert_eq!(session.query(), Some("PE > 2"));
        assert_eq!(session.current().total_matches, 2);

        let response = session.handle_line(r#"{"op":"search","query":""}"#);
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "SCREEN_QUERY_EMPTY");
    }

    #[test]
    fn test_only_searches_count_as_executions() {
        let data = records(20);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        session.apply(search("PE >= 3"), Uuid::nil()).unwrap();
        session.apply(SessionRequest::Page { page: 2 }, Uuid::nil()).unwrap();
        session
            .apply(
                SessionRequest::Sort {
                    field: "PE".to_string(),
                },
                Uuid::nil(),
            )
            .unwrap();
        session
            .apply(SessionRequest::PageSize { size: 25 }, Uuid::nil())
            .unwrap();
        session.apply(SessionRequest::Reset, Uuid::nil()).unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 1);
        assert_eq!(snapshot.records_scanned, 20);
        assert_eq!(snapshot.records_matched, 8);
    }

    #[test]
    fn test_sort_toggles() {
        let data = records(5);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        let sort = |field: &str| SessionRequest::Sort {
            field: field.to_string(),
        };

        let view = session.apply(sort("Market Cap"), Uuid::nil()).unwrap();
        assert_eq!(view.sort, SortSpec::asc(Metric::MarketCapB));

        let view = session.apply(sort("MarketCapB"), Uuid::nil()).unwrap();
        assert_eq!(view.sort.direction, SortDirection::Desc);
        assert_eq!(view.result.records[0].ticker, "T04");

        let view = session.apply(sort("PE"), Uuid::nil()).unwrap();
        assert_eq!(view.sort, SortSpec::asc(Metric::PERatio));

        let err = session.apply(sort("Ticker"), Uuid::nil()).unwrap_err();
        assert_eq!(err.code(), "SCREEN_SESSION_INVALID_VALUE");
        assert_eq!(session.sort(), SortSpec::asc(Metric::PERatio));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let data = records(60);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        session.apply(SessionRequest::Page { page: 4 }, Uuid::nil()).unwrap();
        let view = session
            .apply(SessionRequest::PageSize { size: 25 }, Uuid::nil())
            .unwrap();

        assert_eq!(view.result.page, 1);
        assert_eq!(view.result.len(), 25);
        assert_eq!(view.total_pages, 3);

        let err = session
            .apply(SessionRequest::PageSize { size: 30 }, Uuid::nil())
            .unwrap_err();
        assert_eq!(err.code(), "SCREEN_SESSION_INVALID_VALUE");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let data = records(30);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::TwentyFive, &metrics);

        session.apply(search("PE > 1"), Uuid::nil()).unwrap();
        session.apply(SessionRequest::PageSize { size: 50 }, Uuid::nil()).unwrap();
        let view = session.apply(SessionRequest::Reset, Uuid::nil()).unwrap();

        assert_eq!(view.query, None);
        assert_eq!(view.sort, SortSpec::none());
        assert_eq!(view.result.page_size, PageSize::TwentyFive);
        assert_eq!(view.result.total_matches, 30);
    }

    #[test]
    fn test_handle_line_envelopes() {
        let data = records(3);
        let metrics = MetricsRegistry::new();
        let mut session = ScreenSession::new(&data, PageSize::Ten, &metrics);

        let ok = session.handle_line(r#"{"op":"search","query":"PE >= 1"}"#);
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["data"]["result"]["total_matches"], 2);
        assert_eq!(ok["data"]["summary"], "2 results found: Showing page 1 of 1");
        assert!(ok["data"]["request_id"].is_string());

        let err = session.handle_line("not json");
        assert_eq!(err["status"], "error");
        assert_eq!(err["code"], "SCREEN_SESSION_BAD_REQUEST");
        assert!(err["request_id"].is_string());

        let err = session.handle_line(r#"{"op":"search","query":"   AND   "}"#);
        assert_eq!(err["code"], "SCREEN_QUERY_NO_CONDITIONS");
        assert_eq!(err["message"], "Query contains no valid conditions");
    }
}
