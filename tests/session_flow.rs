//! Session Flow Tests
//!
//! Tests for the interactive results view driven through JSON lines:
//! - Search, sort, page and page-size requests compose
//! - Rejected searches, blank ones included, leave the view untouched
//! - Every response carries a fresh request id

use screener::cli::{self, ScreenSession, SessionRequest};
use screener::observability::MetricsRegistry;
use screener::planner::{PageSize, SortSpec};
use screener::schema::{Metric, StockRecord};
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn universe() -> Vec<StockRecord> {
    (0..40)
        .map(|i| {
            StockRecord::new(format!("U{:02}", i))
                .with(Metric::MarketCapB, (40 - i) as f64 * 10.0)
                .with(Metric::DividendYieldPercent, (i % 4) as f64)
        })
        .collect()
}

fn tickers(response: &Value) -> Vec<String> {
    response["data"]["result"]["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Ticker"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Session Requests
// =============================================================================

/// Search, then sort ascending, then page through.
#[test]
fn test_search_sort_page() {
    let records = universe();
    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&records, PageSize::Ten, &metrics);

    let r = session.handle_line(r#"{"op":"search","query":"Dividend Yield >= 2"}"#);
    assert_eq!(r["data"]["result"]["total_matches"], 20);
    assert_eq!(r["data"]["total_pages"], 2);

    let r = session.handle_line(r#"{"op":"sort","field":"Market Capitalization"}"#);
    assert_eq!(tickers(&r)[0], "U39");

    let r = session.handle_line(r#"{"op":"page","page":2}"#);
    let second = tickers(&r);
    assert_eq!(second.len(), 10);
    assert_eq!(second.last().unwrap(), "U02");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.queries_executed, 1);
    assert_eq!(snapshot.records_scanned, 40);
    assert_eq!(snapshot.records_matched, 20);
}

/// Blank search text is an empty query, not a request to browse.
#[test]
fn test_blank_search_rejected() {
    let records = universe();
    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&records, PageSize::Ten, &metrics);

    session.handle_line(r#"{"op":"search","query":"Dividend Yield = 0"}"#);
    let r = session.handle_line(r#"{"op":"search","query":"   "}"#);

    assert_eq!(r["status"], "error");
    assert_eq!(r["code"], "SCREEN_QUERY_EMPTY");
    assert_eq!(r["message"], "Query cannot be empty");
    assert_eq!(session.query(), Some("Dividend Yield = 0"));
    assert_eq!(metrics.snapshot().queries_rejected, 1);
}

/// A rejected search reports the parser message and changes nothing.
#[test]
fn test_rejected_search_keeps_view() {
    let records = universe();
    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&records, PageSize::TwentyFive, &metrics);

    let before = session
        .apply(
            SessionRequest::Search {
                query: "Market Cap > 200".to_string(),
            },
            Uuid::nil(),
        )
        .unwrap();

    let r = session.handle_line(r#"{"op":"search","query":"Market Cap >"}"#);
    assert_eq!(r["status"], "error");
    assert_eq!(r["code"], "SCREEN_QUERY_MALFORMED_CONDITION");
    assert_eq!(r["message"], "Invalid condition format: Market Cap >");

    assert_eq!(session.current(), before.result);
    assert_eq!(session.query(), Some("Market Cap > 200"));
}

/// Request ids are unique per response, success or failure.
#[test]
fn test_request_ids_are_unique() {
    let records = universe();
    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&records, PageSize::Ten, &metrics);

    let a = session.handle_line(r#"{"op":"reset"}"#);
    let b = session.handle_line(r#"{"op":"reset"}"#);
    let c = session.handle_line(r#"{"op":"unknown"}"#);

    let ids: Vec<&str> = vec![
        a["data"]["request_id"].as_str().unwrap(),
        b["data"]["request_id"].as_str().unwrap(),
        c["request_id"].as_str().unwrap(),
    ];
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    for id in ids {
        assert!(Uuid::parse_str(id).is_ok());
    }
}

/// Sorting twice on one field flips direction; a new field starts ascending.
#[test]
fn test_sort_requests_toggle() {
    let records = universe();
    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&records, PageSize::Ten, &metrics);

    let sort = |field: &str| SessionRequest::Sort {
        field: field.to_string(),
    };

    session.apply(sort("Dividend Yield"), Uuid::nil()).unwrap();
    session.apply(sort("Dividend Yield"), Uuid::nil()).unwrap();
    assert_eq!(session.sort(), SortSpec::desc(Metric::DividendYieldPercent));

    session.apply(sort("Market Cap"), Uuid::nil()).unwrap();
    assert_eq!(session.sort(), SortSpec::asc(Metric::MarketCapB));
}

// =============================================================================
// Session Command
// =============================================================================

/// `start` answers every non-blank line with one JSON line.
#[test]
fn test_start_command_over_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("universe.json");
    std::fs::write(&path, serde_json::to_string(&universe()).unwrap()).unwrap();

    let input = "{\"op\":\"page_size\",\"size\":25}\n\n{\"op\":\"page\",\"page\":0}\n";
    let mut out = Vec::new();
    cli::start(None, Some(&path), input.as_bytes(), &mut out).unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["data"]["summary"], "40 results found: Showing page 1 of 2");
    assert_eq!(lines[1]["code"], "SCREEN_SESSION_INVALID_VALUE");
}
