//! Observable events
//!
//! Events are explicit and typed; log lines never use free-form event names
//! except through `ObservationScope`.

use std::fmt;

use super::logger::Severity;

/// Observable events in the screener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Dataset
    /// Dataset parsed and validated. Rejections are logged on the
    /// `DATASET_LOAD_FAILED` scope line.
    DatasetLoaded,

    // Query
    /// Query executed and a page returned
    QueryExecuted,
    /// Query rejected by the parser
    QueryRejected,

    // Session
    /// Interactive session ready for requests
    SessionStart,
    /// Session input exhausted
    SessionEnd,
}

impl Event {
    pub const ALL: [Event; 6] = [
        Event::ConfigLoaded,
        Event::DatasetLoaded,
        Event::QueryExecuted,
        Event::QueryRejected,
        Event::SessionStart,
        Event::SessionEnd,
    ];

    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        for event in Event::ALL {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::DatasetLoaded.severity(), Severity::Info);
        assert_eq!(Event::QueryRejected.severity(), Severity::Warn);
        assert_eq!(Event::QueryExecuted.severity(), Severity::Info);
    }

    #[test]
    fn test_dataset_failure_has_no_separate_event() {
        assert!(Event::ALL.iter().all(|e| !e.as_str().ends_with("_FAILED")));
        assert!(Event::ALL.iter().all(|e| e.as_str() != "DATASET_REJECTED"));
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::SessionStart), "SESSION_START");
        assert_eq!(format!("{}", Event::DatasetLoaded), "DATASET_LOADED");
    }
}
