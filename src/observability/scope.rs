//! ObservationScope for begin/complete logging around a unit of work

use std::time::Instant;

use super::logger::Logger;

/// A scope that logs begin and end events for a named unit of work
///
/// - Logs `{name}_BEGIN` on creation (INFO)
/// - Logs `{name}_COMPLETE` with `elapsed_ms` from `complete_with_fields` (INFO)
/// - Logs `{name}_FAILED` from `fail_with_fields` (ERROR)
/// - Logs `{name}_INCOMPLETE` if dropped without either (WARN)
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope with fields repeated on every line.
    /// Logs `{name}_BEGIN` immediately.
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: false,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.elapsed_ms();

        let mut all_fields = self.line_fields(extra_fields);
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    /// Mark the scope as failed. The extra fields carry the reason.
    pub fn fail_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;

        let all_fields = self.line_fields(extra_fields);
        Logger::error(&format!("{}_FAILED", self.name), &all_fields);
    }

    /// Milliseconds since the scope began
    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    /// Scope fields followed by the extra fields of one line
    fn line_fields<'f>(&'f self, extra_fields: &[(&'f str, &'f str)]) -> Vec<(&'f str, &'f str)> {
        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            let event = format!("{}_INCOMPLETE", self.name);
            Logger::warn(&event, &[("reason", "scope dropped without completion")]);
        }
    }
}
