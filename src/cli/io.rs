//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per stdin line (session mode)
//! - Output: one JSON object per stdout line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Read request lines, skipping blank ones
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
}

/// Write one JSON value as a line
pub fn write_json_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    write_json_line(writer, &ok_envelope(data))
}

/// Write plain text output
pub fn write_text<W: Write>(writer: &mut W, text: &str) -> CliResult<()> {
    writer.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"total_matches": 3})).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["total_matches"], 3);
    }

    #[test]
    fn test_error_envelope() {
        let mut out = Vec::new();
        write_json_line(
            &mut out,
            &error_envelope("SCREEN_QUERY_EMPTY", "Query cannot be empty"),
        )
        .unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "SCREEN_QUERY_EMPTY");
        assert_eq!(parsed["message"], "Query cannot be empty");
    }

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = "{\"op\":\"reset\"}\n\n   \n{\"op\":\"page\",\"page\":2}\n";
        let lines: Vec<String> = read_requests(input.as_bytes())
            .collect::<CliResult<_>>()
            .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "{\"op\":\"page\",\"page\":2}");
    }
}
