//! Query tokenizer
//!
//! Two stages:
//! 1. `split_conditions` cuts the query on the `AND` keyword
//! 2. `lex_condition` splits one fragment into field text, operator and
//!    number text
//!
//! Field text may contain any character (`P/E Ratio`,
//! `Debt-to-Equity Ratio`), so a fragment is read from the right: the
//! number is the trailing run of number characters, the operator sits
//! directly before it (modulo whitespace), and whatever remains is the
//! field.

use super::ast::CompareOp;
use super::errors::{QueryError, QueryResult};

/// Condition separator. Case-sensitive.
pub const AND_KEYWORD: &str = "AND";

/// Lexed parts of one condition fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionTokens<'a> {
    /// Field text, trimmed
    pub field: &'a str,
    pub op: CompareOp,
    /// Number text matching `-?[0-9]+(\.[0-9]*)?`
    pub number: &'a str,
}

/// Splits a query into trimmed, non-empty condition fragments
pub fn split_conditions(query: &str) -> Vec<&str> {
    query
        .split(AND_KEYWORD)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Lexes `<field> <op> <number>`. Any other shape is a malformed condition
/// carrying the fragment verbatim.
pub fn lex_condition(fragment: &str) -> QueryResult<ConditionTokens<'_>> {
    let malformed = || QueryError::malformed(fragment);
    let text = fragment.trim();

    let number_start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_number_char(*c))
        .last()
        .map(|(i, _)| i)
        .ok_or_else(malformed)?;

    let number = &text[number_start..];
    if !is_number_literal(number) {
        return Err(malformed());
    }

    let head = text[..number_start].trim_end();
    let (op, op_start) = split_operator(head).ok_or_else(malformed)?;

    Ok(ConditionTokens {
        field: head[..op_start].trim(),
        op,
        number,
    })
}

/// Finds the operator at the end of `head`, two-character forms first.
/// Returns the operator and its byte offset.
fn split_operator(head: &str) -> Option<(CompareOp, usize)> {
    let mut chars = head.char_indices().rev();
    let (last_idx, last) = chars.next()?;
    let prev = chars.next();

    match (prev, last) {
        (Some((idx, '>')), '=') => Some((CompareOp::Gte, idx)),
        (Some((idx, '<')), '=') => Some((CompareOp::Lte, idx)),
        (_, '>') => Some((CompareOp::Gt, last_idx)),
        (_, '<') => Some((CompareOp::Lt, last_idx)),
        (_, '=') => Some((CompareOp::Eq, last_idx)),
        _ => None,
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// `-?[0-9]+(\.[0-9]*)?`
fn is_number_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}
