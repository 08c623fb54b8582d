//! Query AST structures
//!
//! Defines the parsed query representation consumed by the executor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldResolver, Metric};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// field > value
    Gt,
    /// field < value
    Lt,
    /// field >= value
    Gte,
    /// field <= value
    Lte,
    /// field = value (exact IEEE-754 equality)
    Eq,
}

impl CompareOp {
    /// All operators, two-character forms first
    pub const ALL: [CompareOp; 5] = [
        CompareOp::Gte,
        CompareOp::Lte,
        CompareOp::Gt,
        CompareOp::Lt,
        CompareOp::Eq,
    ];

    /// Operator as written in a query
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Eq => "=",
        }
    }

    /// Returns the operator name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            CompareOp::Gt => "gt",
            CompareOp::Lt => "lt",
            CompareOp::Gte => "gte",
            CompareOp::Lte => "lte",
            CompareOp::Eq => "eq",
        }
    }

    /// Applies the operator to `actual op threshold`
    pub fn evaluate(&self, actual: f64, threshold: f64) -> bool {
        match self {
            CompareOp::Gt => actual > threshold,
            CompareOp::Lt => actual < threshold,
            CompareOp::Gte => actual >= threshold,
            CompareOp::Lte => actual <= threshold,
            CompareOp::Eq => actual == threshold,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single comparison: metric, operator, threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub metric: Metric,
    pub op: CompareOp,
    pub value: f64,
}

impl Condition {
    pub fn new(metric: Metric, op: CompareOp, value: f64) -> Self {
        Self { metric, op, value }
    }

    pub fn gt(metric: Metric, value: f64) -> Self {
        Self::new(metric, CompareOp::Gt, value)
    }

    pub fn lt(metric: Metric, value: f64) -> Self {
        Self::new(metric, CompareOp::Lt, value)
    }

    pub fn gte(metric: Metric, value: f64) -> Self {
        Self::new(metric, CompareOp::Gte, value)
    }

    pub fn lte(metric: Metric, value: f64) -> Self {
        Self::new(metric, CompareOp::Lte, value)
    }

    pub fn eq(metric: Metric, value: f64) -> Self {
        Self::new(metric, CompareOp::Eq, value)
    }
}

/// Renders as `<primary alias> <op> <value>`, which parses back to the
/// same condition.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            FieldResolver::primary_alias(self.metric),
            self.op,
            self.value
        )
    }
}

/// A successfully parsed query: at least one condition, AND-combined
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    conditions: Vec<Condition>,
}

impl ParsedQuery {
    /// Wraps a condition list; `None` if it is empty
    pub fn new(conditions: Vec<Condition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self { conditions })
        }
    }

    /// Conditions in the order they were written
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn into_conditions(self) -> Vec<Condition> {
        self.conditions
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cond) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", cond)?;
        }
        Ok(())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Multiplier applied to an ascending comparison
    pub fn multiplier(&self) -> f64 {
        match self {
            SortDirection::Asc => 1.0,
            SortDirection::Desc => -1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort specification. No field means input order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Option<Metric>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Keep input order
    pub fn none() -> Self {
        Self::default()
    }

    pub fn asc(field: Metric) -> Self {
        Self {
            field: Some(field),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: Metric) -> Self {
        Self {
            field: Some(field),
            direction: SortDirection::Desc,
        }
    }

    /// Column-header toggle: selecting the current ascending field flips it
    /// to descending, anything else selects `field` ascending.
    pub fn toggled(&self, field: Metric) -> Self {
        if self.field == Some(field) && self.direction == SortDirection::Asc {
            Self::desc(field)
        } else {
            Self::asc(field)
        }
    }
}

/// Supported page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            50 => Ok(PageSize::Fifty),
            other => Err(format!(
                "page size must be one of 10, 25, 50 (got {})",
                other
            )),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// 1-based page number plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: PageSize,
}

impl PageRequest {
    pub fn new(page: usize, size: PageSize) -> Self {
        Self { page, size }
    }

    /// First page at the given size
    pub fn first(size: PageSize) -> Self {
        Self { page: 1, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_evaluation() {
        assert!(CompareOp::Gt.evaluate(5.0, 4.0));
        assert!(!CompareOp::Gt.evaluate(4.0, 4.0));
        assert!(CompareOp::Gte.evaluate(4.0, 4.0));
        assert!(CompareOp::Lt.evaluate(-1.0, 0.0));
        assert!(CompareOp::Lte.evaluate(0.0, 0.0));
        assert!(CompareOp::Eq.evaluate(15.0, 15.0));
    }

    #[test]
    fn test_equality_is_exact() {
        // 0.1 + 0.2 is not bit-equal to 0.3
        assert!(!CompareOp::Eq.evaluate(0.1 + 0.2, 0.3));
    }

    #[test]
    fn test_condition_display_uses_primary_alias() {
        let cond = Condition::lt(Metric::PERatio, 15.0);
        assert_eq!(cond.to_string(), "P/E Ratio < 15");

        let cond = Condition::gte(Metric::MarketCapB, -2.5);
        assert_eq!(cond.to_string(), "Market Capitalization >= -2.5");
    }

    #[test]
    fn test_parsed_query_rejects_empty() {
        assert!(ParsedQuery::new(Vec::new()).is_none());
        let q = ParsedQuery::new(vec![Condition::gt(Metric::ROEPercent, 22.0)]).unwrap();
        assert_eq!(q.conditions().len(), 1);
    }

    #[test]
    fn test_sort_toggle() {
        let none = SortSpec::none();
        let first = none.toggled(Metric::PERatio);
        assert_eq!(first, SortSpec::asc(Metric::PERatio));

        let second = first.toggled(Metric::PERatio);
        assert_eq!(second, SortSpec::desc(Metric::PERatio));

        // Back to ascending on the third click
        assert_eq!(second.toggled(Metric::PERatio), SortSpec::asc(Metric::PERatio));

        // A new field always starts ascending
        assert_eq!(second.toggled(Metric::ROEPercent), SortSpec::asc(Metric::ROEPercent));
    }

    #[test]
    fn test_page_size_conversion() {
        assert_eq!(PageSize::try_from(25), Ok(PageSize::TwentyFive));
        assert!(PageSize::try_from(20).is_err());
        assert_eq!(usize::from(PageSize::Fifty), 50);
    }

    #[test]
    fn test_page_size_serde() {
        let size: PageSize = serde_json::from_str("50").unwrap();
        assert_eq!(size, PageSize::Fifty);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
        assert_eq!(serde_json::to_string(&PageSize::Ten).unwrap(), "10");
    }
}
