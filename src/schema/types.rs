//! Record schema for the screener
//!
//! The record layout is fixed: one identifier column (`Ticker`) and nine
//! numeric measurement columns. Fields are split by capability so that only
//! numeric fields can reach comparison and ordering code.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Numeric measurement columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    MarketCapB,
    PERatio,
    ROEPercent,
    DebtToEquity,
    DividendYieldPercent,
    RevenueGrowthPercent,
    EPSGrowthPercent,
    CurrentRatio,
    GrossMarginPercent,
}

impl Metric {
    /// All metrics in dataset column order
    pub const ALL: [Metric; 9] = [
        Metric::MarketCapB,
        Metric::PERatio,
        Metric::ROEPercent,
        Metric::DebtToEquity,
        Metric::DividendYieldPercent,
        Metric::RevenueGrowthPercent,
        Metric::EPSGrowthPercent,
        Metric::CurrentRatio,
        Metric::GrossMarginPercent,
    ];

    /// Canonical identifier
    pub fn canonical(&self) -> &'static str {
        match self {
            Metric::MarketCapB => "MarketCapB",
            Metric::PERatio => "PERatio",
            Metric::ROEPercent => "ROEPercent",
            Metric::DebtToEquity => "DebtToEquity",
            Metric::DividendYieldPercent => "DividendYieldPercent",
            Metric::RevenueGrowthPercent => "RevenueGrowthPercent",
            Metric::EPSGrowthPercent => "EPSGrowthPercent",
            Metric::CurrentRatio => "CurrentRatio",
            Metric::GrossMarginPercent => "GrossMarginPercent",
        }
    }

    /// Column name used by the dataset file
    pub fn column(&self) -> &'static str {
        match self {
            Metric::MarketCapB => "Market Capitalization (B)",
            Metric::PERatio => "P/E Ratio",
            Metric::ROEPercent => "ROE (%)",
            Metric::DebtToEquity => "Debt-to-Equity Ratio",
            Metric::DividendYieldPercent => "Dividend Yield (%)",
            Metric::RevenueGrowthPercent => "Revenue Growth (%)",
            Metric::EPSGrowthPercent => "EPS Growth (%)",
            Metric::CurrentRatio => "Current Ratio",
            Metric::GrossMarginPercent => "Gross Margin (%)",
        }
    }

    /// Short header label for tabular output
    pub fn label(&self) -> &'static str {
        match self {
            Metric::MarketCapB => "Market Cap (B)",
            Metric::PERatio => "P/E",
            Metric::ROEPercent => "ROE %",
            Metric::DebtToEquity => "D/E",
            Metric::DividendYieldPercent => "Div Yield %",
            Metric::RevenueGrowthPercent => "Rev Growth %",
            Metric::EPSGrowthPercent => "EPS Growth %",
            Metric::CurrentRatio => "Current Ratio",
            Metric::GrossMarginPercent => "Gross Margin %",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Any field of a record, by capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ticker,
    Metric(Metric),
}

impl Field {
    /// Returns the metric for numeric fields
    pub fn as_metric(&self) -> Option<Metric> {
        match self {
            Field::Ticker => None,
            Field::Metric(m) => Some(*m),
        }
    }

    /// Canonical identifier
    pub fn canonical(&self) -> &'static str {
        match self {
            Field::Ticker => "Ticker",
            Field::Metric(m) => m.canonical(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for Field {
    type Err = String;

    /// Parses a canonical field identifier (not an alias)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Ticker" {
            return Ok(Field::Ticker);
        }
        Metric::ALL
            .iter()
            .find(|m| m.canonical() == s)
            .map(|m| Field::Metric(*m))
            .ok_or_else(|| format!("unknown field identifier '{}'", s))
    }
}

/// One row of the stock dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Market Capitalization (B)", deserialize_with = "numeric")]
    pub market_cap_b: f64,
    #[serde(rename = "P/E Ratio", deserialize_with = "numeric")]
    pub pe_ratio: f64,
    #[serde(rename = "ROE (%)", deserialize_with = "numeric")]
    pub roe_percent: f64,
    #[serde(rename = "Debt-to-Equity Ratio", deserialize_with = "numeric")]
    pub debt_to_equity: f64,
    #[serde(rename = "Dividend Yield (%)", deserialize_with = "numeric")]
    pub dividend_yield_percent: f64,
    #[serde(rename = "Revenue Growth (%)", deserialize_with = "numeric")]
    pub revenue_growth_percent: f64,
    #[serde(rename = "EPS Growth (%)", deserialize_with = "numeric")]
    pub eps_growth_percent: f64,
    #[serde(rename = "Current Ratio", deserialize_with = "numeric")]
    pub current_ratio: f64,
    #[serde(rename = "Gross Margin (%)", deserialize_with = "numeric")]
    pub gross_margin_percent: f64,
}

impl StockRecord {
    /// Creates a record with every metric at zero
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            market_cap_b: 0.0,
            pe_ratio: 0.0,
            roe_percent: 0.0,
            debt_to_equity: 0.0,
            dividend_yield_percent: 0.0,
            revenue_growth_percent: 0.0,
            eps_growth_percent: 0.0,
            current_ratio: 0.0,
            gross_margin_percent: 0.0,
        }
    }

    /// Sets one metric
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        *self.metric_mut(metric) = value;
        self
    }

    /// Reads a metric value
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::MarketCapB => self.market_cap_b,
            Metric::PERatio => self.pe_ratio,
            Metric::ROEPercent => self.roe_percent,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::DividendYieldPercent => self.dividend_yield_percent,
            Metric::RevenueGrowthPercent => self.revenue_growth_percent,
            Metric::EPSGrowthPercent => self.eps_growth_percent,
            Metric::CurrentRatio => self.current_ratio,
            Metric::GrossMarginPercent => self.gross_margin_percent,
        }
    }

    fn metric_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::MarketCapB => &mut self.market_cap_b,
            Metric::PERatio => &mut self.pe_ratio,
            Metric::ROEPercent => &mut self.roe_percent,
            Metric::DebtToEquity => &mut self.debt_to_equity,
            Metric::DividendYieldPercent => &mut self.dividend_yield_percent,
            Metric::RevenueGrowthPercent => &mut self.revenue_growth_percent,
            Metric::EPSGrowthPercent => &mut self.eps_growth_percent,
            Metric::CurrentRatio => &mut self.current_ratio,
            Metric::GrossMarginPercent => &mut self.gross_margin_percent,
        }
    }

    /// Returns the first metric holding a NaN or infinite value
    pub fn first_non_finite(&self) -> Option<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| !self.metric(*m).is_finite())
    }
}

/// Numeric column as stored in the dataset: a number or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Number(f64),
    Text(String),
}

fn numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumericRepr::deserialize(deserializer)? {
        NumericRepr::Number(n) => Ok(n),
        NumericRepr::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("'{}' is not a number", s))),
    }
}
