//! Field alias resolution
//!
//! Maps user-facing attribute names ("PE", "Market Cap", ...) to metrics.
//! Lookup is exact and case-sensitive; only surrounding whitespace is
//! ignored.

use super::types::{Field, Metric};

/// Alias table in display order. Many aliases may name the same metric.
pub const ALIASES: &[(&str, Metric)] = &[
    ("Market Capitalization", Metric::MarketCapB),
    ("Market Cap", Metric::MarketCapB),
    ("P/E Ratio", Metric::PERatio),
    ("PE Ratio", Metric::PERatio),
    ("PE", Metric::PERatio),
    ("ROE", Metric::ROEPercent),
    ("Return on Equity", Metric::ROEPercent),
    ("Debt-to-Equity Ratio", Metric::DebtToEquity),
    ("D/E Ratio", Metric::DebtToEquity),
    ("Dividend Yield", Metric::DividendYieldPercent),
    ("Revenue Growth", Metric::RevenueGrowthPercent),
    ("EPS Growth", Metric::EPSGrowthPercent),
    ("Current Ratio", Metric::CurrentRatio),
    ("Gross Margin", Metric::GrossMarginPercent),
];

/// Lookup miss, carrying what the caller needs for an error message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlias {
    /// Alias text as given (trimmed)
    pub alias: String,
    /// Every valid alias, in table order
    pub known: Vec<&'static str>,
}

/// Stateless resolver over [`ALIASES`]
pub struct FieldResolver;

impl FieldResolver {
    /// Resolves an alias to its metric
    pub fn resolve(alias: &str) -> Result<Metric, UnknownAlias> {
        let alias = alias.trim();
        ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, metric)| *metric)
            .ok_or_else(|| UnknownAlias {
                alias: alias.to_string(),
                known: Self::known_aliases(),
            })
    }

    /// Resolves a sort column name: an alias, a canonical identifier
    /// (`MarketCapB`) or a dataset column (`Market Capitalization (B)`).
    /// `Ticker` is not sortable and resolves to a miss.
    pub fn resolve_column(name: &str) -> Result<Metric, UnknownAlias> {
        let trimmed = name.trim();
        Self::resolve(trimmed).or_else(|miss| {
            trimmed
                .parse::<Field>()
                .ok()
                .and_then(|field| field.as_metric())
                .or_else(|| Metric::ALL.into_iter().find(|m| m.column() == trimmed))
                .ok_or(miss)
        })
    }

    /// All aliases in table order
    pub fn known_aliases() -> Vec<&'static str> {
        ALIASES.iter().map(|(name, _)| *name).collect()
    }

    /// Aliases that resolve to `metric`, in table order
    pub fn aliases_for(metric: Metric) -> Vec<&'static str> {
        ALIASES
            .iter()
            .filter(|(_, m)| *m == metric)
            .map(|(name, _)| *name)
            .collect()
    }

    /// First alias of `metric` in table order
    pub fn primary_alias(metric: Metric) -> &'static str {
        ALIASES
            .iter()
            .find(|(_, m)| *m == metric)
            .map(|(name, _)| *name)
            .unwrap_or_else(|| metric.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact() {
        assert_eq!(FieldResolver::resolve("PE"), Ok(Metric::PERatio));
        assert_eq!(FieldResolver::resolve("P/E Ratio"), Ok(Metric::PERatio));
        assert_eq!(
            FieldResolver::resolve("Market Capitalization"),
            Ok(Metric::MarketCapB)
        );
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        assert_eq!(FieldResolver::resolve("  ROE \t"), Ok(Metric::ROEPercent));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let miss = FieldResolver::resolve("pe").unwrap_err();
        assert_eq!(miss.alias, "pe");
        assert_eq!(miss.known.len(), ALIASES.len());
        assert_eq!(miss.known[0], "Market Capitalization");
    }

    #[test]
    fn test_inner_whitespace_not_normalized() {
        assert!(FieldResolver::resolve("Market  Cap").is_err());
    }

    #[test]
    fn test_resolve_column_accepts_all_spellings() {
        assert_eq!(FieldResolver::resolve_column("Market Cap"), Ok(Metric::MarketCapB));
        assert_eq!(FieldResolver::resolve_column("MarketCapB"), Ok(Metric::MarketCapB));
        assert_eq!(
            FieldResolver::resolve_column("Market Capitalization (B)"),
            Ok(Metric::MarketCapB)
        );
        assert_eq!(FieldResolver::resolve_column(" ROE (%) "), Ok(Metric::ROEPercent));
    }

    #[test]
    fn test_ticker_is_not_a_sort_column() {
        let miss = FieldResolver::resolve_column("Ticker").unwrap_err();
        assert_eq!(miss.alias, "Ticker");
    }

    #[test]
    fn test_every_metric_has_an_alias() {
        for metric in Metric::ALL {
            assert!(
                !FieldResolver::aliases_for(metric).is_empty(),
                "{} has no alias",
                metric
            );
        }
    }

    #[test]
    fn test_primary_alias_round_trips() {
        for metric in Metric::ALL {
            let alias = FieldResolver::primary_alias(metric);
            assert_eq!(FieldResolver::resolve(alias), Ok(metric));
        }
    }
}
