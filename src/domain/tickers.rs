//! Ticker universe: the symbols offered to the two ticker pickers.
//!
//! Each picker lists the universe minus the ticker active in the other picker,
//! which keeps the two sides of a pair distinct.

use crate::domain::error::PairviewError;
use std::collections::HashSet;

pub const DEFAULT_TICKERS: [&str; 5] = ["AAPL", "GOOG", "INTC", "BRCM", "YHOO"];
pub const DEFAULT_TICKER1: &str = "AAPL";
pub const DEFAULT_TICKER2: &str = "GOOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerUniverse {
    pub symbols: Vec<String>,
    pub ticker1: String,
    pub ticker2: String,
}

impl Default for TickerUniverse {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            ticker1: DEFAULT_TICKER1.to_string(),
            ticker2: DEFAULT_TICKER2.to_string(),
        }
    }
}

impl TickerUniverse {
    /// Builds a universe, checking that both initial tickers are listed and
    /// differ.
    pub fn new(
        symbols: Vec<String>,
        ticker1: &str,
        ticker2: &str,
    ) -> Result<Self, PairviewError> {
        let ticker1 = ticker1.trim().to_uppercase();
        let ticker2 = ticker2.trim().to_uppercase();

        if ticker1 == ticker2 {
            return Err(PairviewError::invalid_selection(format!(
                "ticker1 and ticker2 must differ (both {})",
                ticker1
            )));
        }
        for t in [&ticker1, &ticker2] {
            if !symbols.contains(t) {
                return Err(PairviewError::invalid_selection(format!(
                    "{} is not in the ticker list {}",
                    t,
                    symbols.join(",")
                )));
            }
        }

        Ok(Self {
            symbols,
            ticker1,
            ticker2,
        })
    }

    /// The universe minus `ticker`, in universe order.
    pub fn options_excluding(&self, ticker: &str) -> Vec<String> {
        self.symbols
            .iter()
            .filter(|s| s.as_str() != ticker)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("ticker list needs at least two symbols")]
    TooFew,
}

/// Parses a comma-separated ticker list, upper-casing each symbol.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, TickerListError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    if tickers.len() < 2 {
        return Err(TickerListError::TooFew);
    }
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tickers_basic() {
        let result = parse_tickers("  aapl , GOOG,intc ").unwrap();
        assert_eq!(result, vec!["AAPL", "GOOG", "INTC"]);
    }

    #[test]
    fn parse_tickers_rejects_empty_token() {
        assert_eq!(parse_tickers("AAPL,,GOOG"), Err(TickerListError::EmptyToken));
    }

    #[test]
    fn parse_tickers_rejects_duplicate() {
        assert_eq!(
            parse_tickers("AAPL,GOOG,aapl"),
            Err(TickerListError::DuplicateTicker("AAPL".into()))
        );
    }

    #[test]
    fn parse_tickers_needs_two() {
        assert_eq!(parse_tickers("AAPL"), Err(TickerListError::TooFew));
    }

    #[test]
    fn default_universe() {
        let universe = TickerUniverse::default();
        assert_eq!(universe.symbols.len(), 5);
        assert_eq!(universe.ticker1, "AAPL");
        assert_eq!(universe.ticker2, "GOOG");
    }

    #[test]
    fn options_exclude_other_ticker() {
        let universe = TickerUniverse::default();
        assert_eq!(
            universe.options_excluding("GOOG"),
            vec!["AAPL", "INTC", "BRCM", "YHOO"]
        );
        assert_eq!(universe.options_excluding("XYZ").len(), 5);
    }

    #[test]
    fn new_rejects_identical_tickers() {
        let symbols = parse_tickers("AAPL,GOOG").unwrap();
        let result = TickerUniverse::new(symbols, "aapl", "AAPL");
        assert!(matches!(result, Err(PairviewError::InvalidSelection { .. })));
    }

    #[test]
    fn new_rejects_unlisted_ticker() {
        let symbols = parse_tickers("AAPL,GOOG").unwrap();
        let result = TickerUniverse::new(symbols, "AAPL", "MSFT");
        assert!(matches!(result, Err(PairviewError::InvalidSelection { reason }) if reason.contains("MSFT")));
    }
}
