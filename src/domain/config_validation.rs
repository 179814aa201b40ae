//! Configuration validation.
//!
//! Checks the `[data]`, `[tickers]`, `[logging]` and `[display]` sections
//! before a session is opened.

use crate::domain::error::PairviewError;
use crate::domain::session::{parse_log_level, LOG_LEVELS};
use crate::domain::tickers::{parse_tickers, DEFAULT_TICKER1, DEFAULT_TICKER2, DEFAULT_TICKERS};
use crate::ports::config_port::ConfigPort;

pub const MAX_PRECISION: i64 = 12;

/// Full check, including the configured `ticker1`/`ticker2` pair.
pub fn validate_session_config(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    validate_session_settings(config)?;
    validate_tickers(config)
}

/// Everything but the configured pair, for sessions whose pair is overridden.
pub fn validate_session_settings(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    validate_data_dir(config)?;
    configured_symbols(config)?;
    validate_log_level(config)?;
    validate_precision(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(PairviewError::ConfigInvalid {
            section: "data".to_string(),
            key: "dir".to_string(),
            reason: "dir must not be empty".to_string(),
        }),
        None => Err(PairviewError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

/// Symbol list from `[tickers] symbols`, or the built-in defaults.
pub fn configured_symbols(config: &dyn ConfigPort) -> Result<Vec<String>, PairviewError> {
    match config.get_string("tickers", "symbols") {
        Some(s) => parse_tickers(&s).map_err(|e| PairviewError::ConfigInvalid {
            section: "tickers".to_string(),
            key: "symbols".to_string(),
            reason: e.to_string(),
        }),
        None => Ok(DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect()),
    }
}

/// `(ticker1, ticker2)` from `[tickers]`, upper-cased, or the defaults.
pub fn configured_pair(config: &dyn ConfigPort) -> (String, String) {
    let ticker1 = config
        .get_string("tickers", "ticker1")
        .unwrap_or_else(|| DEFAULT_TICKER1.to_string());
    let ticker2 = config
        .get_string("tickers", "ticker2")
        .unwrap_or_else(|| DEFAULT_TICKER2.to_string());
    (ticker1.trim().to_uppercase(), ticker2.trim().to_uppercase())
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    let symbols = configured_symbols(config)?;
    let (ticker1, ticker2) = configured_pair(config);

    if ticker1 == ticker2 {
        return Err(PairviewError::ConfigInvalid {
            section: "tickers".to_string(),
            key: "ticker2".to_string(),
            reason: "ticker2 must differ from ticker1".to_string(),
        });
    }
    for (key, ticker) in [("ticker1", &ticker1), ("ticker2", &ticker2)] {
        if !symbols.contains(ticker) {
            return Err(PairviewError::ConfigInvalid {
                section: "tickers".to_string(),
                key: key.to_string(),
                reason: format!("{} is not listed in symbols", ticker),
            });
        }
    }
    Ok(())
}

fn validate_log_level(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    match config.get_string("logging", "level") {
        Some(level) if parse_log_level(&level).is_none() => Err(PairviewError::ConfigInvalid {
            section: "logging".to_string(),
            key: "level".to_string(),
            reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
        }),
        _ => Ok(()),
    }
}

fn validate_precision(config: &dyn ConfigPort) -> Result<(), PairviewError> {
    let Some(raw) = config.get_string("display", "precision") else {
        return Ok(());
    };
    let in_range = raw
        .trim()
        .parse::<i64>()
        .is_ok_and(|value| (0..=MAX_PRECISION).contains(&value));
    if !in_range {
        return Err(PairviewError::ConfigInvalid {
            section: "display".to_string(),
            key: "precision".to_string(),
            reason: format!("precision must be an integer between 0 and {}", MAX_PRECISION),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn minimal_config_is_valid() {
        assert!(validate_session_config(&config("[data]\ndir = /data\n")).is_ok());
    }

    #[test]
    fn missing_data_dir() {
        let result = validate_session_config(&config("[tickers]\nticker1 = AAPL\n"));
        assert!(matches!(
            result,
            Err(PairviewError::ConfigMissing { section, key }) if section == "data" && key == "dir"
        ));
    }

    #[test]
    fn blank_data_dir() {
        let result = validate_session_config(&config("[data]\ndir =   \n"));
        assert!(matches!(result, Err(PairviewError::ConfigInvalid { .. })));
    }

    #[test]
    fn identical_pair_rejected() {
        let c = config("[data]\ndir = /d\n[tickers]\nticker1 = goog\nticker2 = GOOG\n");
        assert!(matches!(
            validate_session_config(&c),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "ticker2"
        ));
    }

    #[test]
    fn pair_must_be_listed() {
        let c = config("[data]\ndir = /d\n[tickers]\nsymbols = AAPL,INTC\n");
        // Default ticker2 is GOOG, which is not in the list.
        assert!(matches!(
            validate_session_config(&c),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "ticker2"
        ));
    }

    #[test]
    fn bad_symbol_list() {
        let c = config("[data]\ndir = /d\n[tickers]\nsymbols = AAPL,,GOOG\n");
        assert!(matches!(
            validate_session_config(&c),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "symbols"
        ));
    }

    #[test]
    fn bad_log_level() {
        let c = config("[data]\ndir = /d\n[logging]\nlevel = loud\n");
        assert!(matches!(
            validate_session_config(&c),
            Err(PairviewError::ConfigInvalid { section, .. }) if section == "logging"
        ));
    }

    #[test]
    fn precision_out_of_range() {
        let c = config("[data]\ndir = /d\n[display]\nprecision = 40\n");
        assert!(matches!(
            validate_session_config(&c),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "precision"
        ));
    }

    #[test]
    fn settings_skip_the_configured_pair() {
        let c = config("[data]\ndir = /d\n[tickers]\nticker1 = AAPL\nticker2 = AAPL\n");
        assert!(validate_session_config(&c).is_err());
        assert!(validate_session_settings(&c).is_ok());
    }

    #[test]
    fn settings_still_check_symbols_and_precision() {
        let bad_symbols = config("[data]\ndir = /d\n[tickers]\nsymbols = AAPL\n");
        assert!(matches!(
            validate_session_settings(&bad_symbols),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "symbols"
        ));

        let bad_precision = config("[data]\ndir = /d\n[display]\nprecision = -1\n");
        assert!(matches!(
            validate_session_settings(&bad_precision),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "precision"
        ));
    }

    #[test]
    fn configured_pair_defaults_and_overrides() {
        assert_eq!(
            configured_pair(&config("[data]\ndir = /d\n")),
            ("AAPL".to_string(), "GOOG".to_string())
        );
        assert_eq!(
            configured_pair(&config("[tickers]\nticker1 = intc\nticker2 = yhoo\n")),
            ("INTC".to_string(), "YHOO".to_string())
        );
    }
}
