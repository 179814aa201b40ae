//! Resolved settings for one pair-view session.

use crate::domain::statistics::DEFAULT_PRECISION;
use crate::domain::tickers::TickerUniverse;
use std::path::PathBuf;
use tracing::Level;

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub universe: TickerUniverse,
    pub precision: usize,
    pub log_level: Option<Level>,
}

impl SessionConfig {
    pub fn new(data_dir: PathBuf, universe: TickerUniverse) -> Self {
        Self {
            data_dir,
            universe,
            precision: DEFAULT_PRECISION,
            log_level: None,
        }
    }
}

pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
