//! Compute-once cache of ticker series over a [`PricePort`].
//!
//! The backing data is treated as immutable for the life of the process, so
//! entries are never evicted or replaced. The cache lock is held while a
//! missing ticker is fetched, which keeps population to a single lookup per
//! ticker even with concurrent first access.

use crate::domain::error::PairviewError;
use crate::domain::price::TickerSeries;
use crate::ports::price_port::PricePort;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TickerStore<P> {
    port: P,
    cache: Mutex<HashMap<String, Arc<TickerSeries>>>,
}

impl<P: PricePort> TickerStore<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, ticker: &str) -> Result<Arc<TickerSeries>, PairviewError> {
        let mut cache = self.lock();
        if let Some(series) = cache.get(ticker) {
            tracing::debug!(ticker, "ticker cache hit");
            return Ok(Arc::clone(series));
        }

        tracing::debug!(ticker, "ticker cache miss, loading");
        let points = self.port.lookup(ticker)?;
        let series = Arc::new(TickerSeries::new(ticker, points)?);
        cache.insert(ticker.to_string(), Arc::clone(&series));
        tracing::debug!(ticker, points = series.len(), "ticker cached");
        Ok(series)
    }

    /// Tickers currently held in the cache, sorted.
    pub fn cached_tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.lock().keys().cloned().collect();
        tickers.sort();
        tickers
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<TickerSeries>>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
