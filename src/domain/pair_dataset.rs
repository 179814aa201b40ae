//! Joined two-ticker datasets.
//!
//! A [`PairDataset`] is the inner join of two ticker series on date, keeping
//! only rows where both prices and both returns are present and finite. A
//! return is the difference from the previous point of the same series, so
//! each series' own first date has none; shared dates where either side has
//! no return are dropped.

use crate::domain::error::PairviewError;
use crate::domain::price::TickerSeries;
use crate::domain::ticker_store::TickerStore;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRow {
    pub date: NaiveDate,
    pub price1: f64,
    pub price2: f64,
    pub return1: f64,
    pub return2: f64,
}

impl PairRow {
    fn is_complete(&self) -> bool {
        self.price1.is_finite()
            && self.price2.is_finite()
            && self.return1.is_finite()
            && self.return2.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairDataset {
    pub ticker1: String,
    pub ticker2: String,
    pub rows: Vec<PairRow>,
}

impl PairDataset {
    /// Merge-joins two date-ordered series.
    pub fn join(series1: &TickerSeries, series2: &TickerSeries) -> Self {
        let mut rows = Vec::with_capacity(series1.len().min(series2.len()));
        let (mut i, mut j) = (0, 0);
        let mut missing_return = 0usize;
        let mut non_finite = 0usize;

        while i < series1.len() && j < series2.len() {
            let (p1, p2) = (&series1.points[i], &series2.points[j]);
            match p1.date.cmp(&p2.date) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    match (series1.returns[i], series2.returns[j]) {
                        (Some(return1), Some(return2)) => {
                            let row = PairRow {
                                date: p1.date,
                                price1: p1.close,
                                price2: p2.close,
                                return1,
                                return2,
                            };
                            if row.is_complete() {
                                rows.push(row);
                            } else {
                                non_finite += 1;
                            }
                        }
                        _ => missing_return += 1,
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        if non_finite > 0 {
            tracing::warn!(
                ticker1 = %series1.ticker,
                ticker2 = %series2.ticker,
                dropped = non_finite,
                "dropped rows with non-finite values from pair dataset"
            );
        }
        tracing::trace!(
            ticker1 = %series1.ticker,
            ticker2 = %series2.ticker,
            missing_return,
            kept = rows.len(),
            "pair join complete"
        );

        Self {
            ticker1: series1.ticker.clone(),
            ticker2: series2.ticker.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

type PairKey = (String, String);

/// Builds pair datasets from a [`TickerStore`] and memoizes them per ordered
/// pair: `(A, B)` and `(B, A)` are separate entries.
pub struct PairDatasetBuilder<P> {
    store: TickerStore<P>,
    cache: Mutex<HashMap<PairKey, Arc<PairDataset>>>,
}

impl<P: PricePort> PairDatasetBuilder<P> {
    pub fn new(store: TickerStore<P>) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, ticker1: &str, ticker2: &str) -> Result<Arc<PairDataset>, PairviewError> {
        let key = (ticker1.to_string(), ticker2.to_string());
        let mut cache = self.lock();
        if let Some(dataset) = cache.get(&key) {
            tracing::debug!(ticker1, ticker2, "pair cache hit");
            return Ok(Arc::clone(dataset));
        }

        let series1 = self.store.get(ticker1)?;
        let series2 = self.store.get(ticker2)?;
        let dataset = Arc::new(PairDataset::join(&series1, &series2));
        tracing::debug!(ticker1, ticker2, rows = dataset.len(), "pair dataset cached");
        cache.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Ordered pairs currently held in the cache, sorted.
    pub fn cached_pairs(&self) -> Vec<PairKey> {
        let mut pairs: Vec<PairKey> = self.lock().keys().cloned().collect();
        pairs.sort();
        pairs
    }

    pub fn store(&self) -> &TickerStore<P> {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PairKey, Arc<PairDataset>>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
