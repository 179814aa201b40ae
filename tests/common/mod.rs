#![allow(dead_code)]

use chrono::NaiveDate;
use pairview::domain::error::PairviewError;
use pairview::domain::pair_dataset::PairDatasetBuilder;
use pairview::domain::price::PricePoint;
use pairview::domain::selection::SelectionController;
use pairview::domain::statistics::SummaryStatistics;
use pairview::domain::ticker_store::TickerStore;
use pairview::domain::tickers::TickerUniverse;
use pairview::ports::price_port::PricePort;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub lookups: AtomicUsize,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_points(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), points);
        self
    }

    pub fn with_closes(self, ticker: &str, start_date: &str, closes: &[f64]) -> Self {
        self.with_points(ticker, make_points(start_date, closes))
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl PricePort for MockPricePort {
    fn lookup(&self, ticker: &str) -> Result<Vec<PricePoint>, PairviewError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.errors.get(ticker) {
            return Err(PairviewError::DataSource {
                reason: reason.clone(),
            });
        }
        self.data
            .get(ticker)
            .cloned()
            .ok_or_else(|| PairviewError::DataNotFound {
                ticker: ticker.to_string(),
            })
    }

    fn list_tickers(&self) -> Result<Vec<String>, PairviewError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One point per consecutive day starting at `start_date`.
pub fn make_points(start_date: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + chrono::Duration::days(i as i64), close))
        .collect()
}

pub const AAPL: [f64; 5] = [100.0, 102.0, 101.0, 105.0, 107.0];
pub const GOOG: [f64; 5] = [200.0, 198.0, 199.0, 205.0, 210.0];

/// AAPL and GOOG over five consecutive days, plus a shorter INTC series.
pub fn sample_port() -> MockPricePort {
    MockPricePort::new()
        .with_closes("AAPL", "2024-01-01", &AAPL)
        .with_closes("GOOG", "2024-01-01", &GOOG)
        .with_closes("INTC", "2024-01-03", &[30.0, 31.5, 29.0, 33.0])
}

pub fn builder(port: MockPricePort) -> Arc<PairDatasetBuilder<MockPricePort>> {
    Arc::new(PairDatasetBuilder::new(TickerStore::new(port)))
}

pub fn sample_controller() -> (
    Arc<PairDatasetBuilder<MockPricePort>>,
    SelectionController<MockPricePort>,
) {
    let builder = builder(sample_port());
    let controller = SelectionController::new(Arc::clone(&builder), TickerUniverse::default())
        .unwrap();
    (builder, controller)
}

/// Field-by-field equality where NaN matches NaN (a single-row std is NaN).
pub fn same_stats(a: &SummaryStatistics, b: &SummaryStatistics) -> bool {
    let same = |x: f64, y: f64| x == y || (x.is_nan() && y.is_nan());
    a.columns.iter().zip(&b.columns).all(|(x, y)| {
        x.label == y.label
            && x.count == y.count
            && same(x.mean, y.mean)
            && same(x.std, y.std)
            && same(x.min, y.min)
            && same(x.q25, y.q25)
            && same(x.q50, y.q50)
            && same(x.q75, y.q75)
            && same(x.max, y.max)
    })
}
