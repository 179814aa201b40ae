//! Closing price series and derived returns.

use crate::domain::error::PairviewError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Date-ordered closing prices for one ticker.
///
/// `returns[i] = close[i] - close[i - 1]`; the first entry has no return.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
    pub returns: Vec<Option<f64>>,
}

impl TickerSeries {
    /// Sorts `points` by date and derives the return series.
    ///
    /// Two points on the same date are rejected.
    pub fn new(ticker: &str, mut points: Vec<PricePoint>) -> Result<Self, PairviewError> {
        points.sort_by_key(|p| p.date);

        if let Some(w) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(PairviewError::DataSource {
                reason: format!("duplicate date {} in series for {}", w[0].date, ticker),
            });
        }

        let returns = std::iter::once(None)
            .chain(points.windows(2).map(|w| Some(w[1].close - w[0].close)))
            .take(points.len())
            .collect();

        Ok(Self {
            ticker: ticker.to_string(),
            points,
            returns,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
