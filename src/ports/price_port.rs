//! Price data access port trait.

use crate::domain::error::PairviewError;
use crate::domain::price::PricePoint;

pub trait PricePort {
    /// Closing prices for `ticker`. Unknown tickers fail with
    /// [`PairviewError::DataNotFound`].
    fn lookup(&self, ticker: &str) -> Result<Vec<PricePoint>, PairviewError>;

    fn list_tickers(&self) -> Result<Vec<String>, PairviewError>;
}
