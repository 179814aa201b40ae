//! Core domain types and logic.

pub mod price;
pub mod ticker_store;
pub mod pair_dataset;
pub mod statistics;
pub mod tickers;
pub mod selection;
pub mod events;
pub mod session;
pub mod config_validation;
pub mod error;
