//! CSV file price adapter.
//!
//! Reads daily bar files named `table_<ticker>.csv` (lower-case ticker) with no
//! header row and the column layout `date,time,open,high,low,close,volume`.

use crate::domain::error::PairviewError;
use crate::domain::price::PricePoint;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const FILE_PREFIX: &str = "table_";
const FILE_SUFFIX: &str = ".csv";
const DATE_COLUMN: usize = 0;
const CLOSE_COLUMN: usize = 5;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path
            .join(format!("{}{}{}", FILE_PREFIX, ticker.to_lowercase(), FILE_SUFFIX))
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

impl PricePort for CsvAdapter {
    fn lookup(&self, ticker: &str) -> Result<Vec<PricePoint>, PairviewError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PairviewError::DataNotFound {
                ticker: ticker.to_string(),
            },
            _ => PairviewError::DataSource {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| PairviewError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(DATE_COLUMN).ok_or_else(|| PairviewError::DataSource {
                reason: format!("{} line {}: missing date column", path.display(), line + 1),
            })?;
            let date = parse_date(date_str).ok_or_else(|| PairviewError::DataSource {
                reason: format!(
                    "{} line {}: invalid date {:?}",
                    path.display(),
                    line + 1,
                    date_str
                ),
            })?;

            let close: f64 = record
                .get(CLOSE_COLUMN)
                .ok_or_else(|| PairviewError::DataSource {
                    reason: format!("{} line {}: missing close column", path.display(), line + 1),
                })?
                .trim()
                .parse()
                .map_err(|e| PairviewError::DataSource {
                    reason: format!("{} line {}: invalid close value: {}", path.display(), line + 1, e),
                })?;

            points.push(PricePoint::new(date, close));
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    fn list_tickers(&self) -> Result<Vec<String>, PairviewError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PairviewError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| PairviewError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
                .filter(|t| !t.is_empty())
            {
                tickers.push(ticker.to_uppercase());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
