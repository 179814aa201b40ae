//! Descriptive statistics over pair dataset rows.
//!
//! Per column: count, mean, sample standard deviation (n - 1), min, quartiles
//! by linear interpolation between closest ranks, and max. Every statistic but
//! the count is NaN on an empty column; the standard deviation is also NaN for
//! a single value.

use crate::domain::pair_dataset::PairRow;
use std::fmt;

pub const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn compute(label: &str, values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                label: label.to_string(),
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        };

        Self {
            label: label.to_string(),
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.50),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    fn values(&self) -> [f64; 7] {
        [
            self.mean, self.std, self.min, self.q25, self.q50, self.q75, self.max,
        ]
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Statistics for the four numeric pair columns, in the order price1, price2,
/// return1, return2.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub columns: [ColumnStats; 4],
}

impl SummaryStatistics {
    pub fn compute<'a, I>(ticker1: &str, ticker2: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a PairRow>,
    {
        let mut price1 = Vec::new();
        let mut price2 = Vec::new();
        let mut return1 = Vec::new();
        let mut return2 = Vec::new();

        for row in rows {
            price1.push(row.price1);
            price2.push(row.price2);
            return1.push(row.return1);
            return2.push(row.return2);
        }

        let [l1, l2, l3, l4] = column_labels(ticker1, ticker2);
        Self {
            columns: [
                ColumnStats::compute(&l1, &price1),
                ColumnStats::compute(&l2, &price2),
                ColumnStats::compute(&l3, &return1),
                ColumnStats::compute(&l4, &return2),
            ],
        }
    }

    pub fn count(&self) -> usize {
        self.columns[0].count
    }

    /// Renders the statistics as a table: one row per statistic, one column
    /// per series.
    pub fn to_table(&self, precision: usize) -> String {
        const ROW_NAMES: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                std::iter::once(format!("{:.*}", precision, c.count as f64))
                    .chain(c.values().into_iter().map(|v| format_cell(v, precision)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, col)| {
                col.iter()
                    .map(String::len)
                    .chain(std::iter::once(c.label.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let name_width = ROW_NAMES.iter().map(|n| n.len()).max().unwrap_or(0);

        let mut out = " ".repeat(name_width);
        for (c, w) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", c.label, w = w));
        }
        out.push('\n');

        for (i, name) in ROW_NAMES.iter().enumerate() {
            out.push_str(&format!("{:<w$}", name, w = name_width));
            for (col, w) in cells.iter().zip(&widths) {
                out.push_str(&format!("  {:>w$}", col[i], w = w));
            }
            out.push('\n');
        }
        out
    }
}

/// Formats as [`SummaryStatistics::to_table`]; `{:.N}` sets the precision.
impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table(f.precision().unwrap_or(DEFAULT_PRECISION)))
    }
}

fn format_cell(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Column labels for an ordered ticker pair.
pub fn column_labels(ticker1: &str, ticker2: &str) -> [String; 4] {
    [
        ticker1.to_string(),
        ticker2.to_string(),
        format!("{}_returns", ticker1),
        format!("{}_returns", ticker2),
    ]
}
