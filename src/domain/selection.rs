//! Selection state for the linked pair view.
//!
//! The controller owns the active ticker pair and the optional row selection.
//! Every mutating call validates and recomputes on local values first and only
//! then commits, so a failed call leaves [`SelectionController::current_view`]
//! exactly as it was.

use crate::domain::error::PairviewError;
use crate::domain::pair_dataset::{PairDataset, PairDatasetBuilder, PairRow};
use crate::domain::statistics::SummaryStatistics;
use crate::domain::tickers::TickerUniverse;
use crate::ports::price_port::PricePort;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Unfiltered,
    /// Ascending, de-duplicated row indices into the current dataset.
    Filtered(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLabels {
    pub correlation: String,
    pub series1: String,
    pub series2: String,
}

impl TitleLabels {
    pub fn new(ticker1: &str, ticker2: &str) -> Self {
        Self {
            correlation: format!("{} returns vs. {} returns", ticker1, ticker2),
            series1: ticker1.to_string(),
            series2: ticker2.to_string(),
        }
    }
}

/// Everything the view needs to redraw.
///
/// `dataset` always holds the full pair dataset (the time-series lines do not
/// change on a range selection); `rows` and `stats` reflect the selection.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub dataset: &'a PairDataset,
    pub rows: Vec<&'a PairRow>,
    pub stats: &'a SummaryStatistics,
    pub labels: &'a TitleLabels,
    pub selection: Option<&'a [usize]>,
}

pub struct SelectionController<P> {
    builder: Arc<PairDatasetBuilder<P>>,
    universe: TickerUniverse,
    ticker1: String,
    ticker2: String,
    dataset: Arc<PairDataset>,
    state: SelectionState,
    stats: SummaryStatistics,
    labels: TitleLabels,
}

impl<P: PricePort> SelectionController<P> {
    /// Loads the universe's initial pair.
    pub fn new(
        builder: Arc<PairDatasetBuilder<P>>,
        universe: TickerUniverse,
    ) -> Result<Self, PairviewError> {
        check_distinct(&universe.ticker1, &universe.ticker2)?;
        let dataset = builder.get(&universe.ticker1, &universe.ticker2)?;
        let stats = SummaryStatistics::compute(&universe.ticker1, &universe.ticker2, &dataset.rows);

        Ok(Self {
            labels: TitleLabels::new(&universe.ticker1, &universe.ticker2),
            ticker1: universe.ticker1.clone(),
            ticker2: universe.ticker2.clone(),
            builder,
            universe,
            dataset,
            state: SelectionState::Unfiltered,
            stats,
        })
    }

    /// Switches to a new ticker pair and clears any row selection.
    pub fn set_pair(&mut self, ticker1: &str, ticker2: &str) -> Result<(), PairviewError> {
        check_distinct(ticker1, ticker2)?;
        let dataset = self.builder.get(ticker1, ticker2)?;
        let stats = SummaryStatistics::compute(ticker1, ticker2, &dataset.rows);

        tracing::info!(ticker1, ticker2, rows = dataset.len(), "pair selected");
        self.ticker1 = ticker1.to_string();
        self.ticker2 = ticker2.to_string();
        self.labels = TitleLabels::new(ticker1, ticker2);
        self.dataset = dataset;
        self.state = SelectionState::Unfiltered;
        self.stats = stats;
        Ok(())
    }

    /// Restricts statistics to the given rows. An empty slice clears the
    /// selection. Order and repeats in `indices` do not matter.
    pub fn set_row_selection(&mut self, indices: &[usize]) -> Result<(), PairviewError> {
        let len = self.dataset.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(PairviewError::invalid_selection(format!(
                "row index {} out of range for {} rows",
                bad, len
            )));
        }

        let (state, stats) = if indices.is_empty() {
            let stats = SummaryStatistics::compute(&self.ticker1, &self.ticker2, &self.dataset.rows);
            (SelectionState::Unfiltered, stats)
        } else {
            let mut selected = indices.to_vec();
            selected.sort_unstable();
            selected.dedup();
            let stats = SummaryStatistics::compute(
                &self.ticker1,
                &self.ticker2,
                selected.iter().map(|&i| &self.dataset.rows[i]),
            );
            (SelectionState::Filtered(selected), stats)
        };

        tracing::info!(
            ticker1 = %self.ticker1,
            ticker2 = %self.ticker2,
            selected = stats.count(),
            "row selection changed"
        );
        self.state = state;
        self.stats = stats;
        Ok(())
    }

    pub fn clear_row_selection(&mut self) -> Result<(), PairviewError> {
        self.set_row_selection(&[])
    }

    pub fn current_view(&self) -> View<'_> {
        let (rows, selection) = match &self.state {
            SelectionState::Unfiltered => (self.dataset.rows.iter().collect(), None),
            SelectionState::Filtered(indices) => (
                indices.iter().map(|&i| &self.dataset.rows[i]).collect(),
                Some(indices.as_slice()),
            ),
        };

        View {
            dataset: &self.dataset,
            rows,
            stats: &self.stats,
            labels: &self.labels,
            selection,
        }
    }

    pub fn ticker1(&self) -> &str {
        &self.ticker1
    }

    pub fn ticker2(&self) -> &str {
        &self.ticker2
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Choices for the first picker: everything but the active second ticker.
    pub fn ticker1_options(&self) -> Vec<String> {
        self.universe.options_excluding(&self.ticker2)
    }

    /// Choices for the second picker: everything but the active first ticker.
    pub fn ticker2_options(&self) -> Vec<String> {
        self.universe.options_excluding(&self.ticker1)
    }
}

fn check_distinct(ticker1: &str, ticker2: &str) -> Result<(), PairviewError> {
    if ticker1 == ticker2 {
        return Err(PairviewError::invalid_selection(format!(
            "ticker1 and ticker2 must differ (both {})",
            ticker1
        )));
    }
    Ok(())
}
