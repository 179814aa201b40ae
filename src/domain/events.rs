//! View events forwarded into the selection controller.

use crate::domain::error::PairviewError;
use crate::domain::selection::SelectionController;
use crate::ports::price_port::PricePort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The first picker changed; the second ticker is kept.
    Ticker1Changed(String),
    /// The second picker changed; the first ticker is kept.
    Ticker2Changed(String),
    PairChanged { ticker1: String, ticker2: String },
    /// Box or range selection over the current rows. Empty clears it.
    RangeSelected(Vec<usize>),
}

impl<P: PricePort> SelectionController<P> {
    /// Applies one view event. Picker changes must name a ticker the picker
    /// currently offers.
    pub fn handle(&mut self, event: ViewEvent) -> Result<(), PairviewError> {
        tracing::debug!(?event, "handling view event");
        match event {
            ViewEvent::Ticker1Changed(ticker) => {
                if !self.ticker1_options().contains(&ticker) {
                    return Err(not_offered(&ticker, 1));
                }
                let ticker2 = self.ticker2().to_string();
                self.set_pair(&ticker, &ticker2)
            }
            ViewEvent::Ticker2Changed(ticker) => {
                if !self.ticker2_options().contains(&ticker) {
                    return Err(not_offered(&ticker, 2));
                }
                let ticker1 = self.ticker1().to_string();
                self.set_pair(&ticker1, &ticker)
            }
            ViewEvent::PairChanged { ticker1, ticker2 } => self.set_pair(&ticker1, &ticker2),
            ViewEvent::RangeSelected(indices) if indices.is_empty() => self.clear_row_selection(),
            ViewEvent::RangeSelected(indices) => self.set_row_selection(&indices),
        }
    }
}

fn not_offered(ticker: &str, picker: u8) -> PairviewError {
    PairviewError::invalid_selection(format!(
        "{} is not an option for ticker{}",
        ticker, picker
    ))
}
