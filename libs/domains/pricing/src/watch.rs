//! Live recomputation of a quote as the cost being edited changes.

use tokio::sync::watch;

use crate::calculator::{PriceQuote, compute_price};

/// Cost currently entered together with its derived quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceState {
    pub cost: f64,
    pub quote: PriceQuote,
}

impl PriceState {
    fn for_cost(cost: f64) -> Self {
        Self {
            cost,
            quote: compute_price(cost),
        }
    }
}

/// Holds the latest [`PriceState`] in a watch channel.
///
/// Every [`PriceWatch::set_cost`] recomputes through [`compute_price`] and
/// publishes, so subscribers always see a quote consistent with its cost.
/// Starts at cost 0, i.e. the invalid state.
#[derive(Debug)]
pub struct PriceWatch {
    sender: watch::Sender<PriceState>,
}

impl PriceWatch {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(PriceState::for_cost(0.0));
        Self { sender }
    }

    pub fn set_cost(&self, cost: f64) -> PriceQuote {
        let state = PriceState::for_cost(cost);
        let quote = state.quote.clone();

        self.sender.send_replace(state);
        tracing::trace!(cost, final_price = quote.final_price, "Price recomputed");
        quote
    }

    pub fn current(&self) -> PriceState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.sender.subscribe()
    }
}

impl Default for PriceWatch {
    fn default() -> Self {
        Self::new()
    }
}
