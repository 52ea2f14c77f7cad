use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::calculator::PriceQuote;

/// Cost to quote, as query string or JSON body
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteRequest {
    /// Purchase cost of the product
    pub cost: f64,
}

/// Quote with amounts ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub cost: f64,
    pub raw_price: f64,
    pub final_price: f64,
    /// `raw_price` with two decimals
    pub raw_price_display: String,
    /// `final_price` with two decimals
    pub final_price_display: String,
    /// Validation message when the cost is not positive
    pub error: Option<String>,
}

impl QuoteResponse {
    pub fn new(cost: f64, quote: PriceQuote) -> Self {
        Self {
            cost,
            raw_price_display: quote.raw_price_display(),
            final_price_display: quote.final_price_display(),
            raw_price: quote.raw_price,
            final_price: quote.final_price,
            error: quote.error,
        }
    }
}
