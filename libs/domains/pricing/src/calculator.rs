//! Sale price derived from a product's purchase cost.
//!
//! ```rust
//! use domain_pricing::compute_price;
//!
//! let quote = compute_price(100.0);
//! assert_eq!(quote.raw_price, 155.0);
//! assert_eq!(quote.final_price, 160.0);
//! ```

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{PricingError, PricingResult};

/// Multiplier applied to the cost
pub const MARKUP: f64 = 1.35;
/// Fixed amount added after the markup
pub const FLAT_FEE: f64 = 20.0;
/// Final prices are rounded up to a multiple of this
pub const ROUNDING_STEP: f64 = 10.0;

/// Result of [`compute_price`].
///
/// An invalid cost yields zero prices and the validation message in
/// `error`; it is never reported as an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceQuote {
    pub raw_price: f64,
    pub final_price: f64,
    pub error: Option<String>,
}

impl PriceQuote {
    fn invalid(err: PricingError) -> Self {
        Self {
            raw_price: 0.0,
            final_price: 0.0,
            error: Some(err.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn raw_price_display(&self) -> String {
        format_amount(self.raw_price)
    }

    pub fn final_price_display(&self) -> String {
        format_amount(self.final_price)
    }
}

/// Two decimals, e.g. `160.00`.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn validate_cost(cost: f64) -> PricingResult<f64> {
    if cost.is_finite() && cost > 0.0 {
        Ok(cost)
    } else {
        Err(PricingError::InvalidCost)
    }
}

/// Round up to the next multiple of [`ROUNDING_STEP`]; exact multiples stay.
fn round_up_to_step(price: f64) -> f64 {
    let remainder = price % ROUNDING_STEP;
    if remainder == 0.0 {
        price
    } else {
        price + (ROUNDING_STEP - remainder)
    }
}

/// `raw = cost * MARKUP + FLAT_FEE`, then rounded up to the step.
pub fn compute_price(cost: f64) -> PriceQuote {
    match validate_cost(cost) {
        Ok(cost) => {
            let raw_price = cost * MARKUP + FLAT_FEE;
            // A finite cost near f64::MAX still overflows here
            if !raw_price.is_finite() {
                return PriceQuote::invalid(PricingError::CostTooLarge);
            }
            PriceQuote {
                raw_price,
                final_price: round_up_to_step(raw_price),
                error: None,
            }
        }
        Err(err) => PriceQuote::invalid(err),
    }
}
