//! Pricing Domain
//!
//! Turns a product's purchase cost into its sale price:
//! a markup plus a flat fee, rounded up to the next multiple of ten.
//!
//! - [`calculator`]: the pure [`compute_price`] function
//! - [`watch`]: [`PriceWatch`], republishing the quote whenever the cost changes
//! - [`handlers`]: `GET`/`POST /pricing/quote`

pub mod calculator;
pub mod error;
pub mod handlers;
pub mod models;
pub mod watch;

pub use calculator::{FLAT_FEE, MARKUP, PriceQuote, ROUNDING_STEP, compute_price, format_amount};
pub use error::{PricingError, PricingResult};
pub use handlers::ApiDoc;
pub use models::{QuoteRequest, QuoteResponse};
pub use watch::{PriceState, PriceWatch};
