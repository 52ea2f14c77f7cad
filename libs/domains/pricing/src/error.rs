use thiserror::Error;

/// Why a cost cannot be priced; carried as text in the quote, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Zero, negative or non-finite cost
    #[error("cost must be greater than 0")]
    InvalidCost,

    /// The marked-up price no longer fits in an f64
    #[error("cost is too large")]
    CostTooLarge,
}

pub type PricingResult<T> = Result<T, PricingError>;
