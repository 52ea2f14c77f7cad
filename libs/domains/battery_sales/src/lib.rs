//! Battery Sales Domain
//!
//! Battery sales with their warranty period, and warranty returns.
//!
//! ```text
//! Handlers → Service → Repository → Models
//! ```
//!
//! ```rust,no_run
//! use domain_battery_sales::{handlers, BatterySaleService, InMemoryBatterySaleRepository};
//!
//! let service = BatterySaleService::new(InMemoryBatterySaleRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{BatterySaleError, BatterySaleResult};
pub use handlers::ApiDoc;
pub use models::{warranty_end, BatterySale, BatterySaleFilter, BatterySaleInput, MAX_WARRANTY_MONTHS};
pub use repository::{BatterySaleRepository, InMemoryBatterySaleRepository};
pub use service::BatterySaleService;
