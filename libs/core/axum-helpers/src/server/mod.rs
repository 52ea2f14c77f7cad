//! Server infrastructure.
//!
//! - Router assembly with OpenAPI docs and cross-cutting layers
//! - `/health` liveness endpoint
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! ```ignore
//! use axum_helpers::server::{RouterOptions, create_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &options)?;
//! let app = router.merge(health_router(app_info!()));
//! create_app(app, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{RouterOptions, create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
