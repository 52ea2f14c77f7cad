//! # Axum Helpers
//!
//! Shared building blocks for the shop's Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT sessions with an in-memory revocation list
//! - **[`server`]**: Router assembly, health check, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Integer id path and validated JSON extractors
//! - **[`audit`]**: Audit logging for logins and inventory changes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{RouterOptions, create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let options = RouterOptions {
//!         cors_origins: "http://localhost:3000".to_string(),
//!         request_timeout: config.request_timeout,
//!     };
//!     let router = create_router::<ApiDoc>(Router::new(), &options)?;
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    AUTH_COOKIE, IssuedToken, JwtAuth, JwtClaims, JwtConfig, Session, extract_token,
    require_session,
};

pub use server::{
    HealthResponse, RouterOptions, create_app, create_router, health_router, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
