//! Authentication module.
//!
//! - JWT issuing and verification with an in-memory revocation list
//! - [`Session`]: the verified caller, handed to handlers as an extractor
//! - [`require_session`]: middleware guarding every protected route
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, require_session};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/productos", get(list_products))
//!     .layer(axum::middleware::from_fn_with_state(auth, require_session));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod session;
pub mod store;

pub use config::JwtConfig;
pub use jwt::{AUTH_COOKIE, IssuedToken, JwtAuth, JwtClaims};
pub use middleware::{extract_token, require_session};
pub use session::Session;
pub use store::RevocationList;
