//! HTTP-level middleware.
//!
//! - CORS layer built from the configured frontend origins
//! - Security headers on every response

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;
