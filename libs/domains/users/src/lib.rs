//! Users Domain
//!
//! Back-office accounts and the session endpoints built on them.
//!
//! - Passwords are hashed with Argon2
//! - Login issues a JWT, returned in the body and as the `authToken` cookie
//! - Logout revokes the token until it expires
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-characters"));
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service, jwt, false);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    AdminSeed, CreateUser, LoginRequest, LoginResponse, LogoutResponse, Role, User, UserResponse,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
