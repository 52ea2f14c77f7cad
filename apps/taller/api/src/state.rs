//! Application state shared by the route builders.

use axum_helpers::JwtAuth;
use domain_users::{InMemoryUserRepository, UserService};

/// Cloning is cheap: every field is Arc-backed.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Signs and verifies session tokens, holds the revocation list
    pub jwt: JwtAuth,
    pub users: UserService<InMemoryUserRepository>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        let users = UserService::new(InMemoryUserRepository::new());

        Self { config, jwt, users }
    }
}
