//! The authenticated caller, as seen by handlers.

use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use utoipa::ToSchema;

/// Explicit session value for a verified request.
///
/// [`require_session`](super::require_session) inserts it into the request
/// extensions; handlers take it as an argument instead of consulting any
/// global "logged in" flag. Extracting it on an unguarded route answers 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    #[serde(skip)]
    pub token_id: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl From<JwtClaims> for Session {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            roles: claims.roles,
            token_id: claims.jti,
            expires_at: claims.exp,
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
