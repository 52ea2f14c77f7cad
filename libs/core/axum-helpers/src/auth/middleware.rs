use super::jwt::{AUTH_COOKIE, JwtAuth};
use super::session::Session;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Extract the token from `Authorization: Bearer <token>` or the auth cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get_all(header::COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .flat_map(|cookies| cookies.split(';'))
                .find_map(|cookie| {
                    let (name, value) = cookie.trim().split_once('=')?;
                    (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
                })
        })
}

/// Session guard for protected routes.
///
/// Verifies the token (signature, expiry, revocation) and inserts a
/// [`Session`] into the request extensions. Any failure answers 401.
pub async fn require_session(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("No token in Authorization header or cookie");
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    let claims = auth.verify_token(&token).await.map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::Unauthorized("Invalid or expired session".to_string())
    })?;

    request.extensions_mut().insert(Session::from(claims));
    Ok(next.run(request).await)
}
