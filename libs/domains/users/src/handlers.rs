//! Login, logout and current-user endpoints

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    middleware,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};
use axum_helpers::{
    AUTH_COOKIE, AppError, AuditEvent, AuditOutcome, JwtAuth, Session, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    require_session,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserError;
use crate::models::{LoginRequest, LoginResponse, LogoutResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const AUTH_TAG: &str = "Auth";

#[derive(OpenApi)]
#[openapi(
    paths(login, logout, me),
    components(
        schemas(LoginRequest, LoginResponse, LogoutResponse, UserResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = AUTH_TAG, description = "Session management"))
)]
pub struct ApiDoc;

/// State shared by the auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
    /// Adds `Secure` to the session cookie (production)
    pub secure_cookies: bool,
}

/// Router for `/auth/*`.
///
/// Login is public; logout and me carry their own session guard so the
/// router can be mounted next to the protected resources.
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    jwt: JwtAuth,
    secure_cookies: bool,
) -> Router {
    let guard = middleware::from_fn_with_state(jwt.clone(), require_session);
    let state = Arc::new(AuthState {
        service,
        jwt,
        secure_cookies,
    });

    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route_layer(guard);

    Router::new()
        .route("/auth/login", post(login))
        .merge(protected)
        .with_state(state)
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let secure_flag = if secure { " Secure;" } else { "" };
    let cookie = format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        AUTH_COOKIE, token, secure_flag, max_age
    );

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalServerError(format!("Invalid cookie value: {}", e)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; sets the authToken cookie", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, description = "Account is inactive"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = match state
        .service
        .verify_credentials(&input.email, &input.password)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            if matches!(err, UserError::InvalidCredentials | UserError::Inactive) {
                AuditEvent::new("auth.login", None, AuditOutcome::Denied)
                    .by_email(input.email.as_str())
                    .with_headers(&headers)
                    .with_details(serde_json::json!({ "reason": err.to_string() }))
                    .log();
            }
            return Err(err.into());
        }
    };

    let issued = state
        .jwt
        .issue_token(&user.id.to_string(), &user.email, &user.name, &user.roles)
        .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))?;
    let cookie = session_cookie(&issued.token, state.jwt.ttl_seconds(), state.secure_cookies)?;

    AuditEvent::new(
        "auth.login",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .by_email(user.email.as_str())
    .with_headers(&headers)
    .log();

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            success: true,
            message: "Login exitoso".to_string(),
            token: issued.token,
            user,
        }),
    ))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Token revoked and cookie cleared", body = LogoutResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn logout<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    state
        .jwt
        .revoke(&session.token_id, session.expires_at)
        .await;
    let cookie = session_cookie("", 0, state.secure_cookies)?;

    AuditEvent::new(
        "auth.logout",
        Some(format!("user:{}", session.user_id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LogoutResponse {
            success: true,
            message: "Sesión cerrada".to_string(),
        }),
    ))
}

/// Current user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The logged-in user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn me<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    session: Session,
) -> Result<Json<UserResponse>, AppError> {
    let stale = || AppError::Unauthorized("Session user no longer exists".to_string());

    let id = Uuid::parse_str(&session.user_id).map_err(|_| stale())?;
    match state.service.get_user(id).await {
        Ok(user) => Ok(Json(user)),
        Err(UserError::NotFound(_)) => Err(stale()),
        Err(err) => Err(err.into()),
    }
}
