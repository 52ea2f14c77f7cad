use axum::Router;
use domain_users::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(
        state.users.clone(),
        state.jwt.clone(),
        state.config.environment.use_https(),
    )
}
