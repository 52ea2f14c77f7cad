use axum::Router;
use domain_pricing::handlers;

pub fn router() -> Router {
    handlers::router()
}
