use axum::{Router, middleware};
use axum_helpers::require_session;

use crate::state::AppState;

pub mod auth;
pub mod battery_sales;
pub mod pricing;
pub mod products;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Only `/auth/login` is public. Every resource route sits behind the
/// session guard, and handlers receive the verified `Session` explicitly.
pub fn routes(state: &AppState) -> Router {
    let guard = middleware::from_fn_with_state(state.jwt.clone(), require_session);

    let protected = Router::new()
        .merge(pricing::router())
        .merge(products::router())
        .merge(battery_sales::router())
        .route_layer(guard);

    Router::new().merge(auth::router(state)).merge(protected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::{JwtConfig, RouterOptions, create_router};
    use core_config::{app_info, server::ServerConfig};
    use domain_users::AdminSeed;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    const EMAIL: &str = "admin@tallerfranco.com";
    const PASSWORD: &str = "clave1234";

    async fn state() -> AppState {
        let config = Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            jwt: JwtConfig::new("test-secret-that-is-at-least-32-characters"),
            admin: AdminSeed {
                email: EMAIL.to_string(),
                name: "Franco".to_string(),
                password: PASSWORD.to_string(),
            },
            cors_origins: "http://localhost:3000".to_string(),
        };
        let state = AppState::new(config);
        state
            .users
            .seed_admin(state.config.admin.clone())
            .await
            .unwrap();
        state
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn token(app: &Router) -> String {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": EMAIL, "password": PASSWORD }).to_string(),
            ))
            .unwrap();
        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let builder = Request::builder().uri(uri);
        let builder = match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_resources_require_a_session() {
        let app = routes(&state().await);

        for uri in ["/productos", "/categorias", "/venta_baterias", "/pricing/quote?cost=100"] {
            let (status, body) = call(&app, get(uri, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["error"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_logged_in_user_reaches_resources() {
        let app = routes(&state().await);
        let token = token(&app).await;

        let (status, body) = call(&app, get("/productos", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = call(&app, get("/pricing/quote?cost=100", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["final_price_display"], "160.00");
    }

    #[tokio::test]
    async fn test_logged_out_token_is_rejected_everywhere() {
        let app = routes(&state().await);
        let token = token(&app).await;

        let logout = Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(&app, logout).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(&app, get("/venta_baterias", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_routes_are_served_under_api_prefix() {
        let options = RouterOptions {
            cors_origins: "http://localhost:3000".to_string(),
            request_timeout: Duration::from_secs(5),
        };
        let app = create_router::<crate::openapi::ApiDoc>(routes(&state().await), &options).unwrap();

        let (status, _) = call(&app, get("/api/productos", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(&app, get("/productos", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
