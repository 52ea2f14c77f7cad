//! Handler tests for the auth endpoints

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const EMAIL: &str = "admin@taller.test";
const PASSWORD: &str = "clave1234";

async fn app() -> (Router, UserService<InMemoryUserRepository>) {
    let service = UserService::new(InMemoryUserRepository::new());
    service
        .seed_admin(AdminSeed {
            email: EMAIL.to_string(),
            name: "Franco".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let jwt = JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-characters"));
    (handlers::router(service.clone(), jwt, false), service)
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn login_token(app: &Router) -> String {
    let response = login(app, EMAIL, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

fn with_bearer(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_login_sets_cookie_and_returns_user() {
    let (app, _) = app().await;

    let response = login(&app, EMAIL, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("authToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login exitoso");
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["roles"], json!(["admin"]));
    assert!(cookie.contains(body["token"].as_str().unwrap()));
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (app, _) = app().await;

    let response = login(&app, EMAIL, "incorrecta1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = body_json(response).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_invalid_email_is_validation_error() {
    let (app, _) = app().await;

    let response = login(&app, "not-an-email", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_inactive_account_is_forbidden() {
    let (app, service) = app().await;
    let token = login_token(&app).await;

    let me = app
        .clone()
        .oneshot(with_bearer("GET", "/auth/me", &token))
        .await
        .unwrap();
    let id: uuid::Uuid = body_json(me).await["id"].as_str().unwrap().parse().unwrap();
    service.set_active(id, false).await.unwrap();

    let response = login(&app, EMAIL, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_reads_cookie() {
    let (app, _) = app().await;
    let token = login_token(&app).await;

    let request = Request::builder()
        .uri("/auth/me")
        .header(header::COOKIE, format!("theme=dark; authToken={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Franco");
    assert!(body["last_login_at"].is_string());
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let (app, _) = app().await;

    let request = Request::builder()
        .uri("/auth/me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token_and_clears_cookie() {
    let (app, _) = app().await;
    let token = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(with_bearer("POST", "/auth/logout", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("authToken=;"));
    assert!(cookie.contains("Max-Age=0"));

    let response = app
        .clone()
        .oneshot(with_bearer("GET", "/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
