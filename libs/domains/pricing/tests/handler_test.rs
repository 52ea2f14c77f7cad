//! Handler tests for the quote endpoints

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::Session;
use domain_pricing::*;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> Router {
    handlers::router().layer(Extension(Session {
        user_id: "1".to_string(),
        email: "caja@taller.test".to_string(),
        name: "Caja".to_string(),
        roles: vec![],
        token_id: "t".to_string(),
        expires_at: i64::MAX,
    }))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_quote() {
    let response = app()
        .oneshot(
            Request::get("/pricing/quote?cost=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let quote: QuoteResponse = json_body(response.into_body()).await;
    assert_eq!(quote.cost, 100.0);
    assert_eq!(quote.raw_price_display, "155.00");
    assert_eq!(quote.final_price_display, "160.00");
    assert_eq!(quote.error, None);
}

#[tokio::test]
async fn test_post_invalid_cost_is_200_with_message() {
    let response = app()
        .oneshot(
            Request::post("/pricing/quote")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"cost": 0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let quote: QuoteResponse = json_body(response.into_body()).await;
    assert_eq!(quote.final_price, 0.0);
    assert_eq!(quote.final_price_display, "0.00");
    assert_eq!(quote.error.as_deref(), Some("cost must be greater than 0"));
}

#[tokio::test]
async fn test_non_numeric_cost_is_bad_request() {
    let response = app()
        .oneshot(
            Request::get("/pricing/quote?cost=mucho")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_quote_requires_session() {
    let response = handlers::router()
        .oneshot(
            Request::get("/pricing/quote?cost=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_overflowing_cost_is_reported_not_priced() {
    let response = app()
        .oneshot(
            Request::post("/pricing/quote")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"cost": 1e308}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["raw_price"], 0.0);
    assert_eq!(body["final_price"], 0.0);
    assert_eq!(body["error"], "cost is too large");
}
