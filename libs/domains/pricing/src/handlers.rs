//! HTTP handlers for price quotes

use axum::{
    Json, Router,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use axum_helpers::{
    AppError, Session,
    errors::responses::{BadRequestValidationResponse, UnauthorizedResponse},
};
use utoipa::OpenApi;

use crate::calculator::compute_price;
use crate::models::{QuoteRequest, QuoteResponse};

const TAG: &str = "Pricing";

/// OpenAPI documentation for the pricing endpoints
#[derive(OpenApi)]
#[openapi(
    paths(quote_from_query, quote_from_body),
    components(
        schemas(QuoteRequest, QuoteResponse),
        responses(BadRequestValidationResponse, UnauthorizedResponse)
    ),
    tags((name = TAG, description = "Sale price calculator"))
)]
pub struct ApiDoc;

pub fn router() -> Router {
    Router::new().route("/pricing/quote", get(quote_from_query).post(quote_from_body))
}

fn quote(session: &Session, cost: f64) -> Json<QuoteResponse> {
    let quote = compute_price(cost);
    tracing::debug!(
        user = %session.email,
        cost,
        final_price = quote.final_price,
        valid = quote.is_valid(),
        "Price quoted"
    );
    Json(QuoteResponse::new(cost, quote))
}

/// Quote a sale price from `?cost=`
///
/// A non-positive cost is not an error: the response carries zero prices
/// and the validation message.
#[utoipa::path(
    get,
    path = "/pricing/quote",
    tag = TAG,
    params(QuoteRequest),
    responses(
        (status = 200, description = "Computed quote", body = QuoteResponse),
        (status = 400, description = "Missing or non-numeric cost"),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn quote_from_query(
    session: Session,
    request: Result<Query<QuoteRequest>, QueryRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Query(request) = request.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(quote(&session, request.cost))
}

/// Quote a sale price from a JSON body
#[utoipa::path(
    post,
    path = "/pricing/quote",
    tag = TAG,
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Computed quote", body = QuoteResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn quote_from_body(
    session: Session,
    request: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(request) = request?;
    Ok(quote(&session, request.cost))
}
