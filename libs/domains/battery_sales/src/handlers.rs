use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AuditEvent, AuditOutcome, IdPath, Session, ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BatterySaleResult;
use crate::models::{BatterySale, BatterySaleFilter, BatterySaleInput};
use crate::repository::BatterySaleRepository;
use crate::service::BatterySaleService;

const TAG: &str = "Battery sales";

/// OpenAPI documentation for Battery Sales API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_sales,
        register_sale,
        get_sale,
        update_sale,
        delete_sale,
        register_return,
    ),
    components(
        schemas(BatterySale, BatterySaleInput, BatterySaleFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Battery sales and warranty returns"))
)]
pub struct ApiDoc;

pub fn router<R: BatterySaleRepository + 'static>(service: BatterySaleService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/venta_baterias", get(list_sales).post(register_sale))
        .route(
            "/venta_baterias/{id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .route("/venta_baterias/{id}/devolucion", post(register_return))
        .with_state(shared_service)
}

/// List battery sales, newest first
#[utoipa::path(
    get,
    path = "/venta_baterias",
    tag = TAG,
    params(BatterySaleFilter),
    responses(
        (status = 200, description = "Battery sales", body = Vec<BatterySale>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_sales<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    Query(filter): Query<BatterySaleFilter>,
) -> BatterySaleResult<Json<Vec<BatterySale>>> {
    Ok(Json(service.list_sales(filter).await?))
}

/// Register a battery sale
#[utoipa::path(
    post,
    path = "/venta_baterias",
    tag = TAG,
    request_body = BatterySaleInput,
    responses(
        (status = 201, description = "Sale registered", body = BatterySale),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn register_sale<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    session: Session,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<BatterySaleInput>,
) -> BatterySaleResult<impl IntoResponse> {
    let sale = service.register_sale(input).await?;

    AuditEvent::new(
        "battery_sale.create",
        Some(format!("battery_sale:{}", sale.id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .with_details(json!({
        "battery_code": sale.battery_code,
        "warranty_until": sale.warranty_until,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(sale)))
}

/// Get a battery sale by id
#[utoipa::path(
    get,
    path = "/venta_baterias/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale found", body = BatterySale),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_sale<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    IdPath(id): IdPath,
) -> BatterySaleResult<Json<BatterySale>> {
    Ok(Json(service.get_sale(id).await?))
}

/// Replace a battery sale
#[utoipa::path(
    put,
    path = "/venta_baterias/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Sale ID")),
    request_body = BatterySaleInput,
    responses(
        (status = 200, description = "Sale updated", body = BatterySale),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_sale<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BatterySaleInput>,
) -> BatterySaleResult<Json<BatterySale>> {
    Ok(Json(service.update_sale(id, input).await?))
}

/// Delete a battery sale
#[utoipa::path(
    delete,
    path = "/venta_baterias/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Sale ID")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_sale<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> BatterySaleResult<impl IntoResponse> {
    service.delete_sale(id).await?;

    AuditEvent::new(
        "battery_sale.delete",
        Some(format!("battery_sale:{}", id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Register a warranty return
#[utoipa::path(
    post,
    path = "/venta_baterias/{id}/devolucion",
    tag = TAG,
    params(("id" = i64, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Return registered", body = BatterySale),
        (status = 400, description = "Warranty expired"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn register_return<R: BatterySaleRepository>(
    State(service): State<Arc<BatterySaleService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> BatterySaleResult<Json<BatterySale>> {
    let resource = Some(format!("battery_sale:{}", id));

    match service.register_return(id).await {
        Ok(sale) => {
            AuditEvent::new("battery_sale.return", resource, AuditOutcome::Success)
                .by(&session)
                .with_headers(&headers)
                .log();
            Ok(Json(sale))
        }
        Err(e) => {
            AuditEvent::new("battery_sale.return", resource, AuditOutcome::Denied)
                .by(&session)
                .with_headers(&headers)
                .with_details(json!({ "reason": e.to_string() }))
                .log();
            Err(e)
        }
    }
}
