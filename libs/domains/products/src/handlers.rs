//! HTTP handlers for products, categories and brands

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
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

use crate::error::ProductResult;
use crate::models::{Brand, BrandInput, Category, CategoryInput, Product, ProductFilter, ProductInput};
use crate::repository::InventoryRepository;
use crate::service::InventoryService;

const PRODUCTS_TAG: &str = "Products";
const CATEGORIES_TAG: &str = "Categories";
const BRANDS_TAG: &str = "Brands";

/// OpenAPI documentation for the inventory endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        list_brands,
        create_brand,
        get_brand,
        update_brand,
        delete_brand,
    ),
    components(
        schemas(Product, ProductInput, ProductFilter, Category, CategoryInput, Brand, BrandInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Product inventory"),
        (name = CATEGORIES_TAG, description = "Product categories"),
        (name = BRANDS_TAG, description = "Product brands")
    )
)]
pub struct ApiDoc;

/// Router for `/productos`, `/categorias` and `/marcas_producto`.
///
/// Mutating handlers take the caller's [`Session`] for auditing, so the
/// router must sit behind the session middleware.
pub fn router<R: InventoryRepository + 'static>(service: InventoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route(
            "/productos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/categorias", get(list_categories).post(create_category))
        .route(
            "/categorias/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/marcas_producto", get(list_brands).post(create_brand))
        .route(
            "/marcas_producto/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .with_state(shared_service)
}

/// List products, optionally filtered by category, text and low stock
#[utoipa::path(
    get,
    path = "/productos",
    tag = PRODUCTS_TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Products ordered by id", body = Vec<Product>),
        (status = 400, description = "Invalid category filter"),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/productos",
    tag = PRODUCTS_TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .with_details(json!({
        "code": product.code,
        "name": product.name,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/productos/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product; omitted fields become null
#[utoipa::path(
    put,
    path = "/productos/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;

    AuditEvent::new(
        "product.update",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/productos/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;

    AuditEvent::new(
        "product.delete",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List categories
#[utoipa::path(
    get,
    path = "/categorias",
    tag = CATEGORIES_TAG,
    responses(
        (status = 200, description = "Categories ordered by id", body = Vec<Category>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_categories<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> ProductResult<Json<Vec<Category>>> {
    Ok(Json(service.list_categories().await?))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categorias",
    tag = CATEGORIES_TAG,
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_category<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> ProductResult<impl IntoResponse> {
    let category = service.create_category(input).await?;

    AuditEvent::new(
        "category.create",
        Some(format!("category:{}", category.id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/categorias/{id}",
    tag = CATEGORIES_TAG,
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_category<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Category>> {
    Ok(Json(service.get_category(id).await?))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categorias/{id}",
    tag = CATEGORIES_TAG,
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_category<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> ProductResult<Json<Category>> {
    Ok(Json(service.update_category(id, input).await?))
}

/// Delete a category that no product references
#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    tag = CATEGORIES_TAG,
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn delete_category<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_category(id).await?;

    AuditEvent::new(
        "category.delete",
        Some(format!("category:{}", id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List brands
#[utoipa::path(
    get,
    path = "/marcas_producto",
    tag = BRANDS_TAG,
    responses(
        (status = 200, description = "Brands ordered by id", body = Vec<Brand>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_brands<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> ProductResult<Json<Vec<Brand>>> {
    Ok(Json(service.list_brands().await?))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "/marcas_producto",
    tag = BRANDS_TAG,
    request_body = BrandInput,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_brand<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<BrandInput>,
) -> ProductResult<impl IntoResponse> {
    let brand = service.create_brand(input).await?;

    AuditEvent::new(
        "brand.create",
        Some(format!("brand:{}", brand.id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok((StatusCode::CREATED, Json(brand)))
}

/// Get a brand by id
#[utoipa::path(
    get,
    path = "/marcas_producto/{id}",
    tag = BRANDS_TAG,
    params(("id" = i64, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_brand<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Brand>> {
    Ok(Json(service.get_brand(id).await?))
}

/// Rename a brand
#[utoipa::path(
    put,
    path = "/marcas_producto/{id}",
    tag = BRANDS_TAG,
    params(("id" = i64, Path, description = "Brand ID")),
    request_body = BrandInput,
    responses(
        (status = 200, description = "Brand updated", body = Brand),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_brand<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BrandInput>,
) -> ProductResult<Json<Brand>> {
    Ok(Json(service.update_brand(id, input).await?))
}

/// Delete a brand that no product references
#[utoipa::path(
    delete,
    path = "/marcas_producto/{id}",
    tag = BRANDS_TAG,
    params(("id" = i64, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn delete_brand<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    session: Session,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_brand(id).await?;

    AuditEvent::new(
        "brand.delete",
        Some(format!("brand:{}", id)),
        AuditOutcome::Success,
    )
    .by(&session)
    .with_headers(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}
