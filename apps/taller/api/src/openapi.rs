use axum_helpers::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(ErrorResponse)),
    info(
        title = "Taller Franco API",
        version = "0.1.0",
        description = "Inventory, battery sales and price calculation for the shop"
    ),
    servers((url = "/api", description = "API base path"))
)]
struct BaseDoc;

/// Combined document: every domain mounts its routes at the API root.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc.merge(domain_pricing::ApiDoc::openapi());
        doc.merge(domain_products::ApiDoc::openapi());
        doc.merge(domain_battery_sales::ApiDoc::openapi());
        doc
    }
}
