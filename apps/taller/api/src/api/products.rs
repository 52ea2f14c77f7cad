use axum::Router;
use domain_products::{InMemoryInventoryRepository, InventoryService, handlers};

pub fn router() -> Router {
    let repository = InMemoryInventoryRepository::new();
    let service = InventoryService::new(repository);
    handlers::router(service)
}
