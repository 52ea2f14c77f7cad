use axum::Router;
use domain_battery_sales::{BatterySaleService, InMemoryBatterySaleRepository, handlers};

pub fn router() -> Router {
    let repository = InMemoryBatterySaleRepository::new();
    let service = BatterySaleService::new(repository);
    handlers::router(service)
}
