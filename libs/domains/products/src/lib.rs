//! Products Domain
//!
//! Inventory of the shop: products plus the categories and brands they
//! reference.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /productos, /categorias, /marcas_producto
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness and referential rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, inputs, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryInventoryRepository, InventoryService};
//!
//! let service = InventoryService::new(InMemoryInventoryRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Brand, BrandInput, Category, CategoryInput, Product, ProductFilter, ProductInput,
    ProductQuery, ALL_CATEGORIES,
};
pub use repository::{InMemoryInventoryRepository, InventoryRepository};
pub use service::InventoryService;
