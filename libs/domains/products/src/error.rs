use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Brand not found: {0}")]
    BrandNotFound(i64),

    #[error("Product with code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Brand '{0}' already exists")]
    DuplicateBrand(String),

    #[error("Category {id} is used by {products} product(s)")]
    CategoryInUse { id: i64, products: usize },

    #[error("Brand {id} is used by {products} product(s)")]
    BrandInUse { id: i64, products: usize },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            ProductError::BrandNotFound(id) => {
                AppError::NotFound(format!("Brand {} not found", id))
            }
            ProductError::DuplicateCode(code) => {
                AppError::Conflict(format!("Product with code '{}' already exists", code))
            }
            ProductError::DuplicateCategory(name) => {
                AppError::Conflict(format!("Category '{}' already exists", name))
            }
            ProductError::DuplicateBrand(name) => {
                AppError::Conflict(format!("Brand '{}' already exists", name))
            }
            e @ (ProductError::CategoryInUse { .. } | ProductError::BrandInUse { .. }) => {
                AppError::Conflict(e.to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
