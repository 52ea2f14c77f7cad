use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatterySaleError {
    #[error("Battery sale not found: {0}")]
    NotFound(i64),

    #[error("Warranty of sale {id} expired on {until}")]
    WarrantyExpired { id: i64, until: NaiveDate },

    #[error("Sale {0} was already returned under warranty")]
    AlreadyReturned(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BatterySaleResult<T> = Result<T, BatterySaleError>;

impl From<BatterySaleError> for AppError {
    fn from(err: BatterySaleError) -> Self {
        match err {
            BatterySaleError::NotFound(id) => {
                AppError::NotFound(format!("Battery sale {} not found", id))
            }
            e @ BatterySaleError::WarrantyExpired { .. } => AppError::BadRequest(e.to_string()),
            e @ BatterySaleError::AlreadyReturned(_) => AppError::Conflict(e.to_string()),
            BatterySaleError::Validation(msg) => AppError::BadRequest(msg),
            BatterySaleError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BatterySaleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
