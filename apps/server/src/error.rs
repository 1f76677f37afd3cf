use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use papertrade_core::errors::{DatabaseError, Error as CoreError};
use papertrade_core::ledger::LedgerError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Ledger(ledger) => match ledger {
            LedgerError::NoSuchHolding(_) => StatusCode::NOT_FOUND,
            LedgerError::PriceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::InsufficientBalance { .. }
            | LedgerError::InsufficientShares { .. }
            | LedgerError::InvalidQuantity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        },
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {msg}");
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
