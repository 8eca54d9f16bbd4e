use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use matchpoint_ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Authorization(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

/// Ledger error kinds become explicit result codes on the wire.
fn ledger_code(err: &LedgerError) -> (StatusCode, &'static str) {
    match err {
        LedgerError::WindowViolation { .. } => (StatusCode::BAD_REQUEST, "WINDOW_VIOLATION"),
        LedgerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        LedgerError::SlotUnavailable { .. } => (StatusCode::CONFLICT, "SLOT_UNAVAILABLE"),
        LedgerError::UnknownSport(_) => (StatusCode::NOT_FOUND, "UNKNOWN_SPORT"),
        LedgerError::UnknownCourt { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_COURT"),
        LedgerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        LedgerError::HoldExpired(_) => (StatusCode::GONE, "HOLD_EXPIRED"),
        LedgerError::InsufficientFunds(_) => (StatusCode::PAYMENT_REQUIRED, "INSUFFICIENT_FUNDS"),
        LedgerError::PaymentFailed(_) => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_FAILED"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION", msg.clone())
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "AUTHORIZATION", msg.clone()),
            AppError::Ledger(err) => {
                let (status, code) = ledger_code(err);
                (status, code, err.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "code": code,
            "error": message,
        }));

        (status, body).into_response()
    }
}
