use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::booking_form::{FormError, SubmitError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Submit(#[from] SubmitError),

    #[error("{0}")]
    Conflict(String),

    #[error("confirmation failed: {0}")]
    Notify(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotConfirming => AppError::Conflict(FormError::NotConfirming.to_string()),
            FormError::Notify(msg) => AppError::Notify(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Submit(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Notify(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
