use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::SubmissionResponse;
use crate::store::StoreError;

/// Prefix shared by every failure message returned to callers.
pub const FAILURE_PREFIX: &str = "エラーが発生しました: ";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    RateLimited(u64),
    Store(StoreError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::RateLimited(secs) => write!(f, "Rate Limited: retry after {secs}s"),
            AppError::Store(err) => write!(f, "Store Error: {err}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => {
                tracing::info!("Rejected submission: {msg}");
                (StatusCode::BAD_REQUEST, format!("{FAILURE_PREFIX}{msg}"))
            }
            AppError::RateLimited(secs) => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("{FAILURE_PREFIX}送信回数の上限に達しました。{secs}秒後に再度お試しください"),
            ),
            AppError::Store(err @ StoreError::SheetMissing(_)) => {
                tracing::error!("Record store unavailable: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{FAILURE_PREFIX}{err}"))
            }
            AppError::Store(err) => {
                tracing::error!("Record store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{FAILURE_PREFIX}保存に失敗しました"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{FAILURE_PREFIX}内部エラー"),
                )
            }
        };

        (status, axum::Json(SubmissionResponse::failed(message))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
