use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::error::AppError;
use crate::models::SubmissionResponse;
use crate::state::SharedState;
use crate::submission::{metadata, pipeline};

pub const SUCCESS_MESSAGE: &str = "送信完了しました";

pub async fn ingest(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionResponse>, AppError> {
    let client = metadata::client_ip(&headers, addr.ip(), &state.config.trusted_proxies);

    let result = pipeline::run(&state, client, &body).await?;

    tracing::debug!(
        "Lead {} handled (operator: {:?}, confirmation: {:?})",
        result.record.id,
        result.operator,
        result.confirmation
    );

    Ok(Json(SubmissionResponse::ok(SUCCESS_MESSAGE)))
}
