use std::net::IpAddr;

use crate::email::Delivery;
use crate::error::AppError;
use crate::models::LeadRecord;
use crate::state::AppState;

use super::parser;
use super::validate;

pub struct PipelineResult {
    pub record: LeadRecord,
    pub operator: Delivery,
    pub confirmation: Delivery,
}

/// Parse, validate, persist, then notify. Nothing is stored or sent unless
/// validation passes; once the row is appended the result is a success
/// whatever the notifications do.
pub async fn run(state: &AppState, client: IpAddr, body: &[u8]) -> Result<PipelineResult, AppError> {
    state
        .submission_limiter
        .check(client, state.config.rate_limit, state.config.rate_window_secs)
        .map_err(AppError::RateLimited)?;

    let payload = parser::parse_body(body).map_err(AppError::BadRequest)?;

    let lead = validate::validate(payload).map_err(|missing| {
        tracing::debug!("Missing required fields: {missing:?}");
        AppError::BadRequest(validate::MISSING_REQUIRED.to_string())
    })?;

    let record = state.store.append(&lead).await?;
    tracing::info!("Stored lead {} at {}", record.id, record.submitted_at);

    let operator = state.notifier.notify_operator(&record).await;
    let confirmation = state.notifier.confirm_submitter(&record).await;

    Ok(PipelineResult {
        record,
        operator,
        confirmation,
    })
}
