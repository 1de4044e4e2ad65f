//! Ingestion endpoints. These are open: no token is required to report an event.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use super::validation::validate_log_request;
use super::{ApiError, AppState, LogRequest, MessageResponse};
use crate::domain::EventKind;

/// POST /api/log
pub async fn log_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    record(&state, EventKind::Login, payload).await?;
    Ok(Json(MessageResponse::new("Data saved successfully")))
}

/// POST /api/logoff
pub async fn log_logoff(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    record(&state, EventKind::Logoff, payload).await?;
    Ok(Json(MessageResponse::new("Logoff data saved successfully")))
}

async fn record(
    state: &AppState,
    kind: EventKind,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<(), ApiError> {
    let Json(request) = payload?;
    let event = validate_log_request(request)?;

    state.event_service().record(kind, &event).await?;
    Ok(())
}
