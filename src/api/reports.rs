//! Token-gated reporting endpoints.
//!
//! Both return JSON; turning the rows into HTML is left to whatever renders
//! the dashboard.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, DashboardDto, DashboardQuery};
use crate::domain::DashboardView;
use crate::services::UsageReport;

/// GET /dashboard
///
/// `?view=sessions` (default) lists closed sessions; `?view=latest` lists the
/// latest login/logoff per client/server pair.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let Query(query) = query?;
    let reports = state.report_service();

    let dto = match query.view {
        DashboardView::Sessions => DashboardDto::Sessions(reports.closed_sessions().await?),
        DashboardView::Latest => DashboardDto::Latest(reports.latest_state().await?),
    };

    Ok(Json(ApiResponse::success(dto)))
}

/// GET /stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<UsageReport>>, ApiError> {
    let usage = state.report_service().usage().await?;
    Ok(Json(ApiResponse::success(usage)))
}
