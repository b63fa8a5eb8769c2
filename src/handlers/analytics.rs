//! Dashboard API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::services::{AnalyticsService, DashboardSummary};

/// GET /api/users/:user_id/dashboard - Aggregated dashboard figures
pub async fn get_dashboard(
    State(analytics_service): State<Arc<AnalyticsService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let summary = analytics_service.dashboard(user_id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
