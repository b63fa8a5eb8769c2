//! Transfer API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, Transfer, TransferRequest};
use crate::services::BudgetService;

/// GET /api/users/:user_id/transfers - List a user's transfers
pub async fn list_transfers(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Transfer>>>, ApiError> {
    let transfers = budget_service.list_transfers(user_id).await?;
    Ok(Json(ApiResponse::ok(transfers)))
}

/// POST /api/users/:user_id/transfers - Send money to a beneficiary
pub async fn send_transfer(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<ApiResponse<Transfer>>, ApiError> {
    request.validate()?;
    let transfer = budget_service.send_transfer(user_id, request).await?;
    Ok(Json(ApiResponse::ok(transfer)))
}

/// DELETE /api/users/:user_id/transfers/:id - Delete a transfer record
pub async fn delete_transfer(
    State(budget_service): State<Arc<BudgetService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    budget_service.delete_transfer(user_id, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
