//! Income API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, IncomeRecord, RecordRequest};
use crate::services::BudgetService;

/// GET /api/users/:user_id/incomes - List a user's income records
pub async fn list_incomes(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<IncomeRecord>>>, ApiError> {
    let incomes = budget_service.list_incomes(user_id).await?;
    Ok(Json(ApiResponse::ok(incomes)))
}

/// POST /api/users/:user_id/incomes - Record an income
pub async fn add_income(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RecordRequest>,
) -> Result<Json<ApiResponse<IncomeRecord>>, ApiError> {
    request.validate()?;
    let income = budget_service.add_income(user_id, request).await?;
    Ok(Json(ApiResponse::ok(income)))
}

/// PUT /api/users/:user_id/incomes/:id - Edit an income record
pub async fn update_income(
    State(budget_service): State<Arc<BudgetService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<RecordRequest>,
) -> Result<Json<ApiResponse<IncomeRecord>>, ApiError> {
    request.validate()?;
    let income = budget_service.update_income(user_id, id, request).await?;
    Ok(Json(ApiResponse::ok(income)))
}

/// DELETE /api/users/:user_id/incomes/:id - Delete an income record
pub async fn delete_income(
    State(budget_service): State<Arc<BudgetService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    budget_service.delete_income(user_id, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
