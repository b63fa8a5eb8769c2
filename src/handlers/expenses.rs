//! Expense API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, ExpenseRecord, RecordRequest};
use crate::services::BudgetService;

/// GET /api/users/:user_id/expenses - List a user's expenses
pub async fn list_expenses(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ExpenseRecord>>>, ApiError> {
    let expenses = budget_service.list_expenses(user_id).await?;
    Ok(Json(ApiResponse::ok(expenses)))
}

/// POST /api/users/:user_id/expenses - Record an expense
pub async fn add_expense(
    State(budget_service): State<Arc<BudgetService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RecordRequest>,
) -> Result<Json<ApiResponse<ExpenseRecord>>, ApiError> {
    request.validate()?;
    let expense = budget_service.add_expense(user_id, request).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// PUT /api/users/:user_id/expenses/:id - Edit an expense
pub async fn update_expense(
    State(budget_service): State<Arc<BudgetService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<RecordRequest>,
) -> Result<Json<ApiResponse<ExpenseRecord>>, ApiError> {
    request.validate()?;
    let expense = budget_service.update_expense(user_id, id, request).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// DELETE /api/users/:user_id/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(budget_service): State<Arc<BudgetService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    budget_service.delete_expense(user_id, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
