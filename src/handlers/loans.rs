//! Loan API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::loan::{CreateLoanRequest, Loan, PaymentReceipt, ReconciliationReport};
use crate::loan_service::LoanService;
use crate::models::ApiResponse;

/// GET /api/users/:user_id/loans - List a user's loans
pub async fn list_loans(
    State(loan_service): State<Arc<LoanService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Loan>>>, ApiError> {
    let loans = loan_service.list_loans(user_id).await?;
    Ok(Json(ApiResponse::ok(loans)))
}

/// GET /api/users/:user_id/loans/:id - Get a single loan
pub async fn get_loan(
    State(loan_service): State<Arc<LoanService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = loan_service.get_loan(user_id, id).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// POST /api/users/:user_id/loans - Create a loan with derived schedule
pub async fn create_loan(
    State(loan_service): State<Arc<LoanService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CreateLoanRequest>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    request.validate()?;
    let loan = loan_service.create_loan(user_id, request).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// POST /api/users/:user_id/loans/:id/payments - Pay one installment
pub async fn pay_installment(
    State(loan_service): State<Arc<LoanService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<PaymentReceipt>>, ApiError> {
    let receipt = loan_service.pay_installment(user_id, id).await?;
    Ok(Json(ApiResponse::ok(receipt)))
}

/// GET /api/users/:user_id/loans/:id/reconciliation - Compare the ledger
/// against logged installment expenses
pub async fn reconcile_loan(
    State(loan_service): State<Arc<LoanService>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<ReconciliationReport>>, ApiError> {
    let report = loan_service.reconcile(user_id, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}
