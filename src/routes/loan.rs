//! Loan route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{create_loan, get_loan, list_loans, pay_installment, reconcile_loan};
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/:user_id/loans", get(list_loans).post(create_loan))
        .route("/api/users/:user_id/loans/:id", get(get_loan))
        .route("/api/users/:user_id/loans/:id/payments", post(pay_installment))
        .route(
            "/api/users/:user_id/loans/:id/reconciliation",
            get(reconcile_loan),
        )
}
