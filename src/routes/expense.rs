//! Expense route definitions

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::{add_expense, delete_expense, list_expenses, update_expense};
use crate::state::AppState;

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:user_id/expenses",
            get(list_expenses).post(add_expense),
        )
        .route(
            "/api/users/:user_id/expenses/:id",
            delete(delete_expense).put(update_expense),
        )
}
