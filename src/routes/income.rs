//! Income route definitions

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::{add_income, delete_income, list_incomes, update_income};
use crate::state::AppState;

pub fn income_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:user_id/incomes",
            get(list_incomes).post(add_income),
        )
        .route(
            "/api/users/:user_id/incomes/:id",
            delete(delete_income).put(update_income),
        )
}
