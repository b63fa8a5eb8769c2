//! Transfer route definitions

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::{delete_transfer, list_transfers, send_transfer};
use crate::state::AppState;

pub fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:user_id/transfers",
            get(list_transfers).post(send_transfer),
        )
        .route("/api/users/:user_id/transfers/:id", delete(delete_transfer))
}
