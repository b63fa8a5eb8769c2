//! Dashboard route definitions

use axum::{routing::get, Router};

use crate::handlers::get_dashboard;
use crate::state::AppState;

pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/api/users/:user_id/dashboard", get(get_dashboard))
}
