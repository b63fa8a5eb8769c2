//! Account route definitions

use axum::{routing::post, routing::put, Router};

use crate::handlers::{change_password, login, signup};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/users/:user_id/password", put(change_password))
}
