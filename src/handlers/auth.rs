//! Account API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth_service::AuthService;
use crate::error::ApiError;
use crate::models::{ApiResponse, ChangePasswordRequest, LoginRequest, SignupRequest, User};

/// POST /api/auth/signup - Register a new user
pub async fn signup(
    State(auth_service): State<Arc<AuthService>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    request.validate()?;
    let user = auth_service.signup(request).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/login - Credential lookup
pub async fn login(
    State(auth_service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    request.validate()?;
    let user = auth_service.login(request).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/:user_id/password - Change password
pub async fn change_password(
    State(auth_service): State<Arc<AuthService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    request.validate()?;
    let user = auth_service.change_password(user_id, request).await?;
    Ok(Json(ApiResponse::ok(user)))
}
