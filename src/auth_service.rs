//! Account service - signup, login and password changes
//!
//! Credentials are a plaintext lookup against the mock user resource, kept
//! faithful to the backing store's data; this is bookkeeping, not a security
//! layer. Passwords never leave the API (`User` skips the field on
//! serialization).

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ChangePasswordRequest, LoginRequest, NewUser, SignupRequest, User};
use crate::store::{FinanceStore, StoreError};

/// Failures of account operations
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Account service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn FinanceStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Register a new user, rejecting duplicate emails
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        let users = self.store.list_users().await?;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&request.email))
        {
            return Err(AuthError::EmailTaken);
        }

        let user = self
            .store
            .create_user(NewUser {
                name: request.name,
                email: request.email,
                password: request.password,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Look up a user by credentials
    pub async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        let users = self.store.list_users().await?;
        users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(&request.email) && u.password == request.password)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<User, AuthError> {
        let users = self.store.list_users().await?;
        let mut user = users
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or(AuthError::UserNotFound)?;

        if user.password != request.current_password {
            return Err(AuthError::InvalidCredentials);
        }

        user.password = request.new_password;
        let updated = self.store.update_user(&user).await?;

        tracing::info!(user_id = %updated.id, "Password changed");
        Ok(updated)
    }
}
