//! Data models for the FinTrack backend
//!
//! Records are stored in a remote JSON resource store, so every persisted
//! model serializes with camelCase field names matching the store's wire
//! format.

use serde::{Deserialize, Serialize};

pub mod record;
pub mod user;

pub use record::*;
pub use user::*;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
