//! Middleware for the FinTrack API
//!
//! Request tracing and security headers.

mod security;
mod tracing;

pub use security::security_headers;
pub use tracing::request_tracing;
