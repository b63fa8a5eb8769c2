//! FinTrack Backend Library
//!
//! Core modules for the FinTrack personal-finance backend: the EMI engine,
//! the repayment ledger, budget bookkeeping and the resource-store seam.

pub mod auth_service;
pub mod config;
pub mod emi;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod loan_service;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use state::AppState;
