//! Route definitions for the FinTrack API

mod analytics;
mod auth;
mod expense;
mod income;
mod loan;
mod transfer;

pub use analytics::analytics_routes;
pub use auth::auth_routes;
pub use expense::expense_routes;
pub use income::income_routes;
pub use loan::loan_routes;
pub use transfer::transfer_routes;
