//! API handlers for the FinTrack backend

pub mod analytics;
pub mod auth;
pub mod expenses;
pub mod incomes;
pub mod loans;
pub mod transfers;

pub use analytics::get_dashboard;
pub use auth::*;
pub use expenses::*;
pub use incomes::*;
pub use loans::*;
pub use transfers::*;
