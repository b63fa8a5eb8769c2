//! Service layer for budget bookkeeping and analytics

pub mod analytics;
pub mod budget;

pub use analytics::{AnalyticsService, CategoryTotal, DashboardSummary, LoanProgress};
pub use budget::{BudgetError, BudgetService};
