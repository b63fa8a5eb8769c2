//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth_service::AuthService;
use crate::loan_service::LoanService;
use crate::services::{AnalyticsService, BudgetService};
use crate::store::FinanceStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub budget_service: Arc<BudgetService>,
    pub loan_service: Arc<LoanService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub store: Arc<dyn FinanceStore>,
}

impl AppState {
    /// Build the full service graph over one store
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(store.clone())),
            budget_service: Arc::new(BudgetService::new(store.clone())),
            loan_service: Arc::new(LoanService::new(store.clone())),
            analytics_service: Arc::new(AnalyticsService::new(store.clone())),
            store,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<BudgetService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.budget_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<AnalyticsService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.analytics_service.clone()
    }
}
