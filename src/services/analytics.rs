//! Analytics service - dashboard aggregates
//!
//! All figures are derived from the full record history on each read. At
//! this scale that is acceptable; an incrementally maintained running
//! balance would replace it if the record counts grew.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::loan::LoanStatus;
use crate::store::{FinanceStore, StoreError};

/// Total amount per category
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Repayment progress of a single loan
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanProgress {
    pub loan_id: Uuid,
    pub category: String,
    pub monthly_installment: i64,
    pub total_payable: i64,
    pub amount_paid: i64,
    pub outstanding: i64,
    pub status: LoanStatus,
}

/// Aggregated dashboard figures for one user
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_income: i64,
    /// Borrowed principal counts as inflow on the dashboard
    pub total_loan_principal: i64,
    pub total_inflow: i64,
    pub total_expense: i64,
    pub total_transfers: i64,
    /// Inflow (income + loans) minus expenses
    pub net_position: i64,
    /// Income minus expenses minus transfers; what a new transfer may spend
    pub available_balance: i64,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
    pub loans: Vec<LoanProgress>,
}

/// Sum amounts per category, first-seen order; blank categories fall into
/// "Other"
pub fn group_by_category<I>(items: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for (category, amount) in items {
        let category = if category.trim().is_empty() {
            "Other".to_string()
        } else {
            category
        };
        match totals.iter_mut().find(|t| t.category == category) {
            Some(entry) => entry.total += amount,
            None => totals.push(CategoryTotal {
                category,
                total: amount,
            }),
        }
    }
    totals
}

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn FinanceStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Build the dashboard summary for a user
    pub async fn dashboard(&self, user_id: Uuid) -> Result<DashboardSummary, StoreError> {
        let incomes = self.store.list_incomes(user_id).await?;
        let expenses = self.store.list_expenses(user_id).await?;
        let transfers = self.store.list_transfers(user_id).await?;
        let loans = self.store.list_loans(user_id).await?;

        let total_income: i64 = incomes.iter().map(|r| r.amount).sum();
        let total_expense: i64 = expenses.iter().map(|r| r.amount).sum();
        let total_transfers: i64 = transfers.iter().map(|t| t.amount).sum();
        let total_loan_principal: i64 = loans.iter().map(|l| l.principal).sum();

        let total_inflow = total_income + total_loan_principal;

        Ok(DashboardSummary {
            total_income,
            total_loan_principal,
            total_inflow,
            total_expense,
            total_transfers,
            net_position: total_inflow - total_expense,
            available_balance: total_income - total_expense - total_transfers,
            income_by_category: group_by_category(
                incomes.into_iter().map(|r| (r.category, r.amount)),
            ),
            expense_by_category: group_by_category(
                expenses.into_iter().map(|r| (r.category, r.amount)),
            ),
            loans: loans
                .into_iter()
                .map(|l| LoanProgress {
                    loan_id: l.id,
                    category: l.category.clone(),
                    monthly_installment: l.monthly_installment,
                    total_payable: l.total_payable,
                    amount_paid: l.amount_paid,
                    outstanding: l.outstanding(),
                    status: l.status(),
                })
                .collect(),
        })
    }
}
