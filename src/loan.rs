//! Loan models for FinTrack
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Repayment status, derived from the paid/payable ratio
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    PaidOff,
}

/// Loan model
///
/// `monthly_installment`, `total_payable` and `total_interest` are derived
/// by the EMI engine at creation time and persisted alongside the loan.
/// All monetary fields are i64 minor currency units.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub principal: i64,
    /// Annual interest rate as a percentage (12 means 12%/year)
    pub annual_interest_rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub monthly_installment: i64,
    pub total_payable: i64,
    pub total_interest: i64,
    pub amount_paid: i64,
}

impl Loan {
    /// Current repayment status
    ///
    /// `amount_paid` can never exceed `total_payable`; equality is the
    /// terminal paid-off state.
    pub fn status(&self) -> LoanStatus {
        if self.amount_paid >= self.total_payable {
            LoanStatus::PaidOff
        } else {
            LoanStatus::Active
        }
    }

    /// Amount still owed
    pub fn outstanding(&self) -> i64 {
        self.total_payable - self.amount_paid
    }
}

/// New loan record, id assigned by the store
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub user_id: Uuid,
    pub principal: i64,
    pub annual_interest_rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub monthly_installment: i64,
    pub total_payable: i64,
    pub total_interest: i64,
    pub amount_paid: i64,
}

/// Request to create a new loan
///
/// Derived fields are not accepted from the caller; the EMI engine computes
/// them from principal, rate and term.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    #[validate(range(min = 1, message = "Principal must be positive"))]
    pub principal: i64,
    #[validate(range(min = 0.0, message = "Interest rate must be non-negative"))]
    pub annual_interest_rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

/// Receipt returned by a successful installment payment
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Idempotency key of this payment operation
    pub payment_id: Uuid,
    /// Expense record logged for the installment
    pub expense_id: Uuid,
    pub loan_id: Uuid,
    pub amount: i64,
    pub amount_paid: i64,
    pub total_payable: i64,
    pub status: LoanStatus,
}

/// Result of comparing a loan's ledger against its logged expenses
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub loan_id: Uuid,
    /// Sum of installment expenses tagged with this loan
    pub logged_expenses: i64,
    /// `amount_paid` recorded on the loan itself
    pub amount_paid: i64,
    /// `logged_expenses - amount_paid`; non-zero means a payment operation
    /// was interrupted between its two writes
    pub drift: i64,
    pub consistent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(amount_paid: i64) -> Loan {
        Loan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            principal: 1_000_000,
            annual_interest_rate: 10.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            category: "Car".to_string(),
            monthly_installment: 100_000,
            total_payable: 1_200_000,
            total_interest: 200_000,
            amount_paid,
        }
    }

    #[test]
    fn status_is_active_below_total_payable() {
        assert_eq!(loan(0).status(), LoanStatus::Active);
        assert_eq!(loan(1_199_999).status(), LoanStatus::Active);
    }

    #[test]
    fn status_is_paid_off_at_total_payable() {
        assert_eq!(loan(1_200_000).status(), LoanStatus::PaidOff);
    }

    #[test]
    fn outstanding_balance() {
        assert_eq!(loan(300_000).outstanding(), 900_000);
    }
}
