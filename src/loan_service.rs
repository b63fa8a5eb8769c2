//! Loan service layer - loan lifecycle and the repayment ledger
//!
//! An installment payment is two writes against a store with no cross-record
//! transactions: the expense record is created first, then the loan ledger is
//! advanced. A failure between the two leaves a detectable inconsistency
//! which is logged and surfaced as [`LedgerError::LedgerDesynced`] instead of
//! being silently retried - a blind retry would double-log the expense.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::emi::{self, AmortizationError};
use crate::loan::{CreateLoanRequest, Loan, NewLoan, PaymentReceipt, ReconciliationReport};
use crate::models::NewExpense;
use crate::store::{FinanceStore, StoreError};

/// Expense category used for installment payments
pub const EMI_EXPENSE_CATEGORY: &str = "Loan EMI";

/// Failures of loan operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("loan not found")]
    LoanNotFound,

    #[error(transparent)]
    Amortization(#[from] AmortizationError),

    #[error(
        "installment of {monthly_installment} would push amount paid past \
         total payable ({amount_paid} + {monthly_installment} > {total_payable})"
    )]
    OverpaymentRejected {
        amount_paid: i64,
        monthly_installment: i64,
        total_payable: i64,
    },

    #[error("failed to record installment expense; nothing was written: {0}")]
    ExpenseWriteFailed(#[source] StoreError),

    #[error(
        "expense {expense_id} was recorded but the loan ledger update failed; \
         payment {payment_id} must be reconciled, not retried: {source}"
    )]
    LedgerDesynced {
        payment_id: Uuid,
        expense_id: Uuid,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loan service for managing loan lifecycle
#[derive(Clone)]
pub struct LoanService {
    store: Arc<dyn FinanceStore>,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Create a loan, deriving its repayment schedule from the request
    pub async fn create_loan(
        &self,
        user_id: Uuid,
        request: CreateLoanRequest,
    ) -> Result<Loan, LedgerError> {
        let schedule = emi::compute_schedule(
            request.principal,
            request.annual_interest_rate,
            request.start_date,
            request.end_date,
        )?;

        let loan = self
            .store
            .create_loan(NewLoan {
                user_id,
                principal: request.principal,
                annual_interest_rate: request.annual_interest_rate,
                start_date: request.start_date,
                end_date: request.end_date,
                category: request.category,
                monthly_installment: schedule.monthly_installment,
                total_payable: schedule.total_payable,
                total_interest: schedule.total_interest,
                amount_paid: 0,
            })
            .await?;

        tracing::info!(
            loan_id = %loan.id,
            user_id = %user_id,
            installment = loan.monthly_installment,
            total_payable = loan.total_payable,
            "Loan created"
        );

        Ok(loan)
    }

    /// List loans owned by a user
    pub async fn list_loans(&self, user_id: Uuid) -> Result<Vec<Loan>, LedgerError> {
        Ok(self.store.list_loans(user_id).await?)
    }

    /// Get a loan by id, scoped to its owner
    pub async fn get_loan(&self, user_id: Uuid, loan_id: Uuid) -> Result<Loan, LedgerError> {
        let loan = self
            .store
            .get_loan(loan_id)
            .await?
            .ok_or(LedgerError::LoanNotFound)?;
        // Treat another user's loan as absent rather than revealing it
        if loan.user_id != user_id {
            return Err(LedgerError::LoanNotFound);
        }
        Ok(loan)
    }

    /// Pay one installment against a loan
    ///
    /// Ordering guarantee: the expense record exists before the ledger is
    /// advanced. On success both writes have completed; on failure the error
    /// variant states exactly which writes happened.
    pub async fn pay_installment(
        &self,
        user_id: Uuid,
        loan_id: Uuid,
    ) -> Result<PaymentReceipt, LedgerError> {
        let loan = self.get_loan(user_id, loan_id).await?;

        let new_amount_paid = loan.amount_paid + loan.monthly_installment;
        if new_amount_paid > loan.total_payable {
            return Err(LedgerError::OverpaymentRejected {
                amount_paid: loan.amount_paid,
                monthly_installment: loan.monthly_installment,
                total_payable: loan.total_payable,
            });
        }

        let payment_id = Uuid::new_v4();

        // Write 1: log the installment as a budget expense
        let expense = self
            .store
            .create_expense(NewExpense {
                user_id,
                title: format!("EMI for loan {}", loan.id),
                category: EMI_EXPENSE_CATEGORY.to_string(),
                amount: loan.monthly_installment,
                date: Utc::now().date_naive(),
                note: None,
                loan_id: Some(loan.id),
                payment_id: Some(payment_id),
            })
            .await
            .map_err(LedgerError::ExpenseWriteFailed)?;

        // Write 2: advance the loan ledger
        let updated = self
            .store
            .update_loan_paid_amount(loan.id, new_amount_paid)
            .await
            .map_err(|source| {
                tracing::error!(
                    loan_id = %loan.id,
                    payment_id = %payment_id,
                    expense_id = %expense.id,
                    error = %source,
                    "Ledger update failed after expense write; loan is desynced"
                );
                LedgerError::LedgerDesynced {
                    payment_id,
                    expense_id: expense.id,
                    source,
                }
            })?;

        tracing::info!(
            loan_id = %loan.id,
            payment_id = %payment_id,
            amount = loan.monthly_installment,
            amount_paid = updated.amount_paid,
            "Installment paid"
        );

        Ok(PaymentReceipt {
            payment_id,
            expense_id: expense.id,
            loan_id: loan.id,
            amount: loan.monthly_installment,
            amount_paid: updated.amount_paid,
            total_payable: updated.total_payable,
            status: updated.status(),
        })
    }

    /// Compare a loan's ledger against its logged installment expenses
    ///
    /// A non-zero drift means a payment operation completed its expense write
    /// but not its ledger write; the drift amount tells the operator how far
    /// the two records have diverged.
    pub async fn reconcile(
        &self,
        user_id: Uuid,
        loan_id: Uuid,
    ) -> Result<ReconciliationReport, LedgerError> {
        let loan = self.get_loan(user_id, loan_id).await?;

        let logged_expenses: i64 = self
            .store
            .list_expenses(user_id)
            .await?
            .iter()
            .filter(|e| e.loan_id == Some(loan.id))
            .map(|e| e.amount)
            .sum();

        let drift = logged_expenses - loan.amount_paid;
        if drift != 0 {
            tracing::warn!(
                loan_id = %loan.id,
                logged_expenses,
                amount_paid = loan.amount_paid,
                drift,
                "Loan ledger drift detected"
            );
        }

        Ok(ReconciliationReport {
            loan_id: loan.id,
            logged_expenses,
            amount_paid: loan.amount_paid,
            drift,
            consistent: drift == 0,
        })
    }
}
