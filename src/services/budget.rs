//! Budget service - income, expense and transfer bookkeeping
//!
//! Expense and transfer writes are gated on derived balances, recomputed
//! from the full record history on each call. Sending money to a
//! beneficiary is two ordered writes (transfer record, then its companion
//! expense); a failure between them is surfaced, not papered over.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ExpenseRecord, IncomeRecord, NewExpense, NewIncome, NewTransfer, RecordRequest, Transfer,
    TransferRequest,
};
use crate::store::{FinanceStore, StoreError};

/// How far back a record date may lie
const MAX_RECORD_AGE_DAYS: i64 = 30;

/// Failures of budget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("record not found")]
    RecordNotFound,

    #[error("invalid record date: {0}")]
    InvalidDate(String),

    #[error("amount {requested} exceeds available balance {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error(
        "transfer {transfer_id} was recorded but its companion expense failed; \
         the transfer is not reflected in the expense history: {source}"
    )]
    CompanionExpenseFailed {
        transfer_id: Uuid,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Budget service
#[derive(Clone)]
pub struct BudgetService {
    store: Arc<dyn FinanceStore>,
}

impl BudgetService {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Income minus expenses; the ceiling for new expenses
    pub async fn spendable_balance(&self, user_id: Uuid) -> Result<i64, BudgetError> {
        let income: i64 = self
            .store
            .list_incomes(user_id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum();
        let expenses: i64 = self
            .store
            .list_expenses(user_id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum();
        Ok(income - expenses)
    }

    /// Income minus expenses minus transfers; the ceiling for new transfers
    pub async fn available_balance(&self, user_id: Uuid) -> Result<i64, BudgetError> {
        let transfers: i64 = self
            .store
            .list_transfers(user_id)
            .await?
            .iter()
            .map(|t| t.amount)
            .sum();
        Ok(self.spendable_balance(user_id).await? - transfers)
    }

    // ===== Incomes =====

    pub async fn list_incomes(&self, user_id: Uuid) -> Result<Vec<IncomeRecord>, BudgetError> {
        Ok(self.store.list_incomes(user_id).await?)
    }

    pub async fn add_income(
        &self,
        user_id: Uuid,
        request: RecordRequest,
    ) -> Result<IncomeRecord, BudgetError> {
        validate_record_date(request.date)?;
        Ok(self
            .store
            .create_income(NewIncome {
                user_id,
                title: request.title,
                category: request.category,
                amount: request.amount,
                date: request.date,
            })
            .await?)
    }

    pub async fn update_income(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: RecordRequest,
    ) -> Result<IncomeRecord, BudgetError> {
        validate_record_date(request.date)?;
        let mut record = self.find_income(user_id, id).await?;
        record.title = request.title;
        record.category = request.category;
        record.amount = request.amount;
        record.date = request.date;
        Ok(self.store.update_income(&record).await?)
    }

    pub async fn delete_income(&self, user_id: Uuid, id: Uuid) -> Result<(), BudgetError> {
        self.find_income(user_id, id).await?;
        Ok(self.store.delete_income(id).await?)
    }

    // ===== Expenses =====

    pub async fn list_expenses(&self, user_id: Uuid) -> Result<Vec<ExpenseRecord>, BudgetError> {
        Ok(self.store.list_expenses(user_id).await?)
    }

    /// Record an expense, rejecting amounts past the spendable balance
    pub async fn add_expense(
        &self,
        user_id: Uuid,
        request: RecordRequest,
    ) -> Result<ExpenseRecord, BudgetError> {
        validate_record_date(request.date)?;

        let available = self.spendable_balance(user_id).await?;
        if request.amount > available {
            return Err(BudgetError::InsufficientBalance {
                requested: request.amount,
                available,
            });
        }

        Ok(self
            .store
            .create_expense(NewExpense {
                user_id,
                title: request.title,
                category: request.category,
                amount: request.amount,
                date: request.date,
                note: None,
                loan_id: None,
                payment_id: None,
            })
            .await?)
    }

    pub async fn update_expense(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: RecordRequest,
    ) -> Result<ExpenseRecord, BudgetError> {
        validate_record_date(request.date)?;
        let mut record = self.find_expense(user_id, id).await?;

        // The record being edited does not count against its own ceiling
        let available = self.spendable_balance(user_id).await? + record.amount;
        if request.amount > available {
            return Err(BudgetError::InsufficientBalance {
                requested: request.amount,
                available,
            });
        }

        record.title = request.title;
        record.category = request.category;
        record.amount = request.amount;
        record.date = request.date;
        Ok(self.store.update_expense(&record).await?)
    }

    pub async fn delete_expense(&self, user_id: Uuid, id: Uuid) -> Result<(), BudgetError> {
        self.find_expense(user_id, id).await?;
        Ok(self.store.delete_expense(id).await?)
    }

    // ===== Transfers =====

    pub async fn list_transfers(&self, user_id: Uuid) -> Result<Vec<Transfer>, BudgetError> {
        Ok(self.store.list_transfers(user_id).await?)
    }

    /// Send money to a beneficiary
    ///
    /// Records the transfer first, then logs the matching expense so the
    /// outflow shows up in the budget history. If the second write fails the
    /// error names the stranded transfer.
    pub async fn send_transfer(
        &self,
        user_id: Uuid,
        request: TransferRequest,
    ) -> Result<Transfer, BudgetError> {
        let available = self.available_balance(user_id).await?;
        if request.amount > available {
            return Err(BudgetError::InsufficientBalance {
                requested: request.amount,
                available,
            });
        }

        let today = Utc::now().date_naive();
        let transfer = self
            .store
            .create_transfer(NewTransfer {
                user_id,
                name: request.name.clone(),
                account_number: request.account_number,
                bank_name: request.bank_name,
                amount: request.amount,
                date: today,
            })
            .await?;

        self.store
            .create_expense(NewExpense {
                user_id,
                title: format!("Transfer to {}", request.name),
                category: "Transfer".to_string(),
                amount: request.amount,
                date: today,
                note: Some(format!("Money sent to {}", request.name)),
                loan_id: None,
                payment_id: None,
            })
            .await
            .map_err(|source| {
                tracing::error!(
                    transfer_id = %transfer.id,
                    error = %source,
                    "Companion expense failed after transfer write"
                );
                BudgetError::CompanionExpenseFailed {
                    transfer_id: transfer.id,
                    source,
                }
            })?;

        tracing::info!(
            transfer_id = %transfer.id,
            user_id = %user_id,
            amount = transfer.amount,
            "Transfer sent"
        );
        Ok(transfer)
    }

    pub async fn delete_transfer(&self, user_id: Uuid, id: Uuid) -> Result<(), BudgetError> {
        let transfers = self.store.list_transfers(user_id).await?;
        if !transfers.iter().any(|t| t.id == id) {
            return Err(BudgetError::RecordNotFound);
        }
        Ok(self.store.delete_transfer(id).await?)
    }

    async fn find_income(&self, user_id: Uuid, id: Uuid) -> Result<IncomeRecord, BudgetError> {
        self.store
            .list_incomes(user_id)
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(BudgetError::RecordNotFound)
    }

    async fn find_expense(&self, user_id: Uuid, id: Uuid) -> Result<ExpenseRecord, BudgetError> {
        self.store
            .list_expenses(user_id)
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(BudgetError::RecordNotFound)
    }
}

/// Record dates must not be in the future and must fall within the last
/// thirty days
fn validate_record_date(date: NaiveDate) -> Result<(), BudgetError> {
    let today = Utc::now().date_naive();
    if date > today {
        return Err(BudgetError::InvalidDate(
            "date cannot be in the future".to_string(),
        ));
    }
    if date < today - Duration::days(MAX_RECORD_AGE_DAYS) {
        return Err(BudgetError::InvalidDate(format!(
            "date must be within the last {} days",
            MAX_RECORD_AGE_DAYS
        )));
    }
    Ok(())
}
