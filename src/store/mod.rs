//! Persistence seam for the remote JSON resource store
//!
//! The backing store is an opaque REST resource store (json-server style):
//! list-by-owner, create, partial update, delete. It offers no cross-record
//! transaction primitive, which is why multi-write operations elsewhere in
//! the crate are explicitly ordered and surface partial failure instead of
//! assuming atomicity.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::loan::{Loan, NewLoan};
use crate::models::{
    ExpenseRecord, IncomeRecord, NewExpense, NewIncome, NewTransfer, NewUser, Transfer, User,
};

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Store-level failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned status {status} for {context}")]
    UnexpectedStatus { status: u16, context: String },

    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("resource not found")]
    NotFound,
}

/// CRUD surface of the finance resource store
///
/// Every owner-scoped read takes the acting user's id explicitly; nothing in
/// the crate reads ambient session state.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    // Users
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn update_user(&self, user: &User) -> Result<User, StoreError>;

    // Incomes
    async fn list_incomes(&self, user_id: Uuid) -> Result<Vec<IncomeRecord>, StoreError>;
    async fn create_income(&self, income: NewIncome) -> Result<IncomeRecord, StoreError>;
    async fn update_income(&self, income: &IncomeRecord) -> Result<IncomeRecord, StoreError>;
    async fn delete_income(&self, id: Uuid) -> Result<(), StoreError>;

    // Expenses
    async fn list_expenses(&self, user_id: Uuid) -> Result<Vec<ExpenseRecord>, StoreError>;
    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord, StoreError>;
    async fn update_expense(&self, expense: &ExpenseRecord) -> Result<ExpenseRecord, StoreError>;
    async fn delete_expense(&self, id: Uuid) -> Result<(), StoreError>;

    // Transfers
    async fn list_transfers(&self, user_id: Uuid) -> Result<Vec<Transfer>, StoreError>;
    async fn create_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StoreError>;
    async fn delete_transfer(&self, id: Uuid) -> Result<(), StoreError>;

    // Loans
    async fn list_loans(&self, user_id: Uuid) -> Result<Vec<Loan>, StoreError>;
    async fn get_loan(&self, id: Uuid) -> Result<Option<Loan>, StoreError>;
    async fn create_loan(&self, loan: NewLoan) -> Result<Loan, StoreError>;
    async fn update_loan_paid_amount(
        &self,
        id: Uuid,
        new_amount_paid: i64,
    ) -> Result<Loan, StoreError>;
}
