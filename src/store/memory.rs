//! In-process implementation of the finance store
//!
//! Backs unit and integration tests. Keeps records in insertion order and
//! supports injecting a single failed loan-ledger write to exercise the
//! partial-failure path of installment payments.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::loan::{Loan, NewLoan};
use crate::models::{
    ExpenseRecord, IncomeRecord, NewExpense, NewIncome, NewTransfer, NewUser, Transfer, User,
};

use super::{FinanceStore, StoreError};

/// In-memory resource store
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    incomes: RwLock<Vec<IncomeRecord>>,
    expenses: RwLock<Vec<ExpenseRecord>>,
    transfers: RwLock<Vec<Transfer>>,
    loans: RwLock<Vec<Loan>>,
    fail_next_loan_update: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `update_loan_paid_amount` call fail with a store error
    ///
    /// Simulates the remote store going away between the two writes of an
    /// installment payment.
    pub fn fail_next_loan_update(&self) {
        self.fail_next_loan_update.store(true, Ordering::SeqCst);
    }

    fn injected_failure(context: &str) -> StoreError {
        StoreError::UnexpectedStatus {
            status: 503,
            context: context.to_string(),
        }
    }
}

#[async_trait]
impl FinanceStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: user.created_at,
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound)?;
        *stored = user.clone();
        Ok(stored.clone())
    }

    async fn list_incomes(&self, user_id: Uuid) -> Result<Vec<IncomeRecord>, StoreError> {
        Ok(self
            .incomes
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_income(&self, income: NewIncome) -> Result<IncomeRecord, StoreError> {
        let record = IncomeRecord {
            id: Uuid::new_v4(),
            user_id: income.user_id,
            title: income.title,
            category: income.category,
            amount: income.amount,
            date: income.date,
        };
        self.incomes.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_income(&self, income: &IncomeRecord) -> Result<IncomeRecord, StoreError> {
        let mut incomes = self.incomes.write().await;
        let stored = incomes
            .iter_mut()
            .find(|r| r.id == income.id)
            .ok_or(StoreError::NotFound)?;
        *stored = income.clone();
        Ok(stored.clone())
    }

    async fn delete_income(&self, id: Uuid) -> Result<(), StoreError> {
        let mut incomes = self.incomes.write().await;
        let before = incomes.len();
        incomes.retain(|r| r.id != id);
        if incomes.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_expenses(&self, user_id: Uuid) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self
            .expenses
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord, StoreError> {
        let record = ExpenseRecord {
            id: Uuid::new_v4(),
            user_id: expense.user_id,
            title: expense.title,
            category: expense.category,
            amount: expense.amount,
            date: expense.date,
            note: expense.note,
            loan_id: expense.loan_id,
            payment_id: expense.payment_id,
        };
        self.expenses.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_expense(&self, expense: &ExpenseRecord) -> Result<ExpenseRecord, StoreError> {
        let mut expenses = self.expenses.write().await;
        let stored = expenses
            .iter_mut()
            .find(|r| r.id == expense.id)
            .ok_or(StoreError::NotFound)?;
        *stored = expense.clone();
        Ok(stored.clone())
    }

    async fn delete_expense(&self, id: Uuid) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        let before = expenses.len();
        expenses.retain(|r| r.id != id);
        if expenses.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_transfers(&self, user_id: Uuid) -> Result<Vec<Transfer>, StoreError> {
        Ok(self
            .transfers
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StoreError> {
        let record = Transfer {
            id: Uuid::new_v4(),
            user_id: transfer.user_id,
            name: transfer.name,
            account_number: transfer.account_number,
            bank_name: transfer.bank_name,
            amount: transfer.amount,
            date: transfer.date,
        };
        self.transfers.write().await.push(record.clone());
        Ok(record)
    }

    async fn delete_transfer(&self, id: Uuid) -> Result<(), StoreError> {
        let mut transfers = self.transfers.write().await;
        let before = transfers.len();
        transfers.retain(|r| r.id != id);
        if transfers.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_loans(&self, user_id: Uuid) -> Result<Vec<Loan>, StoreError> {
        Ok(self
            .loans
            .read()
            .await
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_loan(&self, id: Uuid) -> Result<Option<Loan>, StoreError> {
        Ok(self.loans.read().await.iter().find(|l| l.id == id).cloned())
    }

    async fn create_loan(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        let record = Loan {
            id: Uuid::new_v4(),
            user_id: loan.user_id,
            principal: loan.principal,
            annual_interest_rate: loan.annual_interest_rate,
            start_date: loan.start_date,
            end_date: loan.end_date,
            category: loan.category,
            monthly_installment: loan.monthly_installment,
            total_payable: loan.total_payable,
            total_interest: loan.total_interest,
            amount_paid: loan.amount_paid,
        };
        self.loans.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_loan_paid_amount(
        &self,
        id: Uuid,
        new_amount_paid: i64,
    ) -> Result<Loan, StoreError> {
        if self.fail_next_loan_update.swap(false, Ordering::SeqCst) {
            return Err(Self::injected_failure("loans"));
        }

        let mut loans = self.loans.write().await;
        let loan = loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound)?;
        loan.amount_paid = new_amount_paid;
        Ok(loan.clone())
    }
}
