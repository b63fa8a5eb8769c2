//! reqwest-backed client for the remote JSON resource store
//!
//! Wire conventions follow json-server: `GET {base}/{resource}?userId=…`,
//! `POST {base}/{resource}`, `PUT`/`PATCH {base}/{resource}/{id}`,
//! `DELETE {base}/{resource}/{id}`. Record ids are UUIDs minted here at
//! create time and echoed back by the remote.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::loan::{Loan, NewLoan};
use crate::models::{
    ExpenseRecord, IncomeRecord, NewExpense, NewIncome, NewTransfer, NewUser, Transfer, User,
};

use super::{FinanceStore, StoreError};

/// HTTP client for the resource store
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Create a store client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn record_url(&self, resource: &str, id: Uuid) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        user_id: Option<Uuid>,
    ) -> Result<Vec<T>, StoreError> {
        let mut request = self.client.get(self.resource_url(resource));
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id.to_string())]);
        }
        let response = request.send().await?;
        Self::check_status(&response, resource)?;
        Ok(response.json().await?)
    }

    /// POST a new record, minting its id before the write
    async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let mut value = serde_json::to_value(body)?;
        if let Some(record) = value.as_object_mut() {
            record.insert("id".to_string(), json!(Uuid::new_v4()));
        }

        let response = self
            .client
            .post(self.resource_url(resource))
            .json(&value)
            .send()
            .await?;
        Self::check_status(&response, resource)?;
        Ok(response.json().await?)
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: &str,
        id: Uuid,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .put(self.record_url(resource, id))
            .json(body)
            .send()
            .await?;
        Self::check_record_status(&response, resource)?;
        Ok(response.json().await?)
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: &str,
        id: Uuid,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .patch(self.record_url(resource, id))
            .json(body)
            .send()
            .await?;
        Self::check_record_status(&response, resource)?;
        Ok(response.json().await?)
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: Uuid,
    ) -> Result<Option<T>, StoreError> {
        let response = self.client.get(self.record_url(resource, id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check_status(&response, resource)?;
        Ok(Some(response.json().await?))
    }

    async fn delete(&self, resource: &str, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(resource, id))
            .send()
            .await?;
        Self::check_record_status(&response, resource)?;
        Ok(())
    }

    fn check_status(response: &reqwest::Response, resource: &str) -> Result<(), StoreError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                context: resource.to_string(),
            });
        }
        Ok(())
    }

    fn check_record_status(response: &reqwest::Response, resource: &str) -> Result<(), StoreError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        Self::check_status(response, resource)
    }
}

#[async_trait]
impl FinanceStore for RestStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.list("users", None).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.create("users", &user).await
    }

    async fn update_user(&self, user: &User) -> Result<User, StoreError> {
        // PUT serializes through a dedicated body: `User` skips the password
        // on the way out, and a full-record PUT must not erase it.
        let body = json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "password": user.password,
            "createdAt": user.created_at,
        });
        self.put("users", user.id, &body).await
    }

    async fn list_incomes(&self, user_id: Uuid) -> Result<Vec<IncomeRecord>, StoreError> {
        self.list("incomes", Some(user_id)).await
    }

    async fn create_income(&self, income: NewIncome) -> Result<IncomeRecord, StoreError> {
        self.create("incomes", &income).await
    }

    async fn update_income(&self, income: &IncomeRecord) -> Result<IncomeRecord, StoreError> {
        self.put("incomes", income.id, income).await
    }

    async fn delete_income(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete("incomes", id).await
    }

    async fn list_expenses(&self, user_id: Uuid) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.list("expenses", Some(user_id)).await
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord, StoreError> {
        self.create("expenses", &expense).await
    }

    async fn update_expense(&self, expense: &ExpenseRecord) -> Result<ExpenseRecord, StoreError> {
        self.put("expenses", expense.id, expense).await
    }

    async fn delete_expense(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete("expenses", id).await
    }

    async fn list_transfers(&self, user_id: Uuid) -> Result<Vec<Transfer>, StoreError> {
        self.list("transfers", Some(user_id)).await
    }

    async fn create_transfer(&self, transfer: NewTransfer) -> Result<Transfer, StoreError> {
        self.create("transfers", &transfer).await
    }

    async fn delete_transfer(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete("transfers", id).await
    }

    async fn list_loans(&self, user_id: Uuid) -> Result<Vec<Loan>, StoreError> {
        self.list("loans", Some(user_id)).await
    }

    async fn get_loan(&self, id: Uuid) -> Result<Option<Loan>, StoreError> {
        self.get_one("loans", id).await
    }

    async fn create_loan(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        self.create("loans", &loan).await
    }

    async fn update_loan_paid_amount(
        &self,
        id: Uuid,
        new_amount_paid: i64,
    ) -> Result<Loan, StoreError> {
        self.patch("loans", id, &json!({ "amountPaid": new_amount_paid }))
            .await
    }
}
