//! Income, expense and transfer records
//!
//! All monetary amounts are i64 minor currency units (paise/cents).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Income record
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
}

/// New income record, id assigned by the store
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
}

/// Expense record
///
/// `loan_id` and `payment_id` are set only on expenses generated by an
/// installment payment: `loan_id` ties the expense back to the loan for
/// reconciliation, `payment_id` is the idempotency key of the payment
/// operation that produced it.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub loan_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payment_id: Option<Uuid>,
}

/// New expense record, id assigned by the store
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub loan_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payment_id: Option<Uuid>,
}

/// Money transfer to a beneficiary
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub amount: i64,
    pub date: NaiveDate,
}

/// New transfer record, id assigned by the store
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub user_id: Uuid,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub amount: i64,
    pub date: NaiveDate,
}

/// Request payload shared by income and expense entry forms
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub date: NaiveDate,
}

/// Request payload for sending money to a beneficiary
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Account number is required"))]
    pub account_number: String,
    #[validate(length(min = 1, message = "Bank name is required"))]
    pub bank_name: String,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_request_rejects_non_positive_amount() {
        let req = RecordRequest {
            title: "Groceries".to_string(),
            category: "Food".to_string(),
            amount: 0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn expense_wire_format_uses_camel_case() {
        let expense = ExpenseRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "EMI for loan".to_string(),
            category: "Loan EMI".to_string(),
            amount: 1_000_00,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            note: None,
            loan_id: Some(Uuid::new_v4()),
            payment_id: Some(Uuid::new_v4()),
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("loanId").is_some());
        assert!(json.get("paymentId").is_some());
        assert!(json.get("user_id").is_none());
    }
}
