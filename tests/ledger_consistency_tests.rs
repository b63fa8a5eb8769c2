//! Repayment ledger consistency tests
//!
//! Exercise the two-write installment payment against an in-memory store,
//! including the partial-failure path where the expense write lands but the
//! ledger update does not.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use fintrack_server::loan::{CreateLoanRequest, LoanStatus, NewLoan};
use fintrack_server::loan_service::{LedgerError, LoanService, EMI_EXPENSE_CATEGORY};
use fintrack_server::store::{FinanceStore, MemoryStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Zero-interest loan request: 12000.00 over 12 months, 1000.00 installment
fn flat_loan_request() -> CreateLoanRequest {
    CreateLoanRequest {
        principal: 12_000_00,
        annual_interest_rate: 0.0,
        start_date: date(2024, 1, 1),
        end_date: date(2025, 1, 1),
        category: "Bike".to_string(),
    }
}

fn service() -> (Arc<MemoryStore>, LoanService) {
    let store = Arc::new(MemoryStore::new());
    let service = LoanService::new(store.clone());
    (store, service)
}

// ============================================================================
// Loan creation
// ============================================================================

#[tokio::test]
async fn create_loan_derives_schedule_fields() {
    let (_, service) = service();
    let user_id = Uuid::new_v4();

    let loan = service
        .create_loan(
            user_id,
            CreateLoanRequest {
                principal: 120_000_00,
                annual_interest_rate: 12.0,
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
                category: "Car".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(loan.user_id, user_id);
    assert_eq!(loan.monthly_installment, 10_661_85);
    assert_eq!(loan.total_payable, 127_942_20);
    assert_eq!(loan.total_interest, 7_942_20);
    assert_eq!(loan.amount_paid, 0);
    assert_eq!(loan.status(), LoanStatus::Active);
}

#[tokio::test]
async fn create_loan_rejects_invalid_term_before_any_write() {
    let (store, service) = service();
    let user_id = Uuid::new_v4();

    let result = service
        .create_loan(
            user_id,
            CreateLoanRequest {
                principal: 10_000_00,
                annual_interest_rate: 10.0,
                start_date: date(2024, 6, 1),
                end_date: date(2024, 6, 1),
                category: "Phone".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(LedgerError::Amortization(_))));
    assert!(store.list_loans(user_id).await.unwrap().is_empty());
}

// ============================================================================
// Installment payments
// ============================================================================

#[tokio::test]
async fn paying_every_installment_lands_exactly_on_paid_off() {
    let (store, service) = service();
    let user_id = Uuid::new_v4();
    let loan = service
        .create_loan(user_id, flat_loan_request())
        .await
        .unwrap();

    for n in 1..=12 {
        let receipt = service.pay_installment(user_id, loan.id).await.unwrap();
        assert_eq!(receipt.amount, 1_000_00);
        assert_eq!(receipt.amount_paid, n * 1_000_00);
        // Invariant after every step
        assert!(receipt.amount_paid <= receipt.total_payable);
    }

    let paid = service.get_loan(user_id, loan.id).await.unwrap();
    assert_eq!(paid.amount_paid, paid.total_payable);
    assert_eq!(paid.status(), LoanStatus::PaidOff);

    // One expense per installment, tagged with the loan
    let expenses = store.list_expenses(user_id).await.unwrap();
    assert_eq!(expenses.len(), 12);
    for expense in &expenses {
        assert_eq!(expense.category, EMI_EXPENSE_CATEGORY);
        assert_eq!(expense.loan_id, Some(loan.id));
        assert!(expense.payment_id.is_some());
    }
}

#[tokio::test]
async fn paid_off_loan_rejects_further_payments() {
    let (store, service) = service();
    let user_id = Uuid::new_v4();
    let loan = service
        .create_loan(user_id, flat_loan_request())
        .await
        .unwrap();

    for _ in 0..12 {
        service.pay_installment(user_id, loan.id).await.unwrap();
    }

    let result = service.pay_installment(user_id, loan.id).await;
    assert!(matches!(
        result,
        Err(LedgerError::OverpaymentRejected { .. })
    ));

    // Rejected payment leaves no trace
    assert_eq!(store.list_expenses(user_id).await.unwrap().len(), 12);
    let loan = service.get_loan(user_id, loan.id).await.unwrap();
    assert_eq!(loan.amount_paid, loan.total_payable);
}

#[tokio::test]
async fn partial_installment_room_is_an_overpayment() {
    // 11500.00 already paid of 12000.00, installment 1000.00: rejected
    let (store, service) = service();
    let user_id = Uuid::new_v4();

    let loan = store
        .create_loan(NewLoan {
            user_id,
            principal: 11_000_00,
            annual_interest_rate: 10.0,
            start_date: date(2024, 1, 1),
            end_date: date(2025, 1, 1),
            category: "Laptop".to_string(),
            monthly_installment: 1_000_00,
            total_payable: 12_000_00,
            total_interest: 1_000_00,
            amount_paid: 11_500_00,
        })
        .await
        .unwrap();

    let result = service.pay_installment(user_id, loan.id).await;
    match result {
        Err(LedgerError::OverpaymentRejected {
            amount_paid,
            monthly_installment,
            total_payable,
        }) => {
            assert_eq!(amount_paid, 11_500_00);
            assert_eq!(monthly_installment, 1_000_00);
            assert_eq!(total_payable, 12_000_00);
        }
        other => panic!("expected OverpaymentRejected, got {:?}", other),
    }

    // No writes happened
    assert!(store.list_expenses(user_id).await.unwrap().is_empty());
    let unchanged = service.get_loan(user_id, loan.id).await.unwrap();
    assert_eq!(unchanged.amount_paid, 11_500_00);
}

#[tokio::test]
async fn loans_of_other_users_are_invisible() {
    let (_, service) = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let loan = service
        .create_loan(owner, flat_loan_request())
        .await
        .unwrap();

    assert!(matches!(
        service.get_loan(stranger, loan.id).await,
        Err(LedgerError::LoanNotFound)
    ));
    assert!(matches!(
        service.pay_installment(stranger, loan.id).await,
        Err(LedgerError::LoanNotFound)
    ));
}

// ============================================================================
// Partial failure between the two writes
// ============================================================================

#[tokio::test]
async fn ledger_failure_after_expense_write_is_surfaced_as_desync() {
    let (store, service) = service();
    let user_id = Uuid::new_v4();
    let loan = service
        .create_loan(user_id, flat_loan_request())
        .await
        .unwrap();

    store.fail_next_loan_update();
    let result = service.pay_installment(user_id, loan.id).await;

    let (payment_id, expense_id) = match result {
        Err(LedgerError::LedgerDesynced {
            payment_id,
            expense_id,
            ..
        }) => (payment_id, expense_id),
        other => panic!("expected LedgerDesynced, got {:?}", other),
    };

    // The expense write landed and the error names it
    let expenses = store.list_expenses(user_id).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, expense_id);
    assert_eq!(expenses[0].payment_id, Some(payment_id));

    // The ledger did not advance
    let loan = service.get_loan(user_id, loan.id).await.unwrap();
    assert_eq!(loan.amount_paid, 0);
}

#[tokio::test]
async fn reconcile_reports_drift_after_a_desync() {
    let (store, service) = service();
    let user_id = Uuid::new_v4();
    let loan = service
        .create_loan(user_id, flat_loan_request())
        .await
        .unwrap();

    // One clean payment, then one that loses its ledger write
    service.pay_installment(user_id, loan.id).await.unwrap();
    store.fail_next_loan_update();
    let _ = service.pay_installment(user_id, loan.id).await;

    let report = service.reconcile(user_id, loan.id).await.unwrap();
    assert_eq!(report.logged_expenses, 2_000_00);
    assert_eq!(report.amount_paid, 1_000_00);
    assert_eq!(report.drift, 1_000_00);
    assert!(!report.consistent);
}

#[tokio::test]
async fn reconcile_is_clean_after_successful_payments() {
    let (_, service) = service();
    let user_id = Uuid::new_v4();
    let loan = service
        .create_loan(user_id, flat_loan_request())
        .await
        .unwrap();

    for _ in 0..3 {
        service.pay_installment(user_id, loan.id).await.unwrap();
    }

    let report = service.reconcile(user_id, loan.id).await.unwrap();
    assert_eq!(report.logged_expenses, 3_000_00);
    assert_eq!(report.amount_paid, 3_000_00);
    assert_eq!(report.drift, 0);
    assert!(report.consistent);
}
