//! EMI engine tests
//!
//! Known-value scenarios and input validation for the amortization engine.
//! All amounts are i64 minor currency units.

use chrono::NaiveDate;

use fintrack_server::emi::{compute_schedule, term_months, AmortizationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Known-value scenarios
// ============================================================================

#[test]
fn twelve_percent_over_a_year() {
    // 120000.00 principal, 12%/year, 2024-01-01 to 2025-01-01 (12 months)
    let schedule = compute_schedule(120_000_00, 12.0, date(2024, 1, 1), date(2025, 1, 1)).unwrap();

    assert_eq!(schedule.term_months, 12);
    assert_eq!(schedule.monthly_installment, 10_661_85);
    assert_eq!(schedule.total_payable, 127_942_20);
    assert_eq!(schedule.total_interest, 7_942_20);
}

#[test]
fn zero_interest_splits_principal_exactly() {
    // 12000.00 principal, 0%, 12 months
    let schedule = compute_schedule(12_000_00, 0.0, date(2024, 1, 1), date(2025, 1, 1)).unwrap();

    assert_eq!(schedule.monthly_installment, 1_000_00);
    assert_eq!(schedule.total_payable, 12_000_00);
    assert_eq!(schedule.total_interest, 0);
}

#[test]
fn totals_follow_from_the_rounded_installment() {
    // The derived totals are exact integer products of the rounded
    // installment, so the relation holds with no tolerance at all.
    for (principal, rate, months) in [
        (50_000_00_i64, 8.5, 24_u32),
        (3_333_33, 14.0, 7),
        (1_00, 12.0, 2),
        (9_999_999_99, 6.75, 120),
    ] {
        let start = date(2020, 1, 1);
        let end = date(2020 + (months / 12) as i32, 1 + (months % 12), 1);
        let schedule = compute_schedule(principal, rate, start, end).unwrap();

        assert_eq!(schedule.term_months, months);
        assert_eq!(
            schedule.total_payable,
            schedule.monthly_installment * months as i64
        );
        assert_eq!(
            schedule.total_interest,
            schedule.total_payable - principal
        );
    }
}

#[test]
fn deterministic_across_calls() {
    let compute =
        || compute_schedule(77_777_77, 11.25, date(2023, 5, 1), date(2028, 5, 1)).unwrap();
    assert_eq!(compute(), compute());
}

#[test]
fn interest_grows_with_the_rate() {
    let start = date(2024, 1, 1);
    let end = date(2026, 1, 1);
    let low = compute_schedule(100_000_00, 5.0, start, end).unwrap();
    let high = compute_schedule(100_000_00, 15.0, start, end).unwrap();

    assert!(high.monthly_installment > low.monthly_installment);
    assert!(high.total_interest > low.total_interest);
    assert!(low.total_interest > 0);
}

// ============================================================================
// Term computation
// ============================================================================

#[test]
fn term_counts_calendar_months_only() {
    // Day-of-month is ignored
    assert_eq!(term_months(date(2024, 1, 31), date(2024, 2, 1)), 1);
    assert_eq!(term_months(date(2024, 1, 1), date(2024, 12, 31)), 11);
    assert_eq!(term_months(date(2022, 7, 10), date(2025, 1, 10)), 30);
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn end_before_or_equal_to_start_is_invalid_term() {
    assert_eq!(
        compute_schedule(10_000_00, 10.0, date(2024, 6, 1), date(2024, 6, 30)),
        Err(AmortizationError::InvalidTerm)
    );
    assert_eq!(
        compute_schedule(10_000_00, 10.0, date(2024, 6, 1), date(2024, 5, 1)),
        Err(AmortizationError::InvalidTerm)
    );
}

#[test]
fn non_positive_principal_is_invalid_amount() {
    assert_eq!(
        compute_schedule(0, 10.0, date(2024, 1, 1), date(2025, 1, 1)),
        Err(AmortizationError::InvalidAmount)
    );
}

#[test]
fn negative_rate_is_invalid_rate() {
    assert_eq!(
        compute_schedule(10_000_00, -0.01, date(2024, 1, 1), date(2025, 1, 1)),
        Err(AmortizationError::InvalidRate)
    );
}

#[test]
fn validation_order_checks_amount_first() {
    // Several invalid inputs at once: amount wins, then rate, then term
    assert_eq!(
        compute_schedule(-1, -1.0, date(2025, 1, 1), date(2024, 1, 1)),
        Err(AmortizationError::InvalidAmount)
    );
    assert_eq!(
        compute_schedule(1_00, -1.0, date(2025, 1, 1), date(2024, 1, 1)),
        Err(AmortizationError::InvalidRate)
    );
}
