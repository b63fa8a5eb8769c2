//! Loan amortization (EMI) engine
//!
//! Pure computation of the monthly installment, total payable and total
//! interest for a loan, using the standard reducing-balance EMI formula.
//! No side effects; the caller persists the derived values on the loan.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input validation failures of the amortization engine
///
/// All of these are reported synchronously before any persistence attempt;
/// they are never retried and never partial.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmortizationError {
    #[error("principal must be positive")]
    InvalidAmount,

    #[error("interest rate must be non-negative")]
    InvalidRate,

    #[error("loan term must be at least one month")]
    InvalidTerm,
}

/// Derived repayment figures for a loan
///
/// All monetary values are i64 minor currency units, rounded half-up at the
/// minor-unit boundary. `total_payable` is the exact integer product of the
/// rounded installment and the term, so a loan paid one installment at a
/// time lands on `amount_paid == total_payable` with no residue.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentSchedule {
    pub monthly_installment: i64,
    pub total_payable: i64,
    pub total_interest: i64,
    pub term_months: u32,
}

/// Number of whole calendar months between two dates
///
/// Year difference times twelve plus month difference; the day of month is
/// ignored. A term that is zero or negative is rejected by
/// [`compute_schedule`].
pub fn term_months(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// Round a minor-unit amount half-up to the nearest whole minor unit
fn round_half_up(minor: f64) -> i64 {
    (minor + 0.5).floor() as i64
}

/// Compute the repayment schedule for a loan
///
/// `principal` is in minor currency units; `annual_rate_pct` is a percentage
/// (12 means 12%/year). The monthly installment follows the reducing-balance
/// formula `P * r * (1+r)^n / ((1+r)^n - 1)` with `r = rate / 12 / 100`,
/// degenerating to `P / n` at zero interest.
pub fn compute_schedule(
    principal: i64,
    annual_rate_pct: f64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RepaymentSchedule, AmortizationError> {
    if principal <= 0 {
        return Err(AmortizationError::InvalidAmount);
    }
    if !annual_rate_pct.is_finite() || annual_rate_pct < 0.0 {
        return Err(AmortizationError::InvalidRate);
    }
    let term = term_months(start, end);
    if term <= 0 {
        return Err(AmortizationError::InvalidTerm);
    }
    let term = term as u32;

    let monthly_rate = annual_rate_pct / 12.0 / 100.0;
    let principal_minor = principal as f64;

    let raw_installment = if monthly_rate == 0.0 {
        principal_minor / term as f64
    } else {
        let growth = (1.0 + monthly_rate).powi(term as i32);
        principal_minor * monthly_rate * growth / (growth - 1.0)
    };

    let monthly_installment = round_half_up(raw_installment);
    let total_payable = monthly_installment * term as i64;
    let total_interest = total_payable - principal;

    Ok(RepaymentSchedule {
        monthly_installment,
        total_payable,
        total_interest,
        term_months: term,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn term_ignores_day_of_month() {
        assert_eq!(term_months(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(term_months(date(2024, 1, 1), date(2025, 1, 1)), 12);
        assert_eq!(term_months(date(2024, 3, 15), date(2026, 9, 2)), 30);
    }

    #[test]
    fn term_can_be_negative() {
        assert_eq!(term_months(date(2025, 1, 1), date(2024, 1, 1)), -12);
    }

    #[test]
    fn rejects_non_positive_principal() {
        assert_eq!(
            compute_schedule(0, 12.0, date(2024, 1, 1), date(2025, 1, 1)),
            Err(AmortizationError::InvalidAmount)
        );
        assert_eq!(
            compute_schedule(-5_000_00, 12.0, date(2024, 1, 1), date(2025, 1, 1)),
            Err(AmortizationError::InvalidAmount)
        );
    }

    #[test]
    fn rejects_negative_or_non_finite_rate() {
        assert_eq!(
            compute_schedule(1_000_00, -1.0, date(2024, 1, 1), date(2025, 1, 1)),
            Err(AmortizationError::InvalidRate)
        );
        assert_eq!(
            compute_schedule(1_000_00, f64::NAN, date(2024, 1, 1), date(2025, 1, 1)),
            Err(AmortizationError::InvalidRate)
        );
    }

    #[test]
    fn rejects_end_not_after_start() {
        assert_eq!(
            compute_schedule(1_000_00, 12.0, date(2024, 1, 1), date(2024, 1, 1)),
            Err(AmortizationError::InvalidTerm)
        );
        assert_eq!(
            compute_schedule(1_000_00, 12.0, date(2024, 6, 1), date(2024, 1, 1)),
            Err(AmortizationError::InvalidTerm)
        );
    }

    #[test]
    fn zero_rate_divides_principal_evenly() {
        let schedule =
            compute_schedule(12_000_00, 0.0, date(2024, 1, 1), date(2025, 1, 1)).unwrap();
        assert_eq!(schedule.monthly_installment, 1_000_00);
        assert_eq!(schedule.total_payable, 12_000_00);
        assert_eq!(schedule.total_interest, 0);
        assert_eq!(schedule.term_months, 12);
    }

    #[test]
    fn reducing_balance_twelve_percent_over_a_year() {
        // 120000.00 at 12%/year over 12 months
        let schedule =
            compute_schedule(120_000_00, 12.0, date(2024, 1, 1), date(2025, 1, 1)).unwrap();
        assert_eq!(schedule.monthly_installment, 10_661_85);
        assert_eq!(schedule.total_payable, 127_942_20);
        assert_eq!(schedule.total_interest, 7_942_20);
    }

    #[test]
    fn total_payable_is_installment_times_term() {
        let schedule =
            compute_schedule(98_765_43, 9.5, date(2023, 2, 1), date(2026, 8, 1)).unwrap();
        assert_eq!(
            schedule.total_payable,
            schedule.monthly_installment * schedule.term_months as i64
        );
        assert_eq!(
            schedule.total_interest,
            schedule.total_payable - 98_765_43
        );
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = compute_schedule(55_000_00, 7.25, date(2024, 4, 1), date(2027, 4, 1)).unwrap();
        let b = compute_schedule(55_000_00, 7.25, date(2024, 4, 1), date(2027, 4, 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn round_half_up_at_the_boundary() {
        assert_eq!(round_half_up(10.5), 11);
        assert_eq!(round_half_up(10.49), 10);
        assert_eq!(round_half_up(10.0), 10);
    }
}
