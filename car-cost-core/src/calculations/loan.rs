//! Fixed-annuity loan amortization.
//!
//! A loan of principal `P` at yearly rate `r` over `n` years is repaid with a
//! constant yearly payment
//!
//! ```text
//! annuity = r * P / (1 - (1 + r)^-n)
//! ```
//!
//! and a zero-rate loan is repaid in equal parts `P / n`. The outstanding
//! balance is rolled forward one year at a time: interest accrues on the
//! current balance and the rest of the payment reduces it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_cost_core::LoanParameters;
//! use car_cost_core::calculations::LoanAmortizer;
//! use car_cost_core::calculations::common::round_half_up;
//!
//! let loan = LoanAmortizer::new(LoanParameters::new(dec!(20000), dec!(5), 6)).unwrap();
//!
//! assert_eq!(round_half_up(loan.annuity()), dec!(3940.35));
//! assert_eq!(loan.outstanding_debt(0), dec!(20000));
//! assert_eq!(round_half_up(loan.outstanding_debt(6)), dec!(0));
//! assert_eq!(loan.outstanding_debt(7), dec!(0));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::models::LoanParameters;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    #[error("loan principal must be non-negative, got {0}")]
    NegativePrincipal(Decimal),

    #[error("loan duration must be at least one year for a principal of {0}")]
    ZeroDuration(Decimal),

    /// A rate of -100% or less would wipe out or invert the balance.
    #[error("loan rate must be greater than -100%, got {0}%")]
    InvalidRate(Decimal),

    #[error("annuity computation overflowed for {years} years at {rate_percent}%")]
    Overflow { rate_percent: Decimal, years: u32 },
}

/// Amortization schedule of a single loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanAmortizer {
    loan: LoanParameters,
    annuity: Decimal,
}

impl LoanAmortizer {
    /// Validates the loan terms and computes the yearly annuity.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError`] if:
    /// - the principal is negative
    /// - the duration is zero while something is borrowed
    /// - the rate is -100% or lower
    /// - `(1 + rate)^duration` does not fit in a decimal
    pub fn new(loan: LoanParameters) -> Result<Self, LoanError> {
        let annuity = compute_annuity(&loan)?;
        Ok(Self { loan, annuity })
    }

    pub fn parameters(&self) -> &LoanParameters {
        &self.loan
    }

    /// Constant yearly payment, zero when nothing is borrowed.
    pub fn annuity(&self) -> Decimal {
        self.annuity
    }

    /// Whether an annuity is still due in `year` (1-based).
    pub fn is_repaying(
        &self,
        year: u32,
    ) -> bool {
        !self.loan.principal.is_zero() && year >= 1 && year <= self.loan.duration_years
    }

    /// Principal still owed after `at_year` yearly payments.
    ///
    /// Year 0 is the full principal. Past the loan duration the debt is zero.
    pub fn outstanding_debt(
        &self,
        at_year: u32,
    ) -> Decimal {
        if self.loan.principal.is_zero() || at_year > self.loan.duration_years {
            return Decimal::ZERO;
        }

        let rate = self.loan.rate();
        let mut debt = self.loan.principal;
        for _ in 0..at_year {
            debt -= self.annuity - debt * rate;
        }

        non_negative(debt)
    }

    /// Outstanding debt at the end of each of the first `years` years.
    pub fn debt_series(
        &self,
        years: u32,
    ) -> Vec<Decimal> {
        (1..=years).map(|year| self.outstanding_debt(year)).collect()
    }
}

fn compute_annuity(loan: &LoanParameters) -> Result<Decimal, LoanError> {
    if loan.principal < Decimal::ZERO {
        return Err(LoanError::NegativePrincipal(loan.principal));
    }
    if loan.principal.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if loan.duration_years == 0 {
        return Err(LoanError::ZeroDuration(loan.principal));
    }
    if loan.annual_rate_percent <= -Decimal::ONE_HUNDRED {
        return Err(LoanError::InvalidRate(loan.annual_rate_percent));
    }

    let duration = Decimal::from(loan.duration_years);
    let rate = loan.rate();
    if rate.is_zero() {
        debug!(principal = %loan.principal, "zero-rate loan, straight-line repayment");
        return Ok(loan.principal / duration);
    }

    let overflow = || LoanError::Overflow {
        rate_percent: loan.annual_rate_percent,
        years: loan.duration_years,
    };
    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(loan.duration_years))
        .ok_or_else(overflow)?;
    let discount = Decimal::ONE - Decimal::ONE / growth;
    if discount.is_zero() {
        // rate too small to register over the duration
        return Ok(loan.principal / duration);
    }

    let annuity = (rate * loan.principal)
        .checked_div(discount)
        .ok_or_else(overflow)?;
    debug!(principal = %loan.principal, %rate, %annuity, "loan annuity");

    Ok(annuity)
}
