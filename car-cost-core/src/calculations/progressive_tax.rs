//! Progressive (marginal-rate) income tax.
//!
//! Each bracket taxes only the slice of income that falls between its lower
//! and upper bound:
//!
//! ```text
//! portion = max(0, min(upper, amount) - lower) * rate / 100
//! tax     = sum of portions
//! ```
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_cost_core::calculations::ProgressiveTaxCalculator;
//!
//! let calculator = ProgressiveTaxCalculator::default();
//!
//! assert_eq!(calculator.compute_tax(dec!(1077)), dec!(0));
//! assert_eq!(calculator.compute_tax(dec!(27479)), dec!(2904.22));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, percent_of};
use crate::models::{DEFAULT_TAX_SCHEDULE, TaxBracket};

/// Applies a tax schedule to taxable amounts.
///
/// The schedule is expected to be sorted by `lower_bound`, contiguous, and to
/// end with an unbounded bracket; see [`is_contiguous`].
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTaxCalculator<'a> {
    schedule: &'a [TaxBracket],
}

impl<'a> ProgressiveTaxCalculator<'a> {
    /// Wraps a contiguous schedule.
    ///
    /// # Panics
    ///
    /// In debug builds, if `schedule` fails [`is_contiguous`]. Schedules with
    /// gaps or without an unbounded top bracket can still be applied with the
    /// free function [`compute_tax`], which taxes only the covered slices.
    pub fn new(schedule: &'a [TaxBracket]) -> Self {
        debug_assert!(is_contiguous(schedule), "tax schedule has gaps or overlaps");
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a [TaxBracket] {
        self.schedule
    }

    /// Tax due on `amount`. Negative amounts owe nothing.
    pub fn compute_tax(
        &self,
        amount: Decimal,
    ) -> Decimal {
        compute_tax(amount, self.schedule)
    }
}

impl Default for ProgressiveTaxCalculator<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_TAX_SCHEDULE)
    }
}

/// Sum of the taxed portions of `amount` over every bracket of `schedule`.
pub fn compute_tax(
    amount: Decimal,
    schedule: &[TaxBracket],
) -> Decimal {
    schedule
        .iter()
        .map(|bracket| taxed_portion(bracket, amount))
        .sum()
}

fn taxed_portion(
    bracket: &TaxBracket,
    amount: Decimal,
) -> Decimal {
    let ceiling = bracket.upper_bound.map_or(amount, |upper| upper.min(amount));
    percent_of(
        non_negative(ceiling - bracket.lower_bound),
        bracket.marginal_rate_percent,
    )
}

/// True when the brackets start at zero, touch end to end, and only the last
/// one is unbounded.
pub fn is_contiguous(schedule: &[TaxBracket]) -> bool {
    let Some(first) = schedule.first() else {
        return false;
    };
    if first.lower_bound != Decimal::ZERO {
        return false;
    }

    let mut expected_lower = Decimal::ZERO;
    for (index, bracket) in schedule.iter().enumerate() {
        if bracket.lower_bound != expected_lower {
            return false;
        }
        match bracket.upper_bound {
            Some(upper) if upper > bracket.lower_bound => expected_lower = upper,
            Some(_) => return false,
            None => return index == schedule.len() - 1,
        }
    }

    false
}
