//! Small helpers shared by the cost calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use car_cost_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3940.3493)), dec!(3940.35));
/// assert_eq!(round_half_up(dec!(-186.645)), dec!(-186.65));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value` or zero, whichever is larger.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Applies a rate expressed in percent: `percent_of(200, 5) == 10`.
pub fn percent_of(
    value: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    value * rate_percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
        assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_half_up_truncates_below_midpoint() {
        assert_eq!(round_half_up(dec!(431.8448)), dec!(431.84));
    }

    #[test]
    fn round_half_up_flushes_tiny_residuals_to_zero() {
        assert_eq!(round_half_up(dec!(0.0000000000127)), dec!(0.00));
    }

    #[test]
    fn non_negative_clamps_negative_values() {
        assert_eq!(non_negative(dec!(-12.5)), dec!(0));
        assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
    }

    #[test]
    fn percent_of_scales_by_hundredths() {
        assert_eq!(percent_of(dec!(26402), dec!(11)), dec!(2904.22));
        assert_eq!(percent_of(dec!(1000), dec!(0)), dec!(0));
    }
}
