//! Commute deduction from the mileage allowance scale.
//!
//! Taxpayers who drive to work may deduct their actual car expenses instead
//! of the 10% flat-rate allowance. The mileage scale turns the yearly work
//! distance into a deduction with a linear formula `a * distance + b`, where
//! the coefficients depend on the distance band and the fiscal power of the
//! car.
//!
//! | Distance (km/year)  | Band     |
//! |---------------------|----------|
//! | `[0, 5000)`         | short    |
//! | `[5000, 20000)`     | medium   |
//! | `[20000, ∞)`        | long     |
//!
//! | Fiscal power (CV) | Band |
//! |-------------------|------|
//! | 3 and under       | P1   |
//! | 4                 | P2   |
//! | 5                 | P3   |
//! | 6                 | P4   |
//! | 7 and over        | P5   |
//!
//! Electric cars get 20% more. The adjusted revenue is never higher than what
//! the flat-rate allowance would leave (90% of the revenue) and never
//! negative.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_cost_core::EngineType;
//! use car_cost_core::calculations::DeductionScale;
//!
//! let scale = DeductionScale::default();
//! let adjusted = scale
//!     .compute_deduction(dec!(30000), dec!(7600), 4, EngineType::Electric)
//!     .unwrap();
//!
//! // (0.340 * 7600 + 1330) * 1.2 = 4696.8
//! assert_eq!(adjusted, dec!(25303.2));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::models::{DEDUCTION_SCALE, DeductionBand, DistanceBand, EngineType, PowerBand};

/// Lower bound of the medium distance band, in km per year.
pub const MEDIUM_DISTANCE_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Lower bound of the long distance band, in km per year.
pub const LONG_DISTANCE_THRESHOLD: Decimal = Decimal::from_parts(20000, 0, 0, false, 0);

/// Multiplier applied to the deduction of electric cars.
pub const ELECTRIC_BONUS_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Share of the revenue left taxable by the 10% flat-rate allowance.
pub const FLAT_RATE_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionScaleError {
    #[error("work distance must be non-negative, got {0}")]
    NegativeDistance(Decimal),

    /// The scale has no row for a band pair. The shipped scale covers all 15
    /// pairs, so this points at a broken table.
    #[error("no deduction scale entry for distance band {distance_band:?} and power band {power_band:?}")]
    ScaleEntryNotFound {
        distance_band: DistanceBand,
        power_band: PowerBand,
    },
}

/// Selects the distance band for a yearly work distance.
///
/// Bands are closed-open, so exactly 5 000 km is medium and exactly
/// 20 000 km is long.
pub fn distance_band(work_distance: Decimal) -> Result<DistanceBand, DeductionScaleError> {
    if work_distance < Decimal::ZERO {
        return Err(DeductionScaleError::NegativeDistance(work_distance));
    }

    let band = if work_distance < MEDIUM_DISTANCE_THRESHOLD {
        DistanceBand::Short
    } else if work_distance < LONG_DISTANCE_THRESHOLD {
        DistanceBand::Medium
    } else {
        DistanceBand::Long
    };
    Ok(band)
}

/// Selects the power band for a fiscal power. Everything from 7 CV up is P5.
pub fn power_band(fiscal_power: u32) -> PowerBand {
    match fiscal_power {
        0..=3 => PowerBand::P1,
        4 => PowerBand::P2,
        5 => PowerBand::P3,
        6 => PowerBand::P4,
        _ => PowerBand::P5,
    }
}

/// Mileage allowance scale lookup.
#[derive(Debug, Clone, Copy)]
pub struct DeductionScale<'a> {
    table: &'a [DeductionBand],
}

impl<'a> DeductionScale<'a> {
    pub fn new(table: &'a [DeductionBand]) -> Self {
        Self { table }
    }

    /// Finds the scale row for a band pair.
    pub fn lookup(
        &self,
        distance_band: DistanceBand,
        power_band: PowerBand,
    ) -> Result<&'a DeductionBand, DeductionScaleError> {
        self.table
            .iter()
            .find(|row| row.distance_band == distance_band && row.power_band == power_band)
            .ok_or(DeductionScaleError::ScaleEntryNotFound {
                distance_band,
                power_band,
            })
    }

    /// Yearly deduction earned by commuting `work_distance` km, including
    /// the electric bonus.
    pub fn deduction_amount(
        &self,
        work_distance: Decimal,
        fiscal_power: u32,
        engine_type: EngineType,
    ) -> Result<Decimal, DeductionScaleError> {
        let distance_band = distance_band(work_distance)?;
        let power_band = power_band(fiscal_power);
        let row = self.lookup(distance_band, power_band)?;

        let mut deduction = row.coefficient_a * work_distance + row.coefficient_b;
        if engine_type.is_electric() {
            deduction *= ELECTRIC_BONUS_FACTOR;
        }

        debug!(
            %work_distance,
            ?distance_band,
            ?power_band,
            engine = engine_type.as_str(),
            %deduction,
            "mileage scale deduction"
        );

        Ok(deduction)
    }

    /// Taxable revenue left after deducting commute expenses.
    ///
    /// The result is the smaller of the scale-based revenue and the
    /// flat-rate revenue (`taxable_revenue * 0.9`), clamped at zero.
    pub fn compute_deduction(
        &self,
        taxable_revenue: Decimal,
        work_distance: Decimal,
        fiscal_power: u32,
        engine_type: EngineType,
    ) -> Result<Decimal, DeductionScaleError> {
        let deduction = self.deduction_amount(work_distance, fiscal_power, engine_type)?;

        let scale_revenue = taxable_revenue - deduction;
        let flat_rate_revenue = taxable_revenue * FLAT_RATE_FACTOR;

        Ok(non_negative(scale_revenue.min(flat_rate_revenue)))
    }
}

impl Default for DeductionScale<'static> {
    fn default() -> Self {
        Self::new(&DEDUCTION_SCALE)
    }
}
