//! Multi-year cost of ownership projection.
//!
//! The projector turns a [`ProjectionInput`] into year-indexed series. Index
//! `i` of every series is projection year `i + 1`.
//!
//! # Yearly cost rows
//!
//! | Row         | Value |
//! |-------------|-------|
//! | tax         | minus the commute tax benefit, same every year |
//! | financing   | year 1: `price - eco_bonus - resell - loan`; plus the annuity while the loan runs |
//! | insurance   | yearly premium |
//! | maintenance | yearly maintenance cost |
//! | fuel        | `consumption / 100 * fuel_cost * (personal + work distance)` |
//!
//! # Balance series
//!
//! - resale value: `initial_value * r^i` with `r = (value_at_5_years / initial_value)^(1/5)`
//! - debt: principal still owed at the end of the year
//! - patrimony: `resale value - cumulative cost - debt`
//!
//! Every emitted amount is rounded to cents.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_cost_core::ProjectionInput;
//! use car_cost_core::calculations::CostProjector;
//!
//! let projection = CostProjector::default()
//!     .project(&ProjectionInput::default())
//!     .unwrap();
//!
//! assert_eq!(projection.yearly_costs.len(), 10);
//! assert_eq!(projection.yearly_costs[0].financing, dec!(11440.35));
//! assert_eq!(projection.yearly_costs[6].financing, dec!(0));
//! assert_eq!(projection.resale_value_series[0], dec!(28000));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::calculations::deduction_scale::DeductionScaleError;
use crate::calculations::loan::{LoanAmortizer, LoanError};
use crate::calculations::tax_computer::TaxComputer;
use crate::models::{ProjectionInput, YearlyCostRecord};

/// Year of the second resale value observation.
pub const RESALE_OBSERVATION_YEARS: u32 = 5;

/// Errors that abort a projection. No partial series are ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("projection horizon must be at least one year")]
    ZeroHorizon,

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("cannot fit resale value curve from {initial_value} to {value_at_5_years}")]
    ResaleCurve {
        initial_value: Decimal,
        value_at_5_years: Decimal,
    },

    #[error(transparent)]
    Loan(#[from] LoanError),

    #[error(transparent)]
    DeductionScale(#[from] DeductionScaleError),
}

/// Output of [`CostProjector::project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub yearly_costs: Vec<YearlyCostRecord>,
    /// Running total of yearly costs.
    pub cumulative_costs: Vec<Decimal>,
    /// Principal still owed at the end of each year.
    pub debt_series: Vec<Decimal>,
    /// Depreciation curve of the car's market value.
    pub resale_value_series: Vec<Decimal>,
    /// Net worth attributable to the car.
    pub patrimony_series: Vec<Decimal>,
    /// Yearly loan payment.
    pub annuity: Decimal,
    /// Yearly income tax saved by commuting.
    pub commute_tax_benefit: Decimal,
}

impl Projection {
    pub fn years(&self) -> usize {
        self.yearly_costs.len()
    }

    /// Cumulative cost at the end of the horizon.
    pub fn total_cost(&self) -> Decimal {
        self.cumulative_costs.last().copied().unwrap_or_default()
    }
}

/// Cost projection entry point.
#[derive(Debug, Clone, Copy)]
pub struct CostProjector<'a> {
    tax_computer: TaxComputer<'a>,
}

impl<'a> CostProjector<'a> {
    pub fn new(tax_computer: TaxComputer<'a>) -> Self {
        Self { tax_computer }
    }

    /// Projects ownership costs over `input.settings.n_years` years.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if:
    /// - the horizon is zero years
    /// - a money, distance or consumption input is negative
    /// - the loan terms are invalid (see [`LoanError`])
    /// - the resale curve cannot be fitted
    pub fn project(
        &self,
        input: &ProjectionInput,
    ) -> Result<Projection, ProjectionError> {
        validate(input)?;
        let n_years = input.settings.n_years;

        let loan = LoanAmortizer::new(input.financing.loan_parameters())?;
        let annuity = loan.annuity();

        let commute_tax_benefit = self.tax_computer.compute_commute_tax_benefit(
            input.taxes.taxable_revenue,
            input.usage.distance_work,
            input.car_specs.fiscal_power,
            input.car_specs.engine_type,
        )?;

        let up_front = up_front_financing(input);
        let fuel = yearly_fuel_cost(input);
        debug!(
            profile = %input.name,
            %up_front,
            %annuity,
            %fuel,
            %commute_tax_benefit,
            "projection inputs derived"
        );

        // Negating a zero benefit would yield -0, which renders as "-0.00".
        let rounded_benefit = round_half_up(commute_tax_benefit);
        let tax_impact = if rounded_benefit.is_zero() {
            Decimal::ZERO
        } else {
            -rounded_benefit
        };

        let yearly_costs: Vec<YearlyCostRecord> = (1..=n_years)
            .map(|year| {
                let mut financing = Decimal::ZERO;
                if year == 1 {
                    financing += up_front;
                }
                if loan.is_repaying(year) {
                    financing += annuity;
                }
                YearlyCostRecord {
                    year,
                    tax_impact,
                    financing: round_half_up(financing),
                    insurance: round_half_up(input.insurance.insurance_cost),
                    maintenance: round_half_up(input.car_specs.maintenance_cost),
                    fuel: round_half_up(fuel),
                }
            })
            .collect();

        let cumulative_costs: Vec<Decimal> = yearly_costs
            .iter()
            .scan(Decimal::ZERO, |total, record| {
                *total += record.total();
                Some(*total)
            })
            .collect();

        let debt_series: Vec<Decimal> = loan
            .debt_series(n_years)
            .into_iter()
            .map(round_half_up)
            .collect();

        let resale_value_series = resale_value_series(
            input.resale.initial_value,
            input.resale.value_at_5_years,
            n_years,
        )?;

        let patrimony_series = resale_value_series
            .iter()
            .zip(&cumulative_costs)
            .zip(&debt_series)
            .map(|((resale, cost), debt)| resale - cost - debt)
            .collect();

        Ok(Projection {
            yearly_costs,
            cumulative_costs,
            debt_series,
            resale_value_series,
            patrimony_series,
            annuity: round_half_up(annuity),
            commute_tax_benefit: rounded_benefit,
        })
    }
}

impl Default for CostProjector<'static> {
    fn default() -> Self {
        Self::new(TaxComputer::default())
    }
}

fn validate(input: &ProjectionInput) -> Result<(), ProjectionError> {
    if input.settings.n_years == 0 {
        return Err(ProjectionError::ZeroHorizon);
    }

    let amounts = [
        ("price", input.financing.price),
        ("eco_bonus", input.financing.eco_bonus),
        ("resell", input.financing.resell),
        ("fuel_consumption", input.car_specs.fuel_consumption),
        ("maintenance_cost", input.car_specs.maintenance_cost),
        ("insurance_cost", input.insurance.insurance_cost),
        ("fuel_cost", input.energy.fuel_cost),
        ("distance_personal", input.usage.distance_personal),
        ("distance_work", input.usage.distance_work),
        ("initial_value", input.resale.initial_value),
        ("value_at_5_years", input.resale.value_at_5_years),
        ("taxable_revenue", input.taxes.taxable_revenue),
    ];
    if let Some((field, value)) = amounts.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
        return Err(ProjectionError::NegativeAmount { field, value });
    }

    Ok(())
}

/// Cash paid on purchase day beyond what the loan covers.
fn up_front_financing(input: &ProjectionInput) -> Decimal {
    let financing = &input.financing;
    financing.price - financing.eco_bonus - financing.resell - financing.loan
}

fn yearly_fuel_cost(input: &ProjectionInput) -> Decimal {
    input.car_specs.fuel_consumption / Decimal::ONE_HUNDRED
        * input.energy.fuel_cost
        * input.usage.total_distance()
}

/// Resale value at the start of each projection year, fitted as a geometric
/// decay through the two observations.
pub fn resale_value_series(
    initial_value: Decimal,
    value_at_5_years: Decimal,
    n_years: u32,
) -> Result<Vec<Decimal>, ProjectionError> {
    let curve_error = || ProjectionError::ResaleCurve {
        initial_value,
        value_at_5_years,
    };

    if initial_value.is_zero() {
        return Ok(vec![Decimal::ZERO; n_years as usize]);
    }
    if value_at_5_years > initial_value {
        warn!(
            %initial_value,
            %value_at_5_years,
            "resale value grows over time; curve will appreciate"
        );
    }

    let ratio = (value_at_5_years / initial_value)
        .to_f64()
        .ok_or_else(curve_error)?;
    let retention = Decimal::from_f64(ratio.powf(1.0 / f64::from(RESALE_OBSERVATION_YEARS)))
        .ok_or_else(curve_error)?;

    (0..n_years)
        .map(|index| {
            retention
                .checked_powu(u64::from(index))
                .and_then(|factor| initial_value.checked_mul(factor))
                .map(round_half_up)
                .ok_or_else(curve_error)
        })
        .collect()
}
