//! Income tax saved by commuting with the car.
//!
//! The benefit is the difference between the tax owed without any commute
//! (flat-rate allowance only) and the tax owed once the mileage scale
//! deduction is applied.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::calculations::deduction_scale::{DeductionScale, DeductionScaleError};
use crate::calculations::progressive_tax::ProgressiveTaxCalculator;
use crate::models::EngineType;

/// Combines the mileage scale with a tax schedule.
#[derive(Debug, Clone, Copy)]
pub struct TaxComputer<'a> {
    deduction_scale: DeductionScale<'a>,
    tax_calculator: ProgressiveTaxCalculator<'a>,
}

impl<'a> TaxComputer<'a> {
    pub fn new(
        deduction_scale: DeductionScale<'a>,
        tax_calculator: ProgressiveTaxCalculator<'a>,
    ) -> Self {
        Self {
            deduction_scale,
            tax_calculator,
        }
    }

    /// Income tax owed after the commute deduction for `work_distance`.
    pub fn compute_tax(
        &self,
        taxable_revenue: Decimal,
        work_distance: Decimal,
        fiscal_power: u32,
        engine_type: EngineType,
    ) -> Result<Decimal, DeductionScaleError> {
        let net_revenue = self.deduction_scale.compute_deduction(
            taxable_revenue,
            work_distance,
            fiscal_power,
            engine_type,
        )?;
        Ok(self.tax_calculator.compute_tax(net_revenue))
    }

    /// Yearly tax saved thanks to the commute, never negative.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use car_cost_core::EngineType;
    /// use car_cost_core::calculations::TaxComputer;
    ///
    /// let benefit = TaxComputer::default()
    ///     .compute_commute_tax_benefit(dec!(30000), dec!(7600), 4, EngineType::Electric)
    ///     .unwrap();
    ///
    /// assert_eq!(benefit, dec!(186.648));
    /// ```
    pub fn compute_commute_tax_benefit(
        &self,
        taxable_revenue: Decimal,
        work_distance: Decimal,
        fiscal_power: u32,
        engine_type: EngineType,
    ) -> Result<Decimal, DeductionScaleError> {
        let net_tax = self.compute_tax(taxable_revenue, work_distance, fiscal_power, engine_type)?;
        let baseline_tax =
            self.compute_tax(taxable_revenue, Decimal::ZERO, fiscal_power, engine_type)?;

        let benefit = non_negative(baseline_tax - net_tax);
        debug!(%baseline_tax, %net_tax, %benefit, "commute tax benefit");

        Ok(benefit)
    }
}

impl Default for TaxComputer<'static> {
    fn default() -> Self {
        Self::new(DeductionScale::default(), ProgressiveTaxCalculator::default())
    }
}
