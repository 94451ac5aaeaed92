use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Decimal,
    /// Nominal yearly rate in percent (5 for 5%).
    pub annual_rate_percent: Decimal,
    pub duration_years: u32,
}

impl LoanParameters {
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        duration_years: u32,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            duration_years,
        }
    }

    /// Yearly rate as a fraction (0.05 for 5%).
    pub fn rate(&self) -> Decimal {
        self.annual_rate_percent / Decimal::ONE_HUNDRED
    }
}
