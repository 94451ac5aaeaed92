use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cost of ownership for a single projection year.
///
/// `tax_impact` is negative when commuting by car lowers income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCostRecord {
    pub year: u32,
    pub tax_impact: Decimal,
    pub financing: Decimal,
    pub insurance: Decimal,
    pub maintenance: Decimal,
    pub fuel: Decimal,
}

impl YearlyCostRecord {
    pub fn total(&self) -> Decimal {
        self.tax_impact + self.financing + self.insurance + self.maintenance + self.fuel
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_includes_negative_tax_impact() {
        let record = YearlyCostRecord {
            year: 1,
            tax_impact: dec!(-186.65),
            financing: dec!(3940.35),
            insurance: dec!(700),
            maintenance: dec!(150),
            fuel: dec!(431.84),
        };

        assert_eq!(record.total(), dec!(5035.54));
    }
}
