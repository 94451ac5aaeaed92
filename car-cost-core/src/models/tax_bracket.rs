use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive income-tax schedule.
///
/// `upper_bound` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub marginal_rate_percent: Decimal,
}

impl TaxBracket {
    pub const fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        marginal_rate_percent: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            marginal_rate_percent,
        }
    }
}

const fn euros(amount: u32) -> Decimal {
    Decimal::from_parts(amount, 0, 0, false, 0)
}

/// French income-tax schedule for the single modeled tax year.
pub static DEFAULT_TAX_SCHEDULE: [TaxBracket; 5] = [
    TaxBracket::new(euros(0), Some(euros(1077)), euros(0)),
    TaxBracket::new(euros(1077), Some(euros(27479)), euros(11)),
    TaxBracket::new(euros(27479), Some(euros(78571)), euros(30)),
    TaxBracket::new(euros(78571), Some(euros(168994)), euros(41)),
    TaxBracket::new(euros(168994), None, euros(45)),
];
