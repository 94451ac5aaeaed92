use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Yearly commute distance band of the mileage allowance scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceBand {
    /// Below 5 000 km per year.
    Short,
    /// From 5 000 km up to (excluding) 20 000 km per year.
    Medium,
    /// 20 000 km per year and above.
    Long,
}

/// Fiscal power band (administrative horsepower, "CV").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerBand {
    /// 3 CV and under.
    P1,
    P2,
    P3,
    P4,
    /// 7 CV and over.
    P5,
}

/// One row of the mileage allowance scale: `deduction = a * distance + b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBand {
    pub distance_band: DistanceBand,
    pub power_band: PowerBand,
    pub coefficient_a: Decimal,
    pub coefficient_b: Decimal,
}

const fn row(
    distance_band: DistanceBand,
    power_band: PowerBand,
    a_thousandths: u32,
    b: u32,
) -> DeductionBand {
    DeductionBand {
        distance_band,
        power_band,
        coefficient_a: Decimal::from_parts(a_thousandths, 0, 0, false, 3),
        coefficient_b: Decimal::from_parts(b, 0, 0, false, 0),
    }
}

/// Mileage allowance scale for cars, 3 distance bands by 5 power bands.
pub static DEDUCTION_SCALE: [DeductionBand; 15] = [
    row(DistanceBand::Short, PowerBand::P1, 529, 0),
    row(DistanceBand::Short, PowerBand::P2, 606, 0),
    row(DistanceBand::Short, PowerBand::P3, 636, 0),
    row(DistanceBand::Short, PowerBand::P4, 665, 0),
    row(DistanceBand::Short, PowerBand::P5, 697, 0),
    row(DistanceBand::Medium, PowerBand::P1, 316, 1065),
    row(DistanceBand::Medium, PowerBand::P2, 340, 1330),
    row(DistanceBand::Medium, PowerBand::P3, 357, 1395),
    row(DistanceBand::Medium, PowerBand::P4, 374, 1457),
    row(DistanceBand::Medium, PowerBand::P5, 394, 1515),
    row(DistanceBand::Long, PowerBand::P1, 370, 0),
    row(DistanceBand::Long, PowerBand::P2, 407, 0),
    row(DistanceBand::Long, PowerBand::P3, 427, 0),
    row(DistanceBand::Long, PowerBand::P4, 447, 0),
    row(DistanceBand::Long, PowerBand::P5, 470, 0),
];
