//! The car profile a projection is computed from.
//!
//! Every section deserialises with defaults for missing fields, so a profile
//! file only needs to list the values that differ from the reference
//! profile (a Peugeot e208 bought with a six-year loan).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EngineType, LoanParameters};

/// Purchase and loan terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financing {
    /// Purchase price of the vehicle.
    pub price: Decimal,
    /// Ecological bonus deducted from the price.
    pub eco_bonus: Decimal,
    /// Trade-in value of the previous vehicle or scrappage bonus.
    pub resell: Decimal,
    /// Borrowed amount.
    pub loan: Decimal,
    /// Loan rate in percent.
    pub loan_rate_percent: Decimal,
    pub loan_duration_years: u32,
}

impl Default for Financing {
    fn default() -> Self {
        Self {
            price: Decimal::new(35000, 0),
            eco_bonus: Decimal::new(5000, 0),
            resell: Decimal::new(2500, 0),
            loan: Decimal::new(20000, 0),
            loan_rate_percent: Decimal::new(5, 0),
            loan_duration_years: 6,
        }
    }
}

impl Financing {
    pub fn loan_parameters(&self) -> LoanParameters {
        LoanParameters::new(self.loan, self.loan_rate_percent, self.loan_duration_years)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSpecs {
    pub engine_type: EngineType,
    /// Administrative horsepower (CV).
    pub fiscal_power: u32,
    /// Litres or kWh per 100 km.
    pub fuel_consumption: Decimal,
    /// Yearly maintenance cost.
    pub maintenance_cost: Decimal,
}

impl Default for CarSpecs {
    fn default() -> Self {
        Self {
            engine_type: EngineType::Electric,
            fiscal_power: 4,
            fuel_consumption: Decimal::new(164, 1),
            maintenance_cost: Decimal::new(150, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    /// Yearly insurance premium.
    pub insurance_cost: Decimal,
}

impl Default for Insurance {
    fn default() -> Self {
        Self {
            insurance_cost: Decimal::new(700, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Energy {
    /// Price per litre, or per kWh for electric vehicles.
    pub fuel_cost: Decimal,
}

impl Default for Energy {
    fn default() -> Self {
        Self {
            fuel_cost: Decimal::new(227, 3),
        }
    }
}

/// Yearly distances driven, in kilometres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub distance_personal: Decimal,
    pub distance_work: Decimal,
}

impl Default for Usage {
    fn default() -> Self {
        Self {
            distance_personal: Decimal::new(4000, 0),
            distance_work: Decimal::new(7600, 0),
        }
    }
}

impl Usage {
    pub fn total_distance(&self) -> Decimal {
        self.distance_personal + self.distance_work
    }
}

/// Resale value observations used to fit the depreciation curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resale {
    /// Market value right after purchase. May differ from the price paid.
    pub initial_value: Decimal,
    /// Expected market value five years later.
    pub value_at_5_years: Decimal,
}

impl Default for Resale {
    fn default() -> Self {
        Self {
            initial_value: Decimal::new(28000, 0),
            value_at_5_years: Decimal::new(15000, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxes {
    /// Yearly taxable revenue before the commute deduction.
    pub taxable_revenue: Decimal,
}

impl Default for Taxes {
    fn default() -> Self {
        Self {
            taxable_revenue: Decimal::new(30000, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Projection horizon.
    pub n_years: u32,
    /// Whether the profile may be recorded in the query log.
    pub share_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            n_years: 10,
            share_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionInput {
    pub name: String,
    pub financing: Financing,
    pub car_specs: CarSpecs,
    pub insurance: Insurance,
    pub energy: Energy,
    pub usage: Usage,
    pub resale: Resale,
    pub taxes: Taxes,
    pub settings: Settings,
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            name: "Peugeot e208".to_string(),
            financing: Financing::default(),
            car_specs: CarSpecs::default(),
            insurance: Insurance::default(),
            energy: Energy::default(),
            usage: Usage::default(),
            resale: Resale::default(),
            taxes: Taxes::default(),
            settings: Settings::default(),
        }
    }
}
