//! CSV loader for batches of car profiles.
//!
//! ## CSV Format
//!
//! One flat row per profile. Headers are matched by name, so column order
//! does not matter. Only `name` is required; a missing column or an empty
//! cell takes the reference profile's value.
//!
//! | Column                | Type    | Notes                                   |
//! |-----------------------|---------|-----------------------------------------|
//! | `name`                | string  | required                                |
//! | `price`               | decimal |                                         |
//! | `eco_bonus`           | decimal |                                         |
//! | `resell`              | decimal | trade-in or scrappage bonus             |
//! | `loan`                | decimal | borrowed amount                         |
//! | `loan_rate_percent`   | decimal | e.g. `4.5`                              |
//! | `loan_duration_years` | integer |                                         |
//! | `engine_type`         | string  | code (`diesel`) or label (`Essence`)    |
//! | `fiscal_power`        | integer | CV                                      |
//! | `fuel_consumption`    | decimal | per 100 km                              |
//! | `maintenance_cost`    | decimal | yearly                                  |
//! | `insurance_cost`      | decimal | yearly                                  |
//! | `fuel_cost`           | decimal | per litre or kWh                        |
//! | `distance_personal`   | decimal | km per year                             |
//! | `distance_work`       | decimal | km per year                             |
//! | `initial_value`       | decimal |                                         |
//! | `value_at_5_years`    | decimal |                                         |
//! | `taxable_revenue`     | decimal |                                         |
//! | `n_years`             | integer | projection horizon                      |
//! | `share_data`          | bool    | `true` / `false`                        |
//!
//! ### Example
//!
//! ```csv
//! name,price,loan,engine_type,fiscal_power,fuel_consumption,fuel_cost
//! Peugeot e208,35000,20000,Electrique,4,16.4,0.227
//! Clio dCi,19500,12000,diesel,5,4.6,1.79
//! ```
use std::path::{Path, PathBuf};

use car_cost_core::{
    CarSpecs, EngineType, Energy, Financing, Insurance, ProjectionInput, Resale, Settings, Taxes,
    Usage,
};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    price: Option<Decimal>,
    eco_bonus: Option<Decimal>,
    resell: Option<Decimal>,
    loan: Option<Decimal>,
    loan_rate_percent: Option<Decimal>,
    loan_duration_years: Option<u32>,
    engine_type: Option<String>,
    fiscal_power: Option<u32>,
    fuel_consumption: Option<Decimal>,
    maintenance_cost: Option<Decimal>,
    insurance_cost: Option<Decimal>,
    fuel_cost: Option<Decimal>,
    distance_personal: Option<Decimal>,
    distance_work: Option<Decimal>,
    initial_value: Option<Decimal>,
    value_at_5_years: Option<Decimal>,
    taxable_revenue: Option<Decimal>,
    n_years: Option<u32>,
    share_data: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing `name` column, or a type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, the header is row 0.
    #[error("unrecognised engine type '{value}' on row {row}")]
    InvalidEngineType { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ProjectionInput, CsvLoadError> {
    let defaults = ProjectionInput::default();

    let engine_type = match row.engine_type.filter(|value| !value.is_empty()) {
        Some(value) => EngineType::parse(&value).ok_or(CsvLoadError::InvalidEngineType {
            value,
            row: row_number,
        })?,
        None => defaults.car_specs.engine_type,
    };

    Ok(ProjectionInput {
        name: row.name,
        financing: Financing {
            price: row.price.unwrap_or(defaults.financing.price),
            eco_bonus: row.eco_bonus.unwrap_or(defaults.financing.eco_bonus),
            resell: row.resell.unwrap_or(defaults.financing.resell),
            loan: row.loan.unwrap_or(defaults.financing.loan),
            loan_rate_percent: row
                .loan_rate_percent
                .unwrap_or(defaults.financing.loan_rate_percent),
            loan_duration_years: row
                .loan_duration_years
                .unwrap_or(defaults.financing.loan_duration_years),
        },
        car_specs: CarSpecs {
            engine_type,
            fiscal_power: row.fiscal_power.unwrap_or(defaults.car_specs.fiscal_power),
            fuel_consumption: row
                .fuel_consumption
                .unwrap_or(defaults.car_specs.fuel_consumption),
            maintenance_cost: row
                .maintenance_cost
                .unwrap_or(defaults.car_specs.maintenance_cost),
        },
        insurance: Insurance {
            insurance_cost: row
                .insurance_cost
                .unwrap_or(defaults.insurance.insurance_cost),
        },
        energy: Energy {
            fuel_cost: row.fuel_cost.unwrap_or(defaults.energy.fuel_cost),
        },
        usage: Usage {
            distance_personal: row
                .distance_personal
                .unwrap_or(defaults.usage.distance_personal),
            distance_work: row.distance_work.unwrap_or(defaults.usage.distance_work),
        },
        resale: Resale {
            initial_value: row.initial_value.unwrap_or(defaults.resale.initial_value),
            value_at_5_years: row
                .value_at_5_years
                .unwrap_or(defaults.resale.value_at_5_years),
        },
        taxes: Taxes {
            taxable_revenue: row
                .taxable_revenue
                .unwrap_or(defaults.taxes.taxable_revenue),
        },
        settings: Settings {
            n_years: row.n_years.unwrap_or(defaults.settings.n_years),
            share_data: row.share_data.unwrap_or(defaults.settings.share_data),
        },
    })
}

/// Parse CSV text and return one profile per row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or a cell
///   cannot be deserialised.
/// * [CsvLoadError::InvalidEngineType] if any row names an unknown engine.
pub fn load_from_str(input: &str) -> Result<Vec<ProjectionInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<ProjectionInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
