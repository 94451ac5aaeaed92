//! Loader tests against on-disk fixture files.

use std::path::PathBuf;

use car_cost_cli::{csv_loader, profile};
use car_cost_core::EngineType;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_csv_fixture_succeeds() {
    let profiles = csv_loader::load_from_file(&fixture_path("sample_profiles.csv"))
        .expect("fixture file should load without error");

    assert_eq!(profiles.len(), 3);
}

#[test]
fn test_csv_fixture_first_row_is_reference_profile() {
    let profiles = csv_loader::load_from_file(&fixture_path("sample_profiles.csv")).unwrap();

    assert_eq!(profiles[0], car_cost_core::ProjectionInput::default());
}

#[test]
fn test_csv_fixture_diesel_row() {
    let profiles = csv_loader::load_from_file(&fixture_path("sample_profiles.csv")).unwrap();
    let clio = &profiles[1];

    assert_eq!(clio.name, "Clio dCi");
    assert_eq!(clio.car_specs.engine_type, EngineType::Diesel);
    assert_eq!(clio.financing.loan_duration_years, 4);
    assert_eq!(clio.usage.distance_work, dec!(22000));
    assert_eq!(clio.settings.n_years, 8);
    assert!(!clio.settings.share_data);
}

#[test]
fn test_csv_fixture_cash_purchase_row() {
    let profiles = csv_loader::load_from_file(&fixture_path("sample_profiles.csv")).unwrap();
    let tesla = &profiles[2];

    assert_eq!(tesla.financing.loan, dec!(0));
    assert_eq!(tesla.financing.loan_duration_years, 0);
    assert_eq!(tesla.car_specs.fiscal_power, 7);
    assert_eq!(tesla.energy.fuel_cost, dec!(0.2516));
}

#[test]
fn test_load_toml_fixture() {
    let zoe = profile::load_from_file(&fixture_path("zoe.toml"))
        .expect("fixture profile should load without error");

    assert_eq!(zoe.name, "Zoe R110");
    assert_eq!(zoe.financing.loan_rate_percent, dec!(3.5));
    assert_eq!(zoe.car_specs.fiscal_power, 3);
    assert_eq!(zoe.car_specs.fuel_consumption, dec!(17.2));
    assert_eq!(zoe.insurance.insurance_cost, dec!(700));
    assert_eq!(zoe.settings.n_years, 7);
}
