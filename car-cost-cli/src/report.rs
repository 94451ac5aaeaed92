//! Plain-text rendering of projections and the query history.

use std::fmt;

use car_cost_core::calculations::Projection;
use car_cost_core::{ProjectionInput, QueryRecord};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Yearly cost table, balance table and summary for one profile.
pub struct ProjectionReport<'a> {
    input: &'a ProjectionInput,
    projection: &'a Projection,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(
        input: &'a ProjectionInput,
        projection: &'a Projection,
    ) -> Self {
        Self { input, projection }
    }
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let input = self.input;
        let projection = self.projection;

        writeln!(
            f,
            "{} ({}, {} CV) over {} years",
            input.name,
            input.car_specs.engine_type.label(),
            input.car_specs.fiscal_power,
            projection.years()
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:>4}  {:>10}  {:>10}  {:>10}  {:>11}  {:>10}  {:>10}  {:>10}",
            "Year", "Tax", "Financing", "Insurance", "Maintenance", "Fuel", "Total", "Cumulative"
        )?;
        for (record, cumulative) in projection
            .yearly_costs
            .iter()
            .zip(&projection.cumulative_costs)
        {
            writeln!(
                f,
                "{:>4}  {:>10}  {:>10}  {:>10}  {:>11}  {:>10}  {:>10}  {:>10}",
                record.year,
                money(record.tax_impact),
                money(record.financing),
                money(record.insurance),
                money(record.maintenance),
                money(record.fuel),
                money(record.total()),
                money(*cumulative)
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>4}  {:>12}  {:>10}  {:>10}",
            "Year", "Resale value", "Debt", "Patrimony"
        )?;
        let balances = projection
            .resale_value_series
            .iter()
            .zip(&projection.debt_series)
            .zip(&projection.patrimony_series);
        for (index, ((resale, debt), patrimony)) in balances.enumerate() {
            writeln!(
                f,
                "{:>4}  {:>12}  {:>10}  {:>10}",
                index + 1,
                money(*resale),
                money(*debt),
                money(*patrimony)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Loan annuity:        {}", money(projection.annuity))?;
        writeln!(f, "Commute tax benefit: {}", money(projection.commute_tax_benefit))?;
        writeln!(f, "Total cost:          {}", money(projection.total_cost()))
    }
}

/// Table of recorded queries, newest first.
pub struct HistoryReport<'a> {
    records: &'a [QueryRecord],
}

impl<'a> HistoryReport<'a> {
    pub fn new(records: &'a [QueryRecord]) -> Self {
        Self { records }
    }
}

impl fmt::Display for HistoryReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.records.is_empty() {
            return writeln!(f, "No recorded queries.");
        }

        writeln!(
            f,
            "{:>6}  {:<20}  {:<24}  {:<20}  {:>10}  {:>5}",
            "Id", "Submitted", "Name", "Engine", "Price", "Years"
        )?;
        for record in self.records {
            let input = &record.input;
            writeln!(
                f,
                "{:>6}  {:<20}  {:<24}  {:<20}  {:>10}  {:>5}",
                record.id,
                record.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                input.name,
                input.car_specs.engine_type.label(),
                money(input.financing.price),
                input.settings.n_years
            )?;
        }
        Ok(())
    }
}
