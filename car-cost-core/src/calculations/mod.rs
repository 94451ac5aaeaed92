//! Cost of ownership calculations.
//!
//! Bottom-up: a progressive tax schedule and the mileage scale deduction
//! feed the commute tax benefit; the loan amortizer provides the annuity and
//! debt curve; the projector assembles everything into yearly series.

pub mod common;
pub mod deduction_scale;
pub mod loan;
pub mod progressive_tax;
pub mod projector;
pub mod tax_computer;

pub use deduction_scale::{DeductionScale, DeductionScaleError};
pub use loan::{LoanAmortizer, LoanError};
pub use progressive_tax::ProgressiveTaxCalculator;
pub use projector::{CostProjector, Projection, ProjectionError};
pub use tax_computer::TaxComputer;
