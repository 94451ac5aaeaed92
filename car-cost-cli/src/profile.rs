//! TOML profile files describing a single car.
//!
//! Sections mirror [`ProjectionInput`]. Every field is optional and falls
//! back to the reference profile, so a file only lists what differs:
//!
//! ```toml
//! name = "Zoe R110"
//!
//! [financing]
//! price = 32000
//! loan = 15000
//! loan_duration_years = 5
//!
//! [car_specs]
//! engine_type = "electric"
//! fiscal_power = 3
//!
//! [usage]
//! distance_work = 12000
//! ```
//!
//! `engine_type` takes one of `diesel`, `petrol`, `hybrid`,
//! `plug_in_hybrid`, `electric` or `lpg`.

use std::path::{Path, PathBuf};

use car_cost_core::ProjectionInput;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("cannot read profile '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_from_str(input: &str) -> Result<ProjectionInput, ProfileError> {
    Ok(toml::from_str(input)?)
}

pub fn load_from_file(path: &Path) -> Result<ProjectionInput, ProfileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
