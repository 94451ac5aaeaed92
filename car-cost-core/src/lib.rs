pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{QueryRepository, RepositoryError};
pub use models::*;
