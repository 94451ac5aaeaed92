mod deduction_band;
mod engine_type;
mod loan_parameters;
mod projection_input;
mod query_record;
mod tax_bracket;
mod yearly_cost;

pub use deduction_band::{DEDUCTION_SCALE, DeductionBand, DistanceBand, PowerBand};
pub use engine_type::{EngineType, UnknownEngineType};
pub use loan_parameters::LoanParameters;
pub use projection_input::{
    CarSpecs, Energy, Financing, Insurance, ProjectionInput, Resale, Settings, Taxes, Usage,
};
pub use query_record::{NewQueryRecord, QueryRecord};
pub use tax_bracket::{DEFAULT_TAX_SCHEDULE, TaxBracket};
pub use yearly_cost::YearlyCostRecord;
