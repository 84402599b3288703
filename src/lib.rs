pub mod constants;
pub mod errors;
pub mod model;
pub mod report;
pub mod sampling;
pub mod uncertainty;

pub use constants::*;
pub use errors::ModelError;
pub use model::{
    LaunchConstants, LaunchEstimate, MassSample, VariableMassProfile, WaterRocketModel,
};
pub use uncertainty::{ErrorComponent, Uncertain};

pub use report::LaunchReport;
pub use sampling::{MonteCarlo, SampleSummary};
