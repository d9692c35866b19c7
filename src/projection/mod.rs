//! SIP projection: future value of a monthly contribution plan

mod engine;
mod series;

pub use engine::{
    project_sip, SipParameters, DEGENERATE_ANNUAL_RETURN_PERCENT, MAX_HORIZON_YEARS, MONTHS_PER_YEAR,
};
pub use series::{ProjectionPoint, ProjectionResult};
