//! SIP Calculator - projection core for systematic investment plans
//!
//! This library provides:
//! - SIP future-value projections (annuity-due) with a yearly series for charting
//! - Trailing one-year return estimation from fund NAV history
//! - NAV history parsing, loading and pluggable series providers
//! - Batch and sensitivity runs across many parameter sets

pub mod config;
pub mod error;
pub mod format;
pub mod nav;
pub mod projection;
pub mod returns;
pub mod scenario;

// Re-export commonly used types
pub use config::{suggested_rate, CalculatorConfig, InputLimits};
pub use error::{CalcError, DataError, ErrorKind};
pub use nav::{FundSeries, HistoricalPricePoint, HistoricalSeriesProvider};
pub use projection::{project_sip, ProjectionPoint, ProjectionResult, SipParameters};
pub use returns::{estimate_trailing_return, DayChange, TrailingReturn};
pub use scenario::ScenarioRunner;
