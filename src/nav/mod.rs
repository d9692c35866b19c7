//! Historical NAV data: parsing, loading and providers

mod data;
pub mod loader;
mod provider;

pub use data::{
    parse_nav_date, parse_nav_value, FundHistoryDocument, FundMeta, FundSeries, HistoricalPricePoint, NavRecord,
    NAV_DATE_FORMAT, STATUS_SUCCESS,
};
pub use loader::{load_history, load_series_csv};
pub use provider::{DocumentDirProvider, FallbackProvider, FixedSeriesProvider, HistoricalSeriesProvider};
