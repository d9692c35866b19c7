//! NAV history data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Date format used by the mutual-fund data provider (`31-12-2023`)
pub const NAV_DATE_FORMAT: &str = "%d-%m-%Y";

/// Provider status for a successful lookup
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// A single NAV or price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl HistoricalPricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// NAV history for one scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSeries {
    pub scheme_code: String,
    pub scheme_name: Option<String>,
    pub points: Vec<HistoricalPricePoint>,
}

impl FundSeries {
    pub fn new(scheme_code: impl Into<String>, points: Vec<HistoricalPricePoint>) -> Self {
        Self {
            scheme_code: scheme_code.into(),
            scheme_name: None,
            points,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.scheme_name = Some(name.into());
        self
    }

    /// Scheme name if known, otherwise the code
    pub fn label(&self) -> &str {
        self.scheme_name.as_deref().unwrap_or(&self.scheme_code)
    }
}

/// Scheme metadata block of a fund history document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundMeta {
    #[serde(default)]
    pub fund_house: Option<String>,
    #[serde(default)]
    pub scheme_type: Option<String>,
    #[serde(default)]
    pub scheme_category: Option<String>,
    #[serde(default)]
    pub scheme_code: Option<u64>,
    #[serde(default)]
    pub scheme_name: Option<String>,
}

/// Raw `{ "date": "DD-MM-YYYY", "nav": "123.4567" }` record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavRecord {
    pub date: String,
    pub nav: String,
}

/// Fund history document as served by the mutual-fund data provider.
/// Records are newest-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundHistoryDocument {
    #[serde(default)]
    pub meta: FundMeta,
    #[serde(default)]
    pub data: Vec<NavRecord>,
    #[serde(default)]
    pub status: Option<String>,
}

impl FundHistoryDocument {
    /// Documents without a status field are treated as successful
    pub fn is_success(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == STATUS_SUCCESS)
    }

    /// Parse every record into a typed series, keeping document order.
    ///
    /// `fallback_code` names the series when the document carries no
    /// scheme code.
    pub fn into_series(self, fallback_code: &str) -> Result<FundSeries, DataError> {
        if !self.is_success() {
            return Err(DataError::Status(self.status.unwrap_or_default()));
        }

        let points = self
            .data
            .iter()
            .map(|record| {
                let date = parse_nav_date(&record.date)?;
                let value = parse_nav_value(date, &record.nav)?;
                Ok(HistoricalPricePoint::new(date, value))
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        let scheme_code = self
            .meta
            .scheme_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| fallback_code.to_string());

        Ok(FundSeries {
            scheme_code,
            scheme_name: self.meta.scheme_name,
            points,
        })
    }
}

/// Parse a provider date (`DD-MM-YYYY`)
pub fn parse_nav_date(value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value.trim(), NAV_DATE_FORMAT).map_err(|source| DataError::Date {
        value: value.to_string(),
        source,
    })
}

/// Parse a NAV string; only finite positive values are accepted
pub fn parse_nav_value(date: NaiveDate, value: &str) -> Result<f64, DataError> {
    match value.trim().parse::<f64>() {
        Ok(nav) if nav.is_finite() && nav > 0.0 => Ok(nav),
        _ => Err(DataError::Nav {
            date,
            value: value.to_string(),
        }),
    }
}
