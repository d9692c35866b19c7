//! Interchangeable sources of NAV history
//!
//! Callers pick a provider (or chain two with [`FallbackProvider`]) and hand
//! the resulting series to the return estimator.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};

use super::data::FundSeries;
use super::loader::load_document;
use crate::error::DataError;

/// Source of NAV history keyed by scheme code
pub trait HistoricalSeriesProvider {
    fn series(&self, scheme_code: &str) -> Result<FundSeries, DataError>;
}

/// Reads `<root>/<scheme_code>.json` fund history documents
#[derive(Debug, Clone)]
pub struct DocumentDirProvider {
    root: PathBuf,
}

impl DocumentDirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scheme codes of every document in the directory, sorted
    pub fn scheme_codes(&self) -> Result<Vec<String>, DataError> {
        let mut codes = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                codes.push(stem.to_string());
            }
        }
        codes.sort();
        Ok(codes)
    }
}

impl HistoricalSeriesProvider for DocumentDirProvider {
    fn series(&self, scheme_code: &str) -> Result<FundSeries, DataError> {
        let path = self.root.join(format!("{}.json", scheme_code));
        if !path.is_file() {
            return Err(DataError::UnknownScheme(scheme_code.to_string()));
        }

        debug!("Loading NAV history for {} from {}", scheme_code, path.display());
        load_document(&path)?.into_series(scheme_code)
    }
}

/// Fixed in-memory series, used as canned fallback data
#[derive(Debug, Clone, Default)]
pub struct FixedSeriesProvider {
    series: HashMap<String, FundSeries>,
}

impl FixedSeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: FundSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: FundSeries) {
        self.series.insert(series.scheme_code.clone(), series);
    }
}

impl HistoricalSeriesProvider for FixedSeriesProvider {
    fn series(&self, scheme_code: &str) -> Result<FundSeries, DataError> {
        self.series
            .get(scheme_code)
            .cloned()
            .ok_or_else(|| DataError::UnknownScheme(scheme_code.to_string()))
    }
}

/// Tries `primary`, then `fallback` when the primary fails
#[derive(Debug, Clone)]
pub struct FallbackProvider<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackProvider<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> HistoricalSeriesProvider for FallbackProvider<P, F>
where
    P: HistoricalSeriesProvider,
    F: HistoricalSeriesProvider,
{
    fn series(&self, scheme_code: &str) -> Result<FundSeries, DataError> {
        match self.primary.series(scheme_code) {
            Ok(series) => Ok(series),
            Err(err) => {
                warn!("Primary NAV source failed for {}: {}; using fallback", scheme_code, err);
                self.fallback.series(scheme_code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::HistoricalPricePoint;
    use chrono::NaiveDate;

    fn canned(code: &str, value: f64) -> FundSeries {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        FundSeries::new(code, vec![HistoricalPricePoint::new(date, value)])
    }

    #[test]
    fn test_fixed_provider() {
        let provider = FixedSeriesProvider::new().with_series(canned("100", 10.0));

        assert_eq!(provider.series("100").unwrap().points[0].value, 10.0);
        assert!(matches!(provider.series("200"), Err(DataError::UnknownScheme(code)) if code == "200"));
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let primary = FixedSeriesProvider::new().with_series(canned("100", 10.0));
        let fallback = FixedSeriesProvider::new()
            .with_series(canned("100", 99.0))
            .with_series(canned("200", 20.0));
        let provider = FallbackProvider::new(primary, fallback);

        assert_eq!(provider.series("100").unwrap().points[0].value, 10.0);
        assert_eq!(provider.series("200").unwrap().points[0].value, 20.0);
        assert!(provider.series("300").is_err());
    }

    #[test]
    fn test_document_dir_provider() {
        let dir = std::env::temp_dir().join(format!("sip_calculator_provider_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("119551.json"),
            r#"{ "meta": { "scheme_name": "Bluechip" }, "data": [{ "date": "02-01-2024", "nav": "12.5" }], "status": "SUCCESS" }"#,
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let provider = DocumentDirProvider::new(&dir);
        assert_eq!(provider.scheme_codes().unwrap(), vec!["119551".to_string()]);

        let series = provider.series("119551").unwrap();
        assert_eq!(series.scheme_code, "119551");
        assert_eq!(series.label(), "Bluechip");
        assert!(matches!(provider.series("1"), Err(DataError::UnknownScheme(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
