//! Calculator defaults, input ranges and the fallback-rate policy
//!
//! Values come from serde defaults, optionally a JSON file, then
//! `SIP_*` environment variables. CLI flags are applied last by the binary.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::projection::SipParameters;

pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 5000.0;
pub const DEFAULT_ANNUAL_RETURN_PERCENT: f64 = 12.0;
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Rate assumed when no usable trailing return is available
pub const DEFAULT_FALLBACK_RETURN_PERCENT: f64 = 12.0;

/// Inclusive range for one calculator input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ranges offered by the calculator. Out-of-range inputs are still
/// projected; they only produce warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    #[serde(default = "default_contribution_range")]
    pub monthly_contribution: Range,
    #[serde(default = "default_return_range")]
    pub annual_return_percent: Range,
    #[serde(default = "default_horizon_range")]
    pub horizon_years: Range,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            monthly_contribution: default_contribution_range(),
            annual_return_percent: default_return_range(),
            horizon_years: default_horizon_range(),
        }
    }
}

impl InputLimits {
    /// Describe every input outside its range
    pub fn check(&self, params: &SipParameters) -> Vec<String> {
        let mut warnings = Vec::new();
        let checks = [
            ("monthly contribution", params.monthly_contribution, self.monthly_contribution),
            ("annual return", params.annual_return_percent, self.annual_return_percent),
            ("horizon (years)", params.horizon_years as f64, self.horizon_years),
        ];

        for (name, value, range) in checks {
            if !range.contains(value) {
                warnings.push(format!(
                    "{} {} is outside the usual range {}..={}",
                    name, value, range.min, range.max
                ));
            }
        }
        warnings
    }
}

fn default_contribution_range() -> Range {
    Range { min: 500.0, max: 100_000.0 }
}

fn default_return_range() -> Range {
    Range { min: 1.0, max: 30.0 }
}

fn default_horizon_range() -> Range {
    Range { min: 1.0, max: 30.0 }
}

fn default_monthly_contribution() -> f64 {
    DEFAULT_MONTHLY_CONTRIBUTION
}

fn default_annual_return() -> f64 {
    DEFAULT_ANNUAL_RETURN_PERCENT
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

fn default_fallback_return() -> f64 {
    DEFAULT_FALLBACK_RETURN_PERCENT
}

/// Calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    #[serde(default = "default_annual_return")]
    pub annual_return_percent: f64,

    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Rate used when a fund's trailing return is missing or not positive
    #[serde(default = "default_fallback_return")]
    pub fallback_return_percent: f64,

    #[serde(default)]
    pub limits: InputLimits,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            annual_return_percent: DEFAULT_ANNUAL_RETURN_PERCENT,
            horizon_years: DEFAULT_HORIZON_YEARS,
            fallback_return_percent: DEFAULT_FALLBACK_RETURN_PERCENT,
            limits: InputLimits::default(),
        }
    }
}

impl CalculatorConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Override from `SIP_MONTHLY_CONTRIBUTION`, `SIP_ANNUAL_RETURN`,
    /// `SIP_HORIZON_YEARS` and `SIP_FALLBACK_RETURN`
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|key| env::var(key).ok());
        self
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parse_var(&lookup, "SIP_MONTHLY_CONTRIBUTION") {
            self.monthly_contribution = v;
        }
        if let Some(v) = parse_var(&lookup, "SIP_ANNUAL_RETURN") {
            self.annual_return_percent = v;
        }
        if let Some(v) = parse_var(&lookup, "SIP_HORIZON_YEARS") {
            self.horizon_years = v;
        }
        if let Some(v) = parse_var(&lookup, "SIP_FALLBACK_RETURN") {
            self.fallback_return_percent = v;
        }
    }

    pub fn parameters(&self) -> SipParameters {
        SipParameters::new(self.monthly_contribution, self.annual_return_percent, self.horizon_years)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

/// Rate to pre-fill from a fund's trailing return: the estimate when it is
/// positive, otherwise `fallback`
pub fn suggested_rate(estimate: Option<f64>, fallback: f64) -> f64 {
    match estimate {
        Some(rate) if rate > 0.0 => rate,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.parameters(), SipParameters::new(5000.0, 12.0, 5));
        assert_eq!(config.fallback_return_percent, 12.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{ "monthly_contribution": 2500, "limits": { "horizon_years": { "min": 1, "max": 40 } } }"#)
                .unwrap();

        assert_eq!(config.monthly_contribution, 2500.0);
        assert_eq!(config.horizon_years, DEFAULT_HORIZON_YEARS);
        assert_eq!(config.limits.horizon_years.max, 40.0);
        assert_eq!(config.limits.annual_return_percent, default_return_range());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SIP_MONTHLY_CONTRIBUTION", "10000"),
            ("SIP_HORIZON_YEARS", "15"),
            ("SIP_ANNUAL_RETURN", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = CalculatorConfig::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.monthly_contribution, 10_000.0);
        assert_eq!(config.horizon_years, 15);
        assert_eq!(config.annual_return_percent, DEFAULT_ANNUAL_RETURN_PERCENT);
    }

    #[test]
    fn test_limits_warn_without_clamping() {
        let limits = InputLimits::default();

        assert!(limits.check(&SipParameters::new(5000.0, 12.0, 5)).is_empty());

        let params = SipParameters::new(200.0, -5.0, 40);
        let warnings = limits.check(&params);
        assert_eq!(warnings.len(), 3);
        assert_eq!(params.monthly_contribution, 200.0);
    }

    #[test]
    fn test_suggested_rate() {
        assert_eq!(suggested_rate(Some(18.4), 12.0), 18.4);
        assert_eq!(suggested_rate(Some(-3.2), 12.0), 12.0);
        assert_eq!(suggested_rate(Some(0.0), 12.0), 12.0);
        assert_eq!(suggested_rate(None, 12.0), 12.0);
    }
}
