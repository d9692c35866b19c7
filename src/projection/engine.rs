//! SIP future-value engine
//!
//! Contributions are made at the start of each month (annuity-due), so the
//! future value of `n` contributions of `M` at monthly rate `i` is
//! `M * ((1+i)^n - 1) / i * (1+i)`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::series::{ProjectionPoint, ProjectionResult};
use crate::error::CalcError;

/// Contribution periods per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon accepted; keeps the yearly series allocation bounded
pub const MAX_HORIZON_YEARS: u32 = 10_000;

/// Annual returns at or below this wipe out every contribution
pub const DEGENERATE_ANNUAL_RETURN_PERCENT: f64 = -100.0;

/// Inputs for a single SIP projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipParameters {
    /// Amount invested at the start of every month
    pub monthly_contribution: f64,

    /// Expected annual return in percent (12.0 = 12% p.a.)
    pub annual_return_percent: f64,

    /// Investment horizon in whole years
    pub horizon_years: u32,
}

impl SipParameters {
    pub fn new(monthly_contribution: f64, annual_return_percent: f64, horizon_years: u32) -> Self {
        Self {
            monthly_contribution,
            annual_return_percent,
            horizon_years,
        }
    }

    /// Reject inputs that cannot be projected. Nothing is clamped.
    pub fn validate(&self) -> Result<(), CalcError> {
        if !self.monthly_contribution.is_finite() || self.monthly_contribution <= 0.0 {
            return Err(CalcError::invalid(
                "monthly_contribution",
                format!("must be a positive amount, got {}", self.monthly_contribution),
            ));
        }
        if self.horizon_years == 0 {
            return Err(CalcError::invalid("horizon_years", "must be at least 1 year"));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(CalcError::invalid(
                "horizon_years",
                format!("must not exceed {} years, got {}", MAX_HORIZON_YEARS, self.horizon_years),
            ));
        }
        if !self.annual_return_percent.is_finite() {
            return Err(CalcError::invalid(
                "annual_return_percent",
                format!("must be a finite number, got {}", self.annual_return_percent),
            ));
        }
        if self.annual_return_percent <= DEGENERATE_ANNUAL_RETURN_PERCENT {
            return Err(CalcError::DegenerateRate {
                annual_return_percent: self.annual_return_percent,
            });
        }
        Ok(())
    }

    /// Periodic (monthly) rate as a decimal: annual% / 12 / 100
    pub fn monthly_rate(&self) -> f64 {
        self.annual_return_percent / MONTHS_PER_YEAR as f64 / 100.0
    }

    /// Total number of contributions over the horizon
    pub fn total_months(&self) -> u64 {
        self.horizon_years as u64 * MONTHS_PER_YEAR as u64
    }
}

/// Project a monthly SIP over its full horizon.
///
/// Values are kept at full precision; use [`ProjectionResult::rounded`] for
/// display.
pub fn project_sip(params: &SipParameters) -> Result<ProjectionResult, CalcError> {
    params.validate()?;

    let months = params.total_months();
    let total_invested = invested_after(params, months);
    ensure_finite(total_invested, "total invested")?;

    let total_value = value_after(params, months);
    ensure_finite(total_value, "future value")?;

    let series = (0..=params.horizon_years)
        .map(|year_index| {
            let months = year_index as u64 * MONTHS_PER_YEAR as u64;
            let point = ProjectionPoint {
                year_index,
                invested_to_date: invested_after(params, months),
                value_to_date: value_after(params, months),
            };
            ensure_finite(point.value_to_date, &format!("value at year {}", year_index))?;
            Ok(point)
        })
        .collect::<Result<Vec<_>, CalcError>>()?;

    let estimated_gains = total_value - total_invested;

    debug!(
        "SIP {:.2}/month at {}% for {}y: invested={:.2} value={:.2} gains={:.2}",
        params.monthly_contribution,
        params.annual_return_percent,
        params.horizon_years,
        total_invested,
        total_value,
        estimated_gains,
    );

    Ok(ProjectionResult {
        parameters: *params,
        total_invested,
        total_value,
        estimated_gains,
        series,
    })
}

/// Principal contributed after `months` periods
fn invested_after(params: &SipParameters, months: u64) -> f64 {
    params.monthly_contribution * months as f64
}

/// Annuity-due future value after `months` contributions
fn value_after(params: &SipParameters, months: u64) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if params.annual_return_percent == 0.0 {
        return invested_after(params, months);
    }

    let i = params.monthly_rate();
    // (1+i)^n - 1 without losing digits for small rates
    let growth = (months as f64 * i.ln_1p()).exp_m1();
    params.monthly_contribution * (growth / i) * (1.0 + i)
}

fn ensure_finite(value: f64, context: &str) -> Result<(), CalcError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::NumericOverflow {
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reference_scenario() {
        let result = project_sip(&SipParameters::new(5000.0, 12.0, 5)).unwrap();

        assert_eq!(result.total_invested, 300_000.0);
        // 5000 * ((1.01^60 - 1) / 0.01) * 1.01
        let expected = 5000.0 * ((1.01_f64.powi(60) - 1.0) / 0.01) * 1.01;
        assert_relative_eq!(result.total_value, expected, max_relative = 1e-12);
        assert_abs_diff_eq!(result.total_value, 412_432.0, epsilon = 1.0);
        assert_abs_diff_eq!(result.estimated_gains, 112_432.0, epsilon = 1.0);
    }

    #[test]
    fn test_annuity_due_exceeds_ordinary_annuity() {
        let result = project_sip(&SipParameters::new(1000.0, 12.0, 1)).unwrap();
        let ordinary = 1000.0 * (1.01_f64.powi(12) - 1.0) / 0.01;

        assert_relative_eq!(result.total_value, ordinary * 1.01, max_relative = 1e-12);
        assert!(result.total_value > ordinary);
    }

    #[test]
    fn test_zero_rate_identity() {
        for &(monthly, years) in &[(500.0, 1), (5000.0, 5), (1234.56, 30), (0.01, 7)] {
            let result = project_sip(&SipParameters::new(monthly, 0.0, years)).unwrap();

            assert_eq!(result.total_value, result.total_invested);
            assert_eq!(result.estimated_gains, 0.0);
            for point in &result.series {
                assert_eq!(point.value_to_date, point.invested_to_date);
            }
        }
    }

    #[test]
    fn test_principal_is_exact() {
        for &(monthly, rate, years) in &[(5000.0, 12.0, 5), (750.0, -20.0, 12), (100_000.0, 30.0, 30)] {
            let result = project_sip(&SipParameters::new(monthly, rate, years)).unwrap();
            assert_eq!(result.total_invested, monthly * years as f64 * 12.0);
        }
    }

    #[test]
    fn test_series_boundaries() {
        let params = SipParameters::new(2500.0, 9.5, 12);
        let result = project_sip(&params).unwrap();

        assert_eq!(result.series.len(), 13);
        assert_eq!(
            result.series[0],
            ProjectionPoint { year_index: 0, invested_to_date: 0.0, value_to_date: 0.0 }
        );

        let last = result.series[12];
        assert_eq!(last.year_index, 12);
        assert_abs_diff_eq!(last.value_to_date, result.total_value, epsilon = 1.0);
        assert_eq!(last.invested_to_date, result.total_invested);
    }

    #[test]
    fn test_series_monotonic() {
        let result = project_sip(&SipParameters::new(3000.0, 15.0, 20)).unwrap();

        for pair in result.series.windows(2) {
            assert!(pair[0].invested_to_date <= pair[1].invested_to_date);
            assert!(pair[0].value_to_date <= pair[1].value_to_date);
        }
    }

    #[test]
    fn test_principal_monotonic_with_negative_rate() {
        let result = project_sip(&SipParameters::new(3000.0, -30.0, 10)).unwrap();

        for pair in result.series.windows(2) {
            assert!(pair[0].invested_to_date <= pair[1].invested_to_date);
        }
    }

    #[test]
    fn test_negative_rate_loses_money() {
        let result = project_sip(&SipParameters::new(5000.0, -50.0, 5)).unwrap();

        assert!(result.total_value < result.total_invested);
        assert!(result.estimated_gains < 0.0);
    }

    #[test]
    fn test_total_loss_rate_is_degenerate() {
        let err = project_sip(&SipParameters::new(5000.0, -100.0, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, CalcError::DegenerateRate { .. }));

        // i == -1
        let err = project_sip(&SipParameters::new(5000.0, -1200.0, 5)).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateRate { .. }));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        for params in [
            SipParameters::new(0.0, 12.0, 5),
            SipParameters::new(-500.0, 12.0, 5),
            SipParameters::new(f64::NAN, 12.0, 5),
            SipParameters::new(5000.0, 12.0, 0),
            SipParameters::new(5000.0, f64::INFINITY, 5),
            SipParameters::new(5000.0, 12.0, MAX_HORIZON_YEARS + 1),
        ] {
            let err = project_sip(&params).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{:?}", params);
        }
    }

    #[test]
    fn test_overflow_reported() {
        let err = project_sip(&SipParameters::new(1e12, 5000.0, 2000)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericOverflow);

        let err = project_sip(&SipParameters::new(f64::MAX, 0.0, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericOverflow);
    }

    #[test]
    fn test_tiny_rate_close_to_zero_rate() {
        let result = project_sip(&SipParameters::new(5000.0, 1e-9, 5)).unwrap();
        assert_relative_eq!(result.total_value, result.total_invested, max_relative = 1e-9);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let params = SipParameters::new(4321.0, 11.3, 17);
        let first = project_sip(&params).unwrap();
        let second = project_sip(&params).unwrap();

        assert_eq!(first.total_value.to_bits(), second.total_value.to_bits());
        assert_eq!(first, second);
    }
}
