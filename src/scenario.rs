//! Batch projections across many parameter sets
//!
//! Each projection is independent, so batches fan out over rayon's pool and
//! come back in input order.

use rayon::prelude::*;

use crate::error::CalcError;
use crate::projection::{project_sip, ProjectionResult, SipParameters};

/// One rate in a sensitivity sweep
#[derive(Debug, Clone)]
pub struct SweepRow {
    pub annual_return_percent: f64,
    pub result: Result<ProjectionResult, CalcError>,
}

/// Runs many projections against shared contribution settings
///
/// # Example
/// ```
/// use sip_calculator::{ScenarioRunner, SipParameters};
///
/// let base = SipParameters::new(5000.0, 12.0, 10);
/// let rows = ScenarioRunner::new(base).rate_sweep(&[8.0, 10.0, 12.0]);
/// assert_eq!(rows.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRunner {
    base: SipParameters,
}

impl ScenarioRunner {
    pub fn new(base: SipParameters) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &SipParameters {
        &self.base
    }

    /// Project the base contribution and horizon at every rate
    pub fn rate_sweep(&self, rates: &[f64]) -> Vec<SweepRow> {
        rates
            .par_iter()
            .map(|&rate| SweepRow {
                annual_return_percent: rate,
                result: project_sip(&SipParameters {
                    annual_return_percent: rate,
                    ..self.base
                }),
            })
            .collect()
    }

    /// Project the base rate and contribution over each horizon
    pub fn horizon_sweep(&self, horizons: &[u32]) -> Vec<Result<ProjectionResult, CalcError>> {
        let params: Vec<SipParameters> = horizons
            .iter()
            .map(|&horizon_years| SipParameters {
                horizon_years,
                ..self.base
            })
            .collect();
        run_batch(&params)
    }
}

/// Project every parameter set in parallel
pub fn run_batch(params: &[SipParameters]) -> Vec<Result<ProjectionResult, CalcError>> {
    params.par_iter().map(project_sip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_sweep_ordered_and_increasing() {
        let runner = ScenarioRunner::new(SipParameters::new(5000.0, 12.0, 10));
        let rows = runner.rate_sweep(&[4.0, 8.0, 12.0, 16.0]);

        assert_eq!(rows.len(), 4);
        let values: Vec<f64> = rows
            .iter()
            .map(|row| row.result.as_ref().unwrap().total_value)
            .collect();
        assert_eq!(rows[2].annual_return_percent, 12.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sweep_keeps_per_rate_errors() {
        let runner = ScenarioRunner::new(SipParameters::new(5000.0, 12.0, 5));
        let rows = runner.rate_sweep(&[12.0, -100.0]);

        assert!(rows[0].result.is_ok());
        assert!(matches!(rows[1].result, Err(CalcError::DegenerateRate { .. })));
    }

    #[test]
    fn test_batch_matches_single_projection() {
        let params = vec![
            SipParameters::new(5000.0, 12.0, 5),
            SipParameters::new(0.0, 12.0, 5),
            SipParameters::new(1500.0, 0.0, 3),
        ];
        let results = run_batch(&params);

        assert_eq!(results[0].as_ref().unwrap(), &project_sip(&params[0]).unwrap());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().total_value, 54_000.0);
    }

    #[test]
    fn test_horizon_sweep() {
        let runner = ScenarioRunner::new(SipParameters::new(1000.0, 10.0, 1));
        let results = runner.horizon_sweep(&[1, 5, 10]);

        let series_lengths: Vec<usize> = results.iter().map(|r| r.as_ref().unwrap().series.len()).collect();
        assert_eq!(series_lengths, vec![2, 6, 11]);
    }
}
