//! Projection output structures

use serde::{Deserialize, Serialize};

use super::engine::SipParameters;
use crate::format::round_to_unit;

/// Principal and projected value at the end of a whole year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Years elapsed (0 = before the first contribution)
    pub year_index: u32,
    pub invested_to_date: f64,
    pub value_to_date: f64,
}

impl ProjectionPoint {
    pub fn gains_to_date(&self) -> f64 {
        self.value_to_date - self.invested_to_date
    }
}

/// Complete SIP projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Inputs the projection was computed from
    pub parameters: SipParameters,

    /// Sum of all contributions over the horizon
    pub total_invested: f64,

    /// Projected value at the end of the horizon
    pub total_value: f64,

    /// `total_value - total_invested`; negative when the fund loses value
    pub estimated_gains: f64,

    /// One point per year, `0..=horizon_years`
    pub series: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    /// Copy with every amount rounded to the nearest whole unit.
    ///
    /// Gains are rounded from the unrounded difference, so
    /// `rounded.estimated_gains` may differ by one from
    /// `rounded.total_value - rounded.total_invested`.
    pub fn rounded(&self) -> Self {
        Self {
            parameters: self.parameters,
            total_invested: round_to_unit(self.total_invested),
            total_value: round_to_unit(self.total_value),
            estimated_gains: round_to_unit(self.estimated_gains),
            series: self
                .series
                .iter()
                .map(|p| ProjectionPoint {
                    year_index: p.year_index,
                    invested_to_date: round_to_unit(p.invested_to_date),
                    value_to_date: round_to_unit(p.value_to_date),
                })
                .collect(),
        }
    }

    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.series.last()
    }

    /// Share of the final value that is principal vs gains, for the
    /// invested/returns breakdown. `None` when the value is not positive.
    pub fn breakdown(&self) -> Option<(f64, f64)> {
        if self.total_value <= 0.0 {
            return None;
        }
        let invested_share = self.total_invested / self.total_value;
        Some((invested_share, 1.0 - invested_share))
    }
}
