//! Trailing return estimation from NAV history
//!
//! Points are located by elapsed calendar days, never by index, so
//! weekends and market holidays in the series do not shift the window.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::error::CalcError;
use crate::format::round_to_places;
use crate::nav::HistoricalPricePoint;

/// Minimum age, in days, of the comparison point
pub const LOOKBACK_DAYS: i64 = 365;

/// Trailing return with the two observations it was computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailingReturn {
    /// Percentage change, rounded to 2 decimal places
    pub percent: f64,

    /// Most recent observation
    pub current: HistoricalPricePoint,

    /// Comparison observation
    pub base: HistoricalPricePoint,

    /// False when the series is shorter than the lookback window and the
    /// oldest point was used instead
    pub full_window: bool,
}

impl TrailingReturn {
    /// Estimate the trailing one-year return as of `as_of`.
    ///
    /// The series may be in any order. The comparison point is the newest
    /// observation at least [`LOOKBACK_DAYS`] old, or the oldest observation
    /// when none is that old.
    pub fn estimate(series: &[HistoricalPricePoint], as_of: NaiveDate) -> Result<Self, CalcError> {
        if series.len() < 2 {
            return Err(CalcError::InsufficientHistory { points: series.len() });
        }

        let ordered = newest_first(series);
        let current = *ordered[0];

        let (base, full_window) = match ordered[1..]
            .iter()
            .find(|p| (as_of - p.date).num_days() >= LOOKBACK_DAYS)
        {
            Some(point) => (**point, true),
            None => (*ordered[ordered.len() - 1], false),
        };

        let percent = percent_change(&base, &current)?;

        debug!(
            "Trailing return as of {}: {} -> {} ({} to {}) = {}%{}",
            as_of,
            base.value,
            current.value,
            base.date,
            current.date,
            percent,
            if full_window { "" } else { " (partial window)" },
        );

        Ok(Self {
            percent,
            current,
            base,
            full_window,
        })
    }

    /// Calendar days between the two observations
    pub fn elapsed_days(&self) -> i64 {
        (self.current.date - self.base.date).num_days()
    }
}

/// Trailing one-year return in percent, rounded to 2 decimal places
pub fn estimate_trailing_return(series: &[HistoricalPricePoint], as_of: NaiveDate) -> Result<f64, CalcError> {
    TrailingReturn::estimate(series, as_of).map(|r| r.percent)
}

/// Change between the two most recent observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayChange {
    pub latest: HistoricalPricePoint,
    pub previous: HistoricalPricePoint,
    pub change: f64,
    pub change_percent: f64,
}

impl DayChange {
    pub fn latest(series: &[HistoricalPricePoint]) -> Result<Self, CalcError> {
        if series.len() < 2 {
            return Err(CalcError::InsufficientHistory { points: series.len() });
        }

        let ordered = newest_first(series);
        let latest = *ordered[0];
        let previous = *ordered[1];

        Ok(Self {
            latest,
            previous,
            change: latest.value - previous.value,
            change_percent: percent_change(&previous, &latest)?,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

// Stable sort keeps input order among same-day points
fn newest_first(series: &[HistoricalPricePoint]) -> Vec<&HistoricalPricePoint> {
    let mut ordered: Vec<&HistoricalPricePoint> = series.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}

fn percent_change(base: &HistoricalPricePoint, current: &HistoricalPricePoint) -> Result<f64, CalcError> {
    if base.value == 0.0 {
        return Err(CalcError::ZeroBaseValue { date: base.date });
    }

    let percent = round_to_places((current.value - base.value) / base.value * 100.0, 2);
    if !percent.is_finite() {
        return Err(CalcError::NumericOverflow {
            context: format!("return between {} and {}", base.date, current.date),
        });
    }
    Ok(percent)
}
