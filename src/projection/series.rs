//! Series output structures for projections

use serde::{Deserialize, Serialize};

use super::engine::ScenarioKind;

/// One point of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Periods elapsed at this point (0 = start)
    pub period: u32,

    /// Accumulated value after `period` periods
    pub value: f64,

    /// Amount deposited during this period
    pub contribution: f64,

    /// Growth credited to the balance during this period
    pub earnings: f64,

    /// Yield paid out instead of reinvested
    pub payout: f64,
}

impl PeriodRow {
    /// Create a row with no flows
    pub fn new(period: u32, value: f64) -> Self {
        Self {
            period,
            value,
            contribution: 0.0,
            earnings: 0.0,
            payout: 0.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    /// Scenario that produced the series
    pub kind: ScenarioKind,

    /// Ordered points
    pub rows: Vec<PeriodRow>,
}

impl ProjectionSeries {
    pub fn new(kind: ScenarioKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(kind: ScenarioKind, capacity: usize) -> Self {
        Self {
            kind,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Add a row
    pub fn add_row(&mut self, row: PeriodRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain value sequence
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    /// Value at index `i`, if present
    pub fn value_at(&self, i: usize) -> Option<f64> {
        self.rows.get(i).map(|r| r.value)
    }

    pub fn final_value(&self) -> Option<f64> {
        self.rows.last().map(|r| r.value)
    }

    /// Get summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let total_contributed: f64 = self.rows.iter().map(|r| r.contribution).sum();
        let total_earnings: f64 = self.rows.iter().map(|r| r.earnings).sum();
        let total_paid_out: f64 = self.rows.iter().map(|r| r.payout).sum();

        let starting_value = self
            .rows
            .first()
            .map(|r| r.value - r.contribution - r.earnings)
            .unwrap_or(0.0);
        let final_value = self.final_value().unwrap_or(0.0);

        SeriesSummary {
            periods: self.rows.last().map(|r| r.period).unwrap_or(0),
            starting_value,
            final_value,
            total_contributed,
            total_earnings,
            total_paid_out,
        }
    }
}

/// Summary statistics for a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub periods: u32,
    pub starting_value: f64,
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_earnings: f64,
    pub total_paid_out: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let mut series = ProjectionSeries::new(ScenarioKind::DcaAccumulation);
        series.add_row(PeriodRow {
            period: 1,
            value: 105.0,
            contribution: 100.0,
            earnings: 5.0,
            payout: 0.0,
        });
        series.add_row(PeriodRow {
            period: 2,
            value: 215.25,
            contribution: 100.0,
            earnings: 10.25,
            payout: 0.0,
        });

        let summary = series.summary();
        assert_eq!(summary.periods, 2);
        assert_eq!(summary.starting_value, 0.0);
        assert_eq!(summary.final_value, 215.25);
        assert_eq!(summary.total_contributed, 200.0);
        assert_eq!(summary.total_earnings, 15.25);
    }

    #[test]
    fn test_empty_series_summary() {
        let series = ProjectionSeries::new(ScenarioKind::DcaAccumulation);
        let summary = series.summary();
        assert!(series.is_empty());
        assert_eq!(summary.final_value, 0.0);
        assert_eq!(summary.periods, 0);
    }
}
