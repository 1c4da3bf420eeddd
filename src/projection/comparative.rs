//! Side-by-side projections over one horizon

use serde::{Deserialize, Serialize};

use super::series::ProjectionSeries;

/// Legs of the comparison: label and the numerator `n` applied as
/// `rate * n / 12`. `None` uses the base rate as given.
pub const COMPARISON_LEGS: [(&str, Option<f64>); 3] =
    [("base", None), ("12/12", Some(12.0)), ("8/12", Some(8.0))];

/// One series in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLeg {
    pub label: String,
    /// Periodic rate used for this leg
    pub rate: f64,
    pub series: ProjectionSeries,
}

/// Parallel series sharing the same period index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeProjection {
    pub legs: Vec<ComparisonLeg>,
}

impl ComparativeProjection {
    pub fn new(legs: Vec<ComparisonLeg>) -> Self {
        Self { legs }
    }

    /// Number of points shared by every leg
    pub fn len(&self) -> usize {
        self.legs.iter().map(|l| l.series.len()).min().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of every leg at index `i`
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        self.legs.iter().map(|l| l.series.value_at(i)).collect()
    }

    /// Leg with the highest final value
    pub fn best_leg(&self) -> Option<&ComparisonLeg> {
        self.legs.iter().max_by(|a, b| {
            let a = a.series.final_value().unwrap_or(0.0);
            let b = b.series.final_value().unwrap_or(0.0);
            a.total_cmp(&b)
        })
    }
}
