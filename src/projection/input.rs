//! Scenario input record and its validation

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Longest horizon the engine accepts (1000 years of monthly periods)
pub const MAX_PERIODS: i64 = 12_000;

/// Inputs for a single projection request
///
/// `rate` is a fraction per period for every scenario except fixed income,
/// where it is a nominal annual rate in percent (see `ScenarioKind`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Starting balance
    #[serde(default)]
    pub initial_value: f64,

    /// Growth rate, interpreted per scenario kind
    pub rate: f64,

    /// Number of periods to project. Signed so a negative horizon can be
    /// reported instead of wrapping.
    pub periods: i64,

    /// Deposit made at the start of every period (DCA only)
    #[serde(default)]
    pub periodic_contribution: Option<f64>,

    /// Whether yield is added back to the balance (yield-bearing only)
    #[serde(default)]
    pub reinvest: Option<bool>,
}

impl ScenarioInput {
    /// Create an input with no contribution and no reinvestment flag
    pub fn new(initial_value: f64, rate: f64, periods: i64) -> Self {
        Self {
            initial_value,
            rate,
            periods,
            periodic_contribution: None,
            reinvest: None,
        }
    }

    /// Set the periodic contribution
    pub fn with_contribution(mut self, contribution: f64) -> Self {
        self.periodic_contribution = Some(contribution);
        self
    }

    /// Set the reinvestment flag
    pub fn with_reinvest(mut self, reinvest: bool) -> Self {
        self.reinvest = Some(reinvest);
        self
    }

    pub fn contribution(&self) -> f64 {
        self.periodic_contribution.unwrap_or(0.0)
    }

    pub fn reinvests(&self) -> bool {
        self.reinvest.unwrap_or(false)
    }

    /// Check the record before anything is computed
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.periods < 0 {
            return Err(ProjectionError::invalid(format!(
                "periods must be non-negative, got {}",
                self.periods
            )));
        }
        if self.periods > MAX_PERIODS {
            return Err(ProjectionError::invalid(format!(
                "periods must be at most {MAX_PERIODS}, got {}",
                self.periods
            )));
        }

        check_amount("initial_value", self.initial_value)?;
        check_amount("rate", self.rate)?;
        if let Some(contribution) = self.periodic_contribution {
            check_amount("periodic_contribution", contribution)?;
        }

        Ok(())
    }
}

fn check_amount(name: &str, value: f64) -> Result<(), ProjectionError> {
    if !value.is_finite() {
        return Err(ProjectionError::invalid(format!("{name} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(ProjectionError::invalid(format!("{name} must be non-negative, got {value}")));
    }
    Ok(())
}
