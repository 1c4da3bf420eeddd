//! Rate conversions used by the simulators

use serde::{Deserialize, Serialize};

/// Periods per year for monthly projections
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// How a nominal annual rate is turned into a monthly rate
///
/// `Nominal` divides the annual rate by 12. This overstates growth slightly
/// compared to compounding, but it is what the fixed-income simulator has
/// always reported, so it stays the default. `Effective` solves
/// `(1 + monthly)^12 = 1 + annual` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    #[default]
    Nominal,
    Effective,
}

impl RateConvention {
    /// Monthly fractional rate from an annual rate given in percent
    pub fn monthly_from_annual_percent(self, annual_percent: f64) -> f64 {
        let annual = percent_to_fraction(annual_percent);
        match self {
            RateConvention::Nominal => annual_percent / MONTHS_PER_YEAR / 100.0,
            RateConvention::Effective => (1.0 + annual).powf(1.0 / MONTHS_PER_YEAR) - 1.0,
        }
    }
}

/// 1.5 (%) -> 0.015
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Growth factor `(1 + rate)^periods`
pub fn growth_factor(rate: f64, periods: i64) -> f64 {
    (1.0 + rate).powf(periods as f64)
}
