//! Core projection engine for the simulators

use log::debug;
use serde::{Deserialize, Serialize};

use super::comparative::{ComparativeProjection, ComparisonLeg, COMPARISON_LEGS};
use super::input::ScenarioInput;
use super::rates::{growth_factor, RateConvention};
use super::series::{PeriodRow, ProjectionSeries};
use crate::error::ProjectionError;

/// Which projection to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// `initial * (1 + rate)^i` for every period, including period 0
    CompoundGrowth,
    /// Fixed deposit at the start of each period, then growth.
    /// The series starts after the first period.
    DcaAccumulation,
    /// Compound growth at a monthly rate derived from `rate`, which is a
    /// nominal annual rate in percent
    FixedIncome,
    /// Balance earns `rate` each period; the yield is either added back
    /// (`reinvest`) or paid out
    YieldBearing,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::CompoundGrowth,
        ScenarioKind::DcaAccumulation,
        ScenarioKind::FixedIncome,
        ScenarioKind::YieldBearing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::CompoundGrowth => "Compound growth",
            ScenarioKind::DcaAccumulation => "Dollar-cost averaging",
            ScenarioKind::FixedIncome => "Fixed income",
            ScenarioKind::YieldBearing => "Yield-bearing asset",
        }
    }
}

/// Configuration for the projection engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Annual-to-monthly conversion for fixed income
    #[serde(default)]
    pub fixed_income_convention: RateConvention,
}

/// Main projection engine
///
/// Stateless: every call validates its input and builds a fresh series.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run one scenario
    pub fn project(
        &self,
        kind: ScenarioKind,
        input: &ScenarioInput,
    ) -> Result<ProjectionSeries, ProjectionError> {
        input.validate()?;
        debug!(
            "projecting {:?}: initial={} rate={} periods={}",
            kind, input.initial_value, input.rate, input.periods
        );

        match kind {
            ScenarioKind::CompoundGrowth => {
                ensure_finite_growth(input.rate, input.periods, input.initial_value)?;
                Ok(compound_series(kind, input.initial_value, input.rate, input.periods))
            }
            ScenarioKind::FixedIncome => {
                let monthly = self
                    .config
                    .fixed_income_convention
                    .monthly_from_annual_percent(input.rate);
                ensure_finite_growth(monthly, input.periods, input.initial_value)?;
                Ok(compound_series(kind, input.initial_value, monthly, input.periods))
            }
            ScenarioKind::DcaAccumulation => {
                let deposited = input.contribution() * input.periods as f64;
                ensure_finite_growth(input.rate, input.periods, deposited)?;
                Ok(dca_series(input.contribution(), input.rate, input.periods))
            }
            ScenarioKind::YieldBearing => {
                if input.reinvests() {
                    ensure_finite_growth(input.rate, input.periods, input.initial_value)?;
                } else {
                    ensure_finite_payout(input.initial_value, input.rate, input.periods)?;
                }
                Ok(yield_series(
                    input.initial_value,
                    input.rate,
                    input.periods,
                    input.reinvests(),
                ))
            }
        }
    }

    /// Compound growth over the same horizon at three rates derived from
    /// `input.rate`
    pub fn project_comparative(
        &self,
        input: &ScenarioInput,
    ) -> Result<ComparativeProjection, ProjectionError> {
        input.validate()?;

        let mut legs = Vec::with_capacity(COMPARISON_LEGS.len());
        for (label, numerator) in COMPARISON_LEGS {
            let rate = numerator.map_or(input.rate, |n| input.rate * n / 12.0);
            ensure_finite_growth(rate, input.periods, input.initial_value)?;
            legs.push(ComparisonLeg {
                label: label.to_string(),
                rate,
                series: compound_series(
                    ScenarioKind::CompoundGrowth,
                    input.initial_value,
                    rate,
                    input.periods,
                ),
            });
        }
        debug!("comparative projection over {} periods", input.periods);

        Ok(ComparativeProjection::new(legs))
    }
}

/// Run one scenario with the default engine configuration
pub fn project(kind: ScenarioKind, input: &ScenarioInput) -> Result<ProjectionSeries, ProjectionError> {
    ProjectionEngine::default().project(kind, input)
}

/// Comparative projection with the default engine configuration
pub fn project_comparative(input: &ScenarioInput) -> Result<ComparativeProjection, ProjectionError> {
    ProjectionEngine::default().project_comparative(input)
}

/// Reject horizons whose largest value would not be finite. A zero
/// principal stays zero at any rate.
fn ensure_finite_growth(rate: f64, periods: i64, principal: f64) -> Result<(), ProjectionError> {
    if principal == 0.0 {
        return Ok(());
    }
    let factor = growth_factor(rate, periods);
    if !factor.is_finite() || !(principal * factor).is_finite() {
        return Err(ProjectionError::invalid(format!(
            "rate {rate} over {periods} periods overflows"
        )));
    }
    Ok(())
}

/// Balance is flat without reinvestment; only the payouts need to stay finite
fn ensure_finite_payout(initial: f64, rate: f64, periods: i64) -> Result<(), ProjectionError> {
    let dividend = initial * rate;
    if !dividend.is_finite() || !(dividend * periods as f64).is_finite() {
        return Err(ProjectionError::invalid(format!(
            "payout of {initial} at rate {rate} over {periods} periods overflows"
        )));
    }
    Ok(())
}

fn compound_series(kind: ScenarioKind, initial: f64, rate: f64, periods: i64) -> ProjectionSeries {
    let mut series = ProjectionSeries::with_capacity(kind, periods as usize + 1);
    let mut previous = initial;

    for i in 0..=periods {
        // 0 * inf would be NaN
        let value = if initial == 0.0 {
            0.0
        } else {
            initial * growth_factor(rate, i)
        };
        let mut row = PeriodRow::new(i as u32, value);
        if i > 0 {
            row.earnings = value - previous;
        }
        series.add_row(row);
        previous = value;
    }

    series
}

fn dca_series(contribution: f64, rate: f64, periods: i64) -> ProjectionSeries {
    let mut series = ProjectionSeries::with_capacity(ScenarioKind::DcaAccumulation, periods as usize);
    let mut total = 0.0;

    for i in 1..=periods {
        // Deposit lands before growth is applied
        let funded = total + contribution;
        let next = funded * (1.0 + rate);
        series.add_row(PeriodRow {
            period: i as u32,
            value: next,
            contribution,
            earnings: next - funded,
            payout: 0.0,
        });
        total = next;
    }

    series
}

fn yield_series(initial: f64, rate: f64, periods: i64, reinvest: bool) -> ProjectionSeries {
    let mut series = ProjectionSeries::with_capacity(ScenarioKind::YieldBearing, periods as usize + 1);
    series.add_row(PeriodRow::new(0, initial));
    let mut total = initial;

    for i in 1..=periods {
        let dividend = total * rate;
        let mut row = PeriodRow::new(i as u32, total);
        if reinvest {
            total += dividend;
            row.value = total;
            row.earnings = dividend;
        } else {
            row.payout = dividend;
        }
        series.add_row(row);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_growth_twelve_months() {
        let input = ScenarioInput::new(1000.0, 0.01, 12);
        let series = project(ScenarioKind::CompoundGrowth, &input).unwrap();

        assert_eq!(series.len(), 13);
        assert_eq!(series.value_at(0), Some(1000.0));
        assert_relative_eq!(series.value_at(12).unwrap(), 1000.0 * 1.01_f64.powi(12), epsilon = 1e-9);
        assert_relative_eq!(series.value_at(12).unwrap(), 1126.83, epsilon = 0.01);
    }

    #[test]
    fn test_compound_growth_length_and_monotonic() {
        for &(initial, rate, periods) in &[
            (0.0, 0.0, 0),
            (1000.0, 0.0, 5),
            (250.0, 0.035, 40),
            (1.0, 2.0, 30),
            (0.0, 0.1, 10),
        ] {
            let input = ScenarioInput::new(initial, rate, periods);
            let values = project(ScenarioKind::CompoundGrowth, &input).unwrap().values();
            assert_eq!(values.len(), periods as usize + 1);
            assert!(values.windows(2).all(|w| w[1] >= w[0]));
            assert!(values.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_compound_growth_is_deterministic() {
        let input = ScenarioInput::new(1234.56, 0.0077, 120);
        let a = project(ScenarioKind::CompoundGrowth, &input).unwrap().values();
        let b = project(ScenarioKind::CompoundGrowth, &input).unwrap().values();
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn test_dca_accumulation() {
        let input = ScenarioInput::new(0.0, 0.05, 3).with_contribution(100.0);
        let series = project(ScenarioKind::DcaAccumulation, &input).unwrap();
        let values = series.values();

        assert_eq!(values.len(), 3);
        assert_relative_eq!(values[0], 105.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], 215.25, epsilon = 1e-9);
        assert_relative_eq!(values[2], 331.0125, epsilon = 1e-9);
        assert_eq!(series.rows[0].period, 1);

        let summary = series.summary();
        assert_relative_eq!(summary.total_contributed, 300.0);
        assert_relative_eq!(summary.total_earnings, 31.0125, epsilon = 1e-9);
    }

    #[test]
    fn test_dca_ignores_initial_value() {
        let with = ScenarioInput::new(5000.0, 0.05, 3).with_contribution(100.0);
        let without = ScenarioInput::new(0.0, 0.05, 3).with_contribution(100.0);
        assert_eq!(
            project(ScenarioKind::DcaAccumulation, &with).unwrap().values(),
            project(ScenarioKind::DcaAccumulation, &without).unwrap().values()
        );
    }

    #[test]
    fn test_dca_zero_periods_is_empty() {
        let input = ScenarioInput::new(0.0, 0.05, 0).with_contribution(100.0);
        assert!(project(ScenarioKind::DcaAccumulation, &input).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_income_matches_compound() {
        let fixed = project(ScenarioKind::FixedIncome, &ScenarioInput::new(1000.0, 12.0, 12)).unwrap();
        let compound = project(ScenarioKind::CompoundGrowth, &ScenarioInput::new(1000.0, 0.01, 12)).unwrap();

        assert_eq!(fixed.kind, ScenarioKind::FixedIncome);
        assert_eq!(fixed.len(), compound.len());
        for (a, b) in fixed.values().iter().zip(compound.values()) {
            assert_relative_eq!(*a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fixed_income_effective_convention_grows_less() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            fixed_income_convention: RateConvention::Effective,
        });
        let input = ScenarioInput::new(1000.0, 12.0, 12);
        let effective = engine.project(ScenarioKind::FixedIncome, &input).unwrap();
        let nominal = project(ScenarioKind::FixedIncome, &input).unwrap();

        assert_relative_eq!(effective.final_value().unwrap(), 1120.0, epsilon = 1e-9);
        assert!(nominal.final_value().unwrap() > effective.final_value().unwrap());
    }

    #[test]
    fn test_zero_periods_single_value() {
        let input = ScenarioInput::new(750.0, 0.02, 0);
        for kind in [ScenarioKind::CompoundGrowth, ScenarioKind::FixedIncome, ScenarioKind::YieldBearing] {
            assert_eq!(project(kind, &input).unwrap().values(), vec![750.0]);
        }
    }

    #[test]
    fn test_yield_without_reinvestment_is_flat() {
        let input = ScenarioInput::new(10_000.0, 0.008, 24).with_reinvest(false);
        let series = project(ScenarioKind::YieldBearing, &input).unwrap();

        assert_eq!(series.len(), 25);
        assert!(series.values().iter().all(|&v| v == 10_000.0));
        assert_relative_eq!(series.summary().total_paid_out, 10_000.0 * 0.008 * 24.0, epsilon = 1e-6);
    }

    #[test]
    fn test_yield_with_reinvestment_strictly_increases() {
        let input = ScenarioInput::new(10_000.0, 0.008, 24).with_reinvest(true);
        let series = project(ScenarioKind::YieldBearing, &input).unwrap();
        let values = series.values();

        assert_eq!(values[0], 10_000.0);
        assert!(values.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(series.summary().total_paid_out, 0.0);
    }

    #[test]
    fn test_comparative_three_legs() {
        let input = ScenarioInput::new(1000.0, 0.01, 24);
        let comparison = project_comparative(&input).unwrap();

        assert_eq!(comparison.legs.len(), 3);
        assert!(comparison.legs.iter().all(|leg| leg.series.len() == 25));
        assert_eq!(comparison.legs[0].rate, 0.01);
        assert_relative_eq!(comparison.legs[1].rate, 0.01 * 12.0 / 12.0);
        assert_relative_eq!(comparison.legs[2].rate, 0.01 * 8.0 / 12.0, epsilon = 1e-15);
        assert!(comparison.legs[2].series.final_value() < comparison.legs[0].series.final_value());
    }

    #[test]
    fn test_invalid_input_rejected_for_every_kind() {
        let input = ScenarioInput::new(1000.0, 0.01, -3);
        for kind in ScenarioKind::ALL {
            assert!(matches!(project(kind, &input), Err(ProjectionError::InvalidInput(_))));
        }
        assert!(project_comparative(&input).is_err());
    }

    #[test]
    fn test_overflowing_horizon_rejected() {
        let input = ScenarioInput::new(1.0, 1e6, 1000);
        assert!(project(ScenarioKind::CompoundGrowth, &input).is_err());
        assert!(project(ScenarioKind::YieldBearing, &input.clone().with_reinvest(true)).is_err());
    }

    #[test]
    fn test_flat_yield_at_large_rate_is_accepted() {
        let input = ScenarioInput::new(1000.0, 10.0, 400).with_reinvest(false);
        let series = project(ScenarioKind::YieldBearing, &input).unwrap();

        assert_eq!(series.len(), 401);
        assert!(series.values().iter().all(|&v| v == 1000.0));
        assert_relative_eq!(series.summary().total_paid_out, 10_000.0 * 400.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_principal_at_large_rate_stays_zero() {
        let compound = project(ScenarioKind::CompoundGrowth, &ScenarioInput::new(0.0, 10.0, 400)).unwrap();
        assert_eq!(compound.len(), 401);
        assert!(compound.values().iter().all(|&v| v == 0.0));

        let dca = ScenarioInput::new(0.0, 10.0, 400).with_contribution(0.0);
        let series = project(ScenarioKind::DcaAccumulation, &dca).unwrap();
        assert_eq!(series.len(), 400);
        assert!(series.values().iter().all(|&v| v == 0.0));

        let comparison = project_comparative(&ScenarioInput::new(0.0, 10.0, 400)).unwrap();
        assert!(comparison.legs.iter().all(|leg| leg.series.final_value() == Some(0.0)));
    }
}
