//! Projection engine for the financial simulators

mod comparative;
mod engine;
mod input;
pub mod rates;
mod series;

pub use comparative::{ComparativeProjection, ComparisonLeg, COMPARISON_LEGS};
pub use engine::{project, project_comparative, ProjectionConfig, ProjectionEngine, ScenarioKind};
pub use input::{ScenarioInput, MAX_PERIODS};
pub use rates::RateConvention;
pub use series::{PeriodRow, ProjectionSeries, SeriesSummary};
