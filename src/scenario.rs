//! Scenario runner shared by the CLI and the HTTP endpoint
//!
//! Holds one engine configuration and dispatches either a single scenario
//! or the comparative view.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::projection::{
    ComparativeProjection, ProjectionConfig, ProjectionEngine, ProjectionSeries, ScenarioInput,
    ScenarioKind, SeriesSummary,
};

/// What the caller asked to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Simulation {
    CompoundGrowth,
    DcaAccumulation,
    FixedIncome,
    YieldBearing,
    Comparative,
}

impl Simulation {
    /// Single-series kind, `None` for the comparative view
    pub fn kind(&self) -> Option<ScenarioKind> {
        match self {
            Simulation::CompoundGrowth => Some(ScenarioKind::CompoundGrowth),
            Simulation::DcaAccumulation => Some(ScenarioKind::DcaAccumulation),
            Simulation::FixedIncome => Some(ScenarioKind::FixedIncome),
            Simulation::YieldBearing => Some(ScenarioKind::YieldBearing),
            Simulation::Comparative => None,
        }
    }
}

impl From<ScenarioKind> for Simulation {
    fn from(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::CompoundGrowth => Simulation::CompoundGrowth,
            ScenarioKind::DcaAccumulation => Simulation::DcaAccumulation,
            ScenarioKind::FixedIncome => Simulation::FixedIncome,
            ScenarioKind::YieldBearing => Simulation::YieldBearing,
        }
    }
}

/// Result of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum SimulationOutput {
    Series {
        series: ProjectionSeries,
        summary: SeriesSummary,
    },
    Comparison {
        comparison: ComparativeProjection,
    },
}

impl SimulationOutput {
    pub fn series(&self) -> Option<&ProjectionSeries> {
        match self {
            SimulationOutput::Series { series, .. } => Some(series),
            SimulationOutput::Comparison { .. } => None,
        }
    }

    pub fn comparison(&self) -> Option<&ComparativeProjection> {
        match self {
            SimulationOutput::Series { .. } => None,
            SimulationOutput::Comparison { comparison } => Some(comparison),
        }
    }
}

/// Runs simulations against one engine configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single simulation
    pub fn run(
        &self,
        simulation: Simulation,
        input: &ScenarioInput,
    ) -> Result<SimulationOutput, ProjectionError> {
        debug!("running {:?}", simulation);
        match simulation.kind() {
            Some(kind) => {
                let series = self.engine.project(kind, input)?;
                let summary = series.summary();
                Ok(SimulationOutput::Series { series, summary })
            }
            None => Ok(SimulationOutput::Comparison {
                comparison: self.engine.project_comparative(input)?,
            }),
        }
    }

    /// Run the same simulation for several inputs, stopping at the first
    /// invalid one
    pub fn run_batch(
        &self,
        simulation: Simulation,
        inputs: &[ScenarioInput],
    ) -> Result<Vec<SimulationOutput>, ProjectionError> {
        inputs.iter().map(|input| self.run(simulation, input)).collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
