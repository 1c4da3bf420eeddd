//! finai - financial-education simulators and assistant
//!
//! This library provides:
//! - Projection engine: compound growth, dollar-cost averaging, fixed income,
//!   yield-bearing assets, and a side-by-side comparison
//! - Scenario runner shared by the CLI and the HTTP endpoint
//! - Chat-completion client with an explicit success/failure outcome
//! - Append-only conversation log on SQLite
//! - Configuration and presentation helpers

pub mod assistant;
pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod profile;
pub mod projection;
pub mod render;
pub mod scenario;

// Re-export commonly used types
pub use assistant::Assistant;
pub use chat::{ChatOutcome, ChatService, CompletionClient};
pub use config::{AppConfig, DisplayConfig};
pub use error::{AssistantError, ChatError, HistoryError, ProjectionError};
pub use history::{ConversationLog, ConversationRecord};
pub use profile::InvestorProfile;
pub use projection::{project, project_comparative, ProjectionSeries, ScenarioInput, ScenarioKind};
pub use scenario::{ScenarioRunner, Simulation, SimulationOutput};
