//! Investor profile passed to the assistant

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Self-declared risk appetite of the user
///
/// Portuguese names are accepted as aliases both on the command line and in
/// config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InvestorProfile {
    #[serde(alias = "conservador")]
    #[value(alias = "conservador")]
    Conservative,
    #[default]
    #[serde(alias = "moderado")]
    #[value(alias = "moderado")]
    Moderate,
    #[serde(alias = "arrojado")]
    #[value(alias = "arrojado")]
    Aggressive,
}

impl InvestorProfile {
    pub fn label(&self) -> &'static str {
        match self {
            InvestorProfile::Conservative => "conservative",
            InvestorProfile::Moderate => "moderate",
            InvestorProfile::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for InvestorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
