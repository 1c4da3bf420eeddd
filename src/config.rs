//! Application configuration
//!
//! Settings come from an optional JSON file, then environment variables
//! override individual fields:
//!   FINAI_DATABASE, GROQ_API_KEY, FINAI_CHAT_MODEL, FINAI_CHAT_BASE_URL

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::ChatConfig;
use crate::history::DEFAULT_DATABASE_PATH;
use crate::profile::InvestorProfile;
use crate::projection::ProjectionConfig;

/// How numbers are shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub decimals: usize,
    pub thousands_separator: Option<char>,
    pub decimal_separator: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            decimals: 2,
            thousands_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

/// Everything the binaries need, passed explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub default_profile: InvestorProfile,
    pub chat: ChatConfig,
    pub display: DisplayConfig,
    pub projection: ProjectionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            default_profile: InvestorProfile::default(),
            chat: ChatConfig::default(),
            display: DisplayConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading config file: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing config JSON in {}", path.display()))?;
        Ok(config)
    }

    /// File (if any) plus process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env: HashMap<String, String> = std::env::vars().collect();
        config.apply_env(&env);
        Ok(config)
    }

    /// Apply overrides from an environment map
    pub fn apply_env(&mut self, env: &HashMap<String, String>) {
        let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(path) = get("FINAI_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(key) = get("GROQ_API_KEY") {
            self.chat.api_key = Some(key.to_string());
        }
        if let Some(model) = get("FINAI_CHAT_MODEL") {
            self.chat.model = model.to_string();
        }
        if let Some(url) = get("FINAI_CHAT_BASE_URL") {
            self.chat.base_url = url.to_string();
        }
    }
}
