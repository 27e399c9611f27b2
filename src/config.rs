// src/config.rs
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "decisional.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub heuristics: HeuristicConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Appended to the language's built-in list of identifiers that never
    /// start a method (exception constructions and the like).
    #[serde(default)]
    pub excluded_identifiers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_high")]
    pub high_threshold: u64,
    #[serde(default = "default_medium")]
    pub medium_threshold: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high(),
            medium_threshold: default_medium(),
        }
    }
}

const fn default_high() -> u64 { 10 }
const fn default_medium() -> u64 { 5 }

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `decisional.toml` from the working directory if present.
    /// An unreadable or invalid file is logged and ignored.
    #[must_use]
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::new();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = CONFIG_FILE, error = %e, "ignoring config file");
                Self::new()
            }
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(e, path))?;
        Self::parse(&content)
    }

    /// # Errors
    /// Returns error on invalid TOML or inconsistent thresholds.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns error if the heat bands overlap or are empty.
    pub fn validate(&self) -> Result<()> {
        let report = &self.report;
        if report.high_threshold == 0 {
            return Err(AnalysisError::Config("high_threshold must be positive".into()));
        }
        if report.medium_threshold > report.high_threshold {
            return Err(AnalysisError::Config(format!(
                "medium_threshold ({}) exceeds high_threshold ({})",
                report.medium_threshold, report.high_threshold
            )));
        }
        Ok(())
    }
}
