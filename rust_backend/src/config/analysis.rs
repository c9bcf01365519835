//! Analysis configuration file support.
//!
//! Reads the analysis window, key column names, inclusion thresholds and the
//! country selection policy from a TOML document. Every section is optional;
//! missing values fall back to the defaults of the 1990–2023 study.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::YearRange;
use crate::error::{PanelError, PanelResult};

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub years: YearRange,
    #[serde(default = "default_country_column")]
    pub country_column: String,
    #[serde(default = "default_year_column")]
    pub year_column: String,
    #[serde(default)]
    pub thresholds: QualityThresholds,
    #[serde(default)]
    pub selection: SelectionPolicy,
}

/// Hard inclusion criteria applied per country, independent of the
/// composite score weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    #[serde(default = "default_min_year_coverage")]
    pub min_year_coverage: f64,
    #[serde(default = "default_min_completeness")]
    pub min_completeness: f64,
    #[serde(default = "default_min_shock_coverage")]
    pub min_shock_coverage: usize,
}

/// Rules for turning the quality ranking into a country list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    #[serde(default = "default_min_years")]
    pub min_years: usize,
    #[serde(default = "default_min_countries")]
    pub min_countries: usize,
}

fn default_country_column() -> String {
    "country_code".to_string()
}

fn default_year_column() -> String {
    "year".to_string()
}

fn default_min_year_coverage() -> f64 {
    0.8
}

fn default_min_completeness() -> f64 {
    0.6
}

fn default_min_shock_coverage() -> usize {
    3
}

fn default_min_years() -> usize {
    25
}

fn default_min_countries() -> usize {
    30
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_year_coverage: default_min_year_coverage(),
            min_completeness: default_min_completeness(),
            min_shock_coverage: default_min_shock_coverage(),
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_years: default_min_years(),
            min_countries: default_min_countries(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            years: YearRange::default(),
            country_column: default_country_column(),
            year_column: default_year_column(),
            thresholds: QualityThresholds::default(),
            selection: SelectionPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load the analysis configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PanelResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PanelError::InvalidConfig(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> PanelResult<Self> {
        let config: AnalysisConfig = toml::from_str(content).map_err(|e| {
            PanelError::InvalidConfig(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PanelResult<()> {
        if self.country_column.is_empty() || self.year_column.is_empty() {
            return Err(PanelError::InvalidConfig(
                "country_column and year_column must be non-empty".to_string(),
            ));
        }
        if self.country_column == self.year_column {
            return Err(PanelError::InvalidConfig(format!(
                "country_column and year_column both name '{}'",
                self.year_column
            )));
        }
        for (name, value) in [
            ("min_year_coverage", self.thresholds.min_year_coverage),
            ("min_completeness", self.thresholds.min_completeness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PanelError::InvalidConfig(format!(
                    "thresholds.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
