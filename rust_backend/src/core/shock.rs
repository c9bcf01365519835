//! Macroeconomic shock definitions and the ordered shock catalog.
//!
//! A shock is a named, inclusive window of years with a type, an ordinal
//! severity and an optional set of countries it hit hardest. The catalog is
//! reference data: built once from configuration and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use super::years::YearRange;
use crate::error::{PanelError, PanelResult};

/// Ordinal severity of a shock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::VeryHigh => "very_high",
        }
    }
}

impl FromStr for Severity {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "very_high" => Ok(Severity::VeryHigh),
            other => Err(PanelError::InvalidCatalog(format!(
                "Unknown severity: {}. Must be 'low', 'medium', 'high', or 'very_high'",
                other
            ))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a shock. Unrecognised categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShockType {
    Financial,
    SovereignDebt,
    HealthEconomic,
    Other(String),
}

impl ShockType {
    pub fn as_str(&self) -> &str {
        match self {
            ShockType::Financial => "financial",
            ShockType::SovereignDebt => "sovereign_debt",
            ShockType::HealthEconomic => "health_economic",
            ShockType::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for ShockType {
    fn from(value: &str) -> Self {
        match value {
            "financial" => ShockType::Financial,
            "sovereign_debt" => ShockType::SovereignDebt,
            "health_economic" => ShockType::HealthEconomic,
            other => ShockType::Other(other.to_string()),
        }
    }
}

impl From<String> for ShockType {
    fn from(value: String) -> Self {
        ShockType::from(value.as_str())
    }
}

impl From<ShockType> for String {
    fn from(value: ShockType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ShockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named shock window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShockDefinition {
    pub name: String,
    pub window: YearRange,
    pub shock_type: ShockType,
    pub severity: Severity,
    /// Countries most affected; empty means the shock is treated as global.
    pub regional_focus: BTreeSet<String>,
    pub global_impact: bool,
    pub description: String,
}

impl ShockDefinition {
    pub fn new(
        name: impl Into<String>,
        window: YearRange,
        shock_type: ShockType,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            window,
            shock_type,
            severity,
            regional_focus: BTreeSet::new(),
            global_impact: true,
            description: String::new(),
        }
    }

    pub fn with_regional_focus<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regional_focus = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_global_impact(mut self, global_impact: bool) -> Self {
        self.global_impact = global_impact;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_global_focus(&self) -> bool {
        self.regional_focus.is_empty()
    }

    pub fn is_regional_focus(&self, country_code: &str) -> bool {
        self.regional_focus.contains(country_code)
    }
}

/// Ordered, name-unique collection of shock definitions.
///
/// Iteration follows insertion order. The annotator relies on this order for
/// its last-write-wins labelling of overlapping windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShockCatalog {
    shocks: Vec<ShockDefinition>,
}

impl ShockCatalog {
    /// Builds a catalog, rejecting empty or duplicate names and empty
    /// regional-focus country codes.
    pub fn new(shocks: Vec<ShockDefinition>) -> PanelResult<Self> {
        let mut seen = HashSet::new();
        for shock in &shocks {
            if shock.name.trim().is_empty() {
                return Err(PanelError::InvalidCatalog(
                    "shock definition with an empty name".to_string(),
                ));
            }
            if !seen.insert(shock.name.as_str()) {
                return Err(PanelError::InvalidCatalog(format!(
                    "duplicate shock name: {}",
                    shock.name
                )));
            }
            if shock.regional_focus.iter().any(|c| c.trim().is_empty()) {
                return Err(PanelError::InvalidCatalog(format!(
                    "shock {} lists an empty regional focus country code",
                    shock.name
                )));
            }
        }
        Ok(Self { shocks })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShockDefinition> {
        self.shocks.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ShockDefinition> {
        self.shocks.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.shocks.iter().map(|s| s.name.as_str()).collect()
    }

    /// Pairs of shocks whose windows share at least one year, in catalog order.
    pub fn overlapping_pairs(&self) -> Vec<(&ShockDefinition, &ShockDefinition)> {
        let mut pairs = Vec::new();
        for (i, first) in self.shocks.iter().enumerate() {
            for second in &self.shocks[i + 1..] {
                if first.window.overlaps(&second.window) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }
}

impl<'a> IntoIterator for &'a ShockCatalog {
    type Item = &'a ShockDefinition;
    type IntoIter = std::slice::Iter<'a, ShockDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.shocks.iter()
    }
}
