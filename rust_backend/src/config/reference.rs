//! Reference catalogs loaded from TOML.
//!
//! The bundled `config/reference.toml` carries the 38 focus countries, their
//! groupings, the five major shocks of 1990–2023 and the World Bank indicator
//! dictionary. A different file can be supplied at startup; either way the
//! result is an immutable [`ReferenceData`] handed to the pipeline.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::{
    CountryCatalog, IndicatorCatalog, IndicatorCategory, Severity, ShockCatalog,
    ShockDefinition, ShockType, YearRange,
};
use crate::error::{PanelError, PanelResult};

const BUNDLED_REFERENCE: &str = include_str!("../../config/reference.toml");

/// Countries, shocks and indicators for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub countries: CountryCatalog,
    pub shocks: ShockCatalog,
    pub indicators: IndicatorCatalog,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(default)]
    countries: RawCountries,
    #[serde(default)]
    shocks: Vec<RawShock>,
    #[serde(default)]
    indicators: Vec<IndicatorCategory>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCountries {
    #[serde(default)]
    focus: Vec<String>,
    #[serde(default)]
    groups: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawShock {
    name: String,
    start: i32,
    end: i32,
    #[serde(rename = "type")]
    shock_type: ShockType,
    severity: Severity,
    #[serde(default)]
    regional_focus: Vec<String>,
    #[serde(default = "default_global_impact")]
    global_impact: bool,
    #[serde(default)]
    description: String,
}

fn default_global_impact() -> bool {
    true
}

impl RawShock {
    fn into_definition(self) -> PanelResult<ShockDefinition> {
        let window = YearRange::new(self.start, self.end).map_err(|_| {
            PanelError::InvalidCatalog(format!(
                "shock {} ends ({}) before it starts ({})",
                self.name, self.end, self.start
            ))
        })?;
        Ok(
            ShockDefinition::new(self.name, window, self.shock_type, self.severity)
                .with_regional_focus(self.regional_focus)
                .with_global_impact(self.global_impact)
                .with_description(self.description),
        )
    }
}

impl ReferenceData {
    pub fn new(
        countries: CountryCatalog,
        shocks: ShockCatalog,
        indicators: IndicatorCatalog,
    ) -> Self {
        Self {
            countries,
            shocks,
            indicators,
        }
    }

    /// The catalogs bundled with the crate.
    pub fn builtin() -> PanelResult<Self> {
        Self::from_toml_str(BUNDLED_REFERENCE)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> PanelResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PanelError::InvalidConfig(format!(
                "Failed to read reference file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PanelResult<Self> {
        let raw: RawReference = toml::from_str(content).map_err(|e| {
            PanelError::InvalidConfig(format!("Failed to parse reference file: {}", e))
        })?;

        let countries = CountryCatalog::new(raw.countries.focus, raw.countries.groups)?;
        let shocks = raw
            .shocks
            .into_iter()
            .map(RawShock::into_definition)
            .collect::<PanelResult<Vec<_>>>()?;
        let shocks = ShockCatalog::new(shocks)?;
        let indicators = IndicatorCatalog::new(raw.indicators)?;

        Ok(Self::new(countries, shocks, indicators))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs() {
        let reference = ReferenceData::builtin().unwrap();

        assert_eq!(reference.countries.len(), 38);
        assert_eq!(reference.countries.group("developed_oecd").unwrap().len(), 20);
        assert_eq!(reference.countries.group("emerging_markets").unwrap().len(), 18);
        assert_eq!(reference.countries.group_names().count(), 7);

        assert_eq!(
            reference.shocks.names(),
            vec![
                "asian_financial_crisis_1997",
                "dotcom_recession_2001",
                "global_financial_crisis_2008",
                "european_debt_crisis_2010",
                "covid_pandemic_2020",
            ]
        );
        let gfc = reference.shocks.get("global_financial_crisis_2008").unwrap();
        assert_eq!(gfc.severity, Severity::VeryHigh);
        assert!(gfc.is_regional_focus("GRC"));
        let euro = reference.shocks.get("european_debt_crisis_2010").unwrap();
        assert_eq!(euro.shock_type, ShockType::SovereignDebt);
        assert!(!euro.global_impact);
        assert!(reference.shocks.get("covid_pandemic_2020").unwrap().is_global_focus());

        assert_eq!(reference.indicators.len(), 26);
        assert_eq!(reference.indicators.categories().len(), 7);
        assert_eq!(
            reference.indicators.column_for("FR.INR.RINR"),
            Some("real_interest_rate")
        );
    }

    #[test]
    fn test_inverted_shock_window_rejected() {
        let result = ReferenceData::from_toml_str(
            r#"
            [[shocks]]
            name = "backwards"
            start = 2010
            end = 2008
            type = "financial"
            severity = "low"
            "#,
        );
        assert!(matches!(result, Err(PanelError::InvalidCatalog(_))));
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let result = ReferenceData::from_toml_str(
            r#"
            [[shocks]]
            name = "odd"
            start = 2010
            end = 2011
            type = "financial"
            severity = "apocalyptic"
            "#,
        );
        assert!(matches!(result, Err(PanelError::InvalidConfig(_))));
    }

    #[test]
    fn test_minimal_document() {
        let reference = ReferenceData::from_toml_str(
            r#"
            [countries]
            focus = ["ZZZ"]

            [[shocks]]
            name = "oil_shock"
            start = 1990
            end = 1991
            type = "commodity"
            severity = "medium"
            "#,
        )
        .unwrap();
        assert_eq!(reference.countries.focus(), &["ZZZ".to_string()]);
        let shock = reference.shocks.get("oil_shock").unwrap();
        assert_eq!(shock.shock_type, ShockType::Other("commodity".into()));
        assert!(shock.global_impact);
        assert!(reference.indicators.is_empty());
    }
}
