//! Shock-period annotation of country-year panels.
//!
//! Every row receives `is_shock_period`, `shock_name`, `shock_type`,
//! `shock_severity` and `is_regional_focus`. Flags start `false` and labels
//! start empty for every row, so "not in any shock" and "not computed" never
//! look alike. Shocks are applied in catalog order and a later shock
//! overwrites the labels of an earlier one on shared years.
//!
//! The per-shock "years since end" measure is kept out of the frame as an
//! ordered mapping from shock name to a nullable `Int32` series; use
//! [`AnnotatedPanel::to_wide_frame`] for the flat `years_since_<name>` layout.

use log::{info, warn};
use polars::prelude::*;

use super::columns::{string_values, year_values};
use crate::core::{ShockCatalog, ShockDefinition};
use crate::error::PanelResult;

pub const IS_SHOCK_PERIOD: &str = "is_shock_period";
pub const SHOCK_NAME: &str = "shock_name";
pub const SHOCK_TYPE: &str = "shock_type";
pub const SHOCK_SEVERITY: &str = "shock_severity";
pub const IS_REGIONAL_FOCUS: &str = "is_regional_focus";
pub const YEARS_SINCE_PREFIX: &str = "years_since_";

/// A panel with shock labels plus the per-shock years-since series.
#[derive(Debug, Clone)]
pub struct AnnotatedPanel {
    frame: DataFrame,
    years_since: Vec<(String, Series)>,
}

impl AnnotatedPanel {
    /// The input rows with the five label columns appended.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Years since `shock` ended, aligned with the frame rows. Null on and
    /// before the shock's final year.
    pub fn years_since(&self, shock: &str) -> Option<&Series> {
        self.years_since
            .iter()
            .find(|(name, _)| name == shock)
            .map(|(_, series)| series)
    }

    /// Shock names in the order their series were produced.
    pub fn years_since_shocks(&self) -> impl Iterator<Item = &str> {
        self.years_since.iter().map(|(name, _)| name.as_str())
    }

    /// Number of rows flagged as falling inside any shock window.
    pub fn shock_observations(&self) -> PanelResult<usize> {
        let flags = self.frame.column(IS_SHOCK_PERIOD)?.as_materialized_series().bool()?;
        Ok(flags.into_iter().filter(|f| f.unwrap_or(false)).count())
    }

    /// The frame with one `years_since_<shock>` column per shock appended.
    pub fn to_wide_frame(&self) -> PanelResult<DataFrame> {
        let mut wide = self.frame.clone();
        for (_, series) in &self.years_since {
            wide.with_column(series.clone())?;
        }
        Ok(wide)
    }
}

/// Applies a shock catalog to panels with configurable key columns.
pub struct ShockAnnotator<'a> {
    shocks: &'a ShockCatalog,
    year_column: String,
    country_column: String,
}

impl<'a> ShockAnnotator<'a> {
    pub fn new(shocks: &'a ShockCatalog) -> Self {
        Self {
            shocks,
            year_column: "year".to_string(),
            country_column: "country_code".to_string(),
        }
    }

    pub fn with_year_column(mut self, name: impl Into<String>) -> Self {
        self.year_column = name.into();
        self
    }

    pub fn with_country_column(mut self, name: impl Into<String>) -> Self {
        self.country_column = name.into();
        self
    }

    /// Annotates `panel`. Fails if the year or country column is absent.
    pub fn annotate(&self, panel: &DataFrame) -> PanelResult<AnnotatedPanel> {
        info!("Adding shock period indicators");

        let years = year_values(panel, &self.year_column)?;
        let countries = string_values(panel, &self.country_column)?;
        let height = panel.height();

        for (first, second) in self.shocks.overlapping_pairs() {
            warn!(
                "Shocks {} ({}) and {} ({}) overlap; {} labels the shared years",
                first.name, first.window, second.name, second.window, second.name
            );
        }

        let mut is_shock = vec![false; height];
        let mut names = vec![String::new(); height];
        let mut types = vec![String::new(); height];
        let mut severities = vec![String::new(); height];
        let mut regional = vec![false; height];
        let mut years_since = Vec::with_capacity(self.shocks.len());

        for shock in self.shocks {
            let end = shock.window.end();
            let mut since: Vec<Option<i32>> = Vec::with_capacity(height);

            for (row, year) in years.iter().enumerate() {
                let Some(year) = *year else {
                    since.push(None);
                    continue;
                };

                if shock.window.contains(year) {
                    is_shock[row] = true;
                    names[row] = shock.name.clone();
                    types[row] = shock.shock_type.as_str().to_string();
                    severities[row] = shock.severity.as_str().to_string();

                    let in_focus = countries[row]
                        .as_deref()
                        .is_some_and(|c| shock.is_regional_focus(c));
                    if in_focus {
                        regional[row] = true;
                    }
                }

                let elapsed = i64::from(year) - i64::from(end);
                since.push(if elapsed > 0 { i32::try_from(elapsed).ok() } else { None });
            }

            let column_name = format!("{}{}", YEARS_SINCE_PREFIX, shock.name);
            years_since.push((shock.name.clone(), Series::new(column_name.into(), since)));
        }

        let mut frame = panel.clone();
        frame.with_column(Series::new(IS_SHOCK_PERIOD.into(), is_shock))?;
        frame.with_column(Series::new(SHOCK_NAME.into(), names))?;
        frame.with_column(Series::new(SHOCK_TYPE.into(), types))?;
        frame.with_column(Series::new(SHOCK_SEVERITY.into(), severities))?;
        frame.with_column(Series::new(IS_REGIONAL_FOCUS.into(), regional))?;

        let annotated = AnnotatedPanel { frame, years_since };
        info!(
            "Added shock indicators: {} country-year shock observations",
            annotated.shock_observations()?
        );
        Ok(annotated)
    }
}

/// Annotates a panel keyed by `year` and `country_code`.
pub fn annotate(panel: &DataFrame, shocks: &ShockCatalog) -> PanelResult<AnnotatedPanel> {
    ShockAnnotator::new(shocks).annotate(panel)
}

/// Every shock whose window covers `year`, in catalog order.
///
/// The annotated frame carries a single label per row; callers that need all
/// concurrent shocks for a year ask here.
pub fn shock_labels(year: i32, shocks: &ShockCatalog) -> Vec<&ShockDefinition> {
    shocks.iter().filter(|s| s.window.contains(year)).collect()
}
