//! Preparation of Maddison-style raw panels.
//!
//! Column names are standardised, rows are cut to the analysis window and
//! focus countries, and the derived GDP series are added.

use log::{debug, info};
use polars::prelude::*;
use std::collections::HashSet;

use super::columns::{float_values, has_column, require_column, string_values, year_values};
use crate::core::{CountryCatalog, YearRange};
use crate::error::PanelResult;

/// Source column names (after lower-casing) and their panel names.
pub const MADDISON_COLUMNS: [(&str, &str); 5] = [
    ("countrycode", "country_code"),
    ("country", "country_name"),
    ("year", "year"),
    ("gdppc", "gdp_per_capita"),
    ("pop", "population"),
];

pub const GDP_PER_CAPITA: &str = "gdp_per_capita";
pub const POPULATION: &str = "population";
pub const GDP_TOTAL: &str = "gdp_total";
pub const LOG_GDP_PER_CAPITA: &str = "log_gdp_per_capita";
pub const GDP_GROWTH: &str = "gdp_growth";
pub const POPULATION_GROWTH: &str = "population_growth_maddison";

/// Lower-cases every column name and maps the Maddison names onto the
/// panel vocabulary. Other columns keep their lower-cased name.
pub fn standardize_columns(frame: &DataFrame) -> PanelResult<DataFrame> {
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| {
            let lower = name.as_str().to_lowercase();
            MADDISON_COLUMNS
                .iter()
                .find(|(source, _)| *source == lower)
                .map(|(_, target)| target.to_string())
                .unwrap_or(lower)
        })
        .collect();

    let mut standardized = frame.clone();
    standardized.set_column_names(names)?;
    Ok(standardized)
}

/// Keeps rows inside `years` whose country is in the focus catalog. Rows
/// with a null year or country are dropped.
pub fn filter_focus(
    frame: &DataFrame,
    years: YearRange,
    countries: &CountryCatalog,
    year_column: &str,
    country_column: &str,
) -> PanelResult<DataFrame> {
    let year_values = year_values(frame, year_column)?;
    let country_values = string_values(frame, country_column)?;

    let keep: Vec<bool> = year_values
        .iter()
        .zip(country_values.iter())
        .map(|(year, country)| match (year, country) {
            (Some(year), Some(country)) => years.contains(*year) && countries.contains(country),
            _ => false,
        })
        .collect();

    let mask = BooleanChunked::from_slice("focus".into(), &keep);
    let filtered = frame.filter(&mask)?;

    let found: HashSet<&str> = country_values
        .iter()
        .zip(keep.iter())
        .filter(|(_, keep)| **keep)
        .filter_map(|(country, _)| country.as_deref())
        .collect();
    info!(
        "Filtered panel to {} rows over {} ({} of {} focus countries found)",
        filtered.height(),
        years,
        found.len(),
        countries.len()
    );

    Ok(filtered)
}

/// Within-group percent change (× 100) for rows already sorted by group.
///
/// The first row of every group is null, as is any row whose own or
/// previous value is missing, or whose previous value is zero.
///
/// This deliberately differs from a pad-filled percent change: gaps are not
/// bridged from the last observed value, and a zero base gives null rather
/// than an infinite change.
pub fn pct_change_by_group(groups: &[Option<String>], values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut changes = Vec::with_capacity(values.len());
    for row in 0..values.len() {
        if row == 0 || groups[row].is_none() || groups[row] != groups[row - 1] {
            changes.push(None);
            continue;
        }
        let change = match (values[row - 1], values[row]) {
            (Some(previous), Some(current)) if previous != 0.0 => {
                Some((current / previous - 1.0) * 100.0)
            }
            _ => None,
        };
        changes.push(change);
    }
    changes
}

/// Sorts by (country, year) and appends `gdp_total`, `log_gdp_per_capita`,
/// `gdp_growth` and `population_growth_maddison`.
///
/// Requires `gdp_per_capita` and `population`.
pub fn add_derived_variables(
    frame: &DataFrame,
    year_column: &str,
    country_column: &str,
) -> PanelResult<DataFrame> {
    require_column(frame, GDP_PER_CAPITA)?;
    require_column(frame, POPULATION)?;
    require_column(frame, year_column)?;
    require_column(frame, country_column)?;

    let mut sorted = frame
        .clone()
        .lazy()
        .sort_by_exprs(
            [col(country_column), col(year_column)],
            SortMultipleOptions::default(),
        )
        .collect()?;

    let countries = string_values(&sorted, country_column)?;
    let gdp_per_capita = float_values(&sorted, GDP_PER_CAPITA)?;
    let population = float_values(&sorted, POPULATION)?;

    let gdp_total: Vec<Option<f64>> = gdp_per_capita
        .iter()
        .zip(population.iter())
        .map(|(gdppc, pop)| Some((*gdppc)? * (*pop)?))
        .collect();
    let log_gdp: Vec<Option<f64>> = gdp_per_capita
        .iter()
        .map(|gdppc| gdppc.filter(|v| *v > 0.0).map(f64::ln))
        .collect();
    let gdp_growth = pct_change_by_group(&countries, &gdp_per_capita);
    let population_growth = pct_change_by_group(&countries, &population);

    sorted.with_column(Series::new(GDP_TOTAL.into(), gdp_total))?;
    sorted.with_column(Series::new(LOG_GDP_PER_CAPITA.into(), log_gdp))?;
    sorted.with_column(Series::new(GDP_GROWTH.into(), gdp_growth))?;
    sorted.with_column(Series::new(POPULATION_GROWTH.into(), population_growth))?;

    debug!("Added derived GDP variables to {} rows", sorted.height());
    Ok(sorted)
}

/// Whether a frame carries the inputs [`add_derived_variables`] needs.
pub fn has_maddison_series(frame: &DataFrame) -> bool {
    has_column(frame, GDP_PER_CAPITA) && has_column(frame, POPULATION)
}
