//! Per-country data quality scoring.
//!
//! Each country's rows are reduced to year coverage, indicator completeness
//! and shock coverage, combined into a weighted score and checked against
//! hard inclusion thresholds. The score and the thresholds are independent:
//! a well-scored country can still fail a threshold.

use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::config::{AnalysisConfig, QualityThresholds};
use crate::core::{ShockCatalog, YearRange};
use crate::error::PanelResult;
use crate::transformations::columns::{
    float_values_of, is_observed, numeric_columns, string_values, year_values,
};
use crate::transformations::shocks::YEARS_SINCE_PREFIX;

pub const YEAR_COVERAGE_WEIGHT: f64 = 0.3;
pub const COMPLETENESS_WEIGHT: f64 = 0.5;
pub const SHOCK_COVERAGE_WEIGHT: f64 = 0.2;

/// Quality metrics for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRecord {
    pub country_code: String,
    pub total_years: usize,
    pub year_coverage: f64,
    pub overall_completeness: f64,
    pub shock_coverage: usize,
    pub shock_coverage_rate: f64,
    pub quality_score: f64,
    pub meets_criteria: bool,
}

/// Input conditions worth a second look. None of them stop scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityAnomaly {
    /// The same (country, year) appears more than once, which can push
    /// `year_coverage` above 1.
    DuplicateYears { country_code: String, duplicates: usize },
    /// Rows with no country code; they are not scored.
    MissingCountry { rows: usize },
    /// No integer or float indicator columns, so completeness is 0 everywhere.
    NoNumericColumns,
    /// The shock catalog is empty, so shock coverage is 0 everywhere.
    NoShocks,
}

/// Headline numbers of a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualitySummary {
    pub countries: usize,
    pub meeting_criteria: usize,
    pub mean_score: f64,
    pub top_countries: Vec<String>,
}

/// Quality records ranked by descending score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityTable {
    pub records: Vec<QualityRecord>,
    pub anomalies: Vec<QualityAnomaly>,
}

impl QualityTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, country_code: &str) -> Option<&QualityRecord> {
        self.records.iter().find(|r| r.country_code == country_code)
    }

    pub fn meeting_criteria(&self) -> impl Iterator<Item = &QualityRecord> {
        self.records.iter().filter(|r| r.meets_criteria)
    }

    pub fn summary(&self) -> QualitySummary {
        let mean_score = if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|r| r.quality_score).sum::<f64>() / self.records.len() as f64
        };
        QualitySummary {
            countries: self.records.len(),
            meeting_criteria: self.meeting_criteria().count(),
            mean_score,
            top_countries: self
                .records
                .iter()
                .take(5)
                .map(|r| r.country_code.clone())
                .collect(),
        }
    }

    /// The ranking as a frame with the quality record columns.
    pub fn to_dataframe(&self) -> PanelResult<DataFrame> {
        let records = &self.records;
        let frame = df!(
            "country_code" => records.iter().map(|r| r.country_code.clone()).collect::<Vec<_>>(),
            "total_years" => records.iter().map(|r| r.total_years as u32).collect::<Vec<_>>(),
            "year_coverage" => records.iter().map(|r| r.year_coverage).collect::<Vec<_>>(),
            "overall_completeness" => records.iter().map(|r| r.overall_completeness).collect::<Vec<_>>(),
            "shock_coverage" => records.iter().map(|r| r.shock_coverage as u32).collect::<Vec<_>>(),
            "shock_coverage_rate" => records.iter().map(|r| r.shock_coverage_rate).collect::<Vec<_>>(),
            "quality_score" => records.iter().map(|r| r.quality_score).collect::<Vec<_>>(),
            "meets_criteria" => records.iter().map(|r| r.meets_criteria).collect::<Vec<_>>(),
        )?;
        Ok(frame)
    }
}

/// Weighted composite of the three coverage measures.
pub fn composite_score(year_coverage: f64, completeness: f64, shock_coverage_rate: f64) -> f64 {
    YEAR_COVERAGE_WEIGHT * year_coverage
        + COMPLETENESS_WEIGHT * completeness
        + SHOCK_COVERAGE_WEIGHT * shock_coverage_rate
}

impl QualityThresholds {
    /// Hard inclusion check; independent of [`composite_score`].
    pub fn is_met(&self, year_coverage: f64, completeness: f64, shock_coverage: usize) -> bool {
        year_coverage >= self.min_year_coverage
            && completeness >= self.min_completeness
            && shock_coverage >= self.min_shock_coverage
    }
}

/// Row indices of one country, in panel order.
struct CountryGroup {
    code: String,
    rows: Vec<usize>,
}

/// Scores panels against a shock catalog and analysis window.
pub struct QualityScorer<'a> {
    shocks: &'a ShockCatalog,
    years: YearRange,
    country_column: String,
    year_column: String,
    thresholds: QualityThresholds,
}

impl<'a> QualityScorer<'a> {
    pub fn new(shocks: &'a ShockCatalog, years: YearRange) -> Self {
        Self {
            shocks,
            years,
            country_column: "country_code".to_string(),
            year_column: "year".to_string(),
            thresholds: QualityThresholds::default(),
        }
    }

    pub fn from_config(shocks: &'a ShockCatalog, config: &AnalysisConfig) -> Self {
        Self::new(shocks, config.years)
            .with_country_column(config.country_column.clone())
            .with_year_column(config.year_column.clone())
            .with_thresholds(config.thresholds)
    }

    pub fn with_country_column(mut self, name: impl Into<String>) -> Self {
        self.country_column = name.into();
        self
    }

    pub fn with_year_column(mut self, name: impl Into<String>) -> Self {
        self.year_column = name.into();
        self
    }

    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Scores every country found in `panel`.
    ///
    /// Indicator columns are the integer and float columns other than the
    /// year and country keys and any `years_since_<shock>` column, so a raw,
    /// annotated or wide annotated panel scores the same. A value is missing
    /// when null or NaN.
    pub fn score(&self, panel: &DataFrame) -> PanelResult<QualityTable> {
        let years = year_values(panel, &self.year_column)?;
        let countries = string_values(panel, &self.country_column)?;
        let mut anomalies = Vec::new();

        let (groups, missing_country) = group_by_country(&countries);
        if missing_country > 0 {
            warn!("{} rows have no country code and are not scored", missing_country);
            anomalies.push(QualityAnomaly::MissingCountry {
                rows: missing_country,
            });
        }

        // years_since_<shock> columns from a wide annotated layout are not indicators.
        let indicator_columns: Vec<&Column> = numeric_columns(
            panel,
            &[self.year_column.as_str(), self.country_column.as_str()],
        )
        .into_iter()
        .filter(|c| !c.name().as_str().starts_with(YEARS_SINCE_PREFIX))
        .collect();
        if indicator_columns.is_empty() && panel.height() > 0 {
            warn!("Panel has no numeric indicator columns; completeness is 0 for every country");
            anomalies.push(QualityAnomaly::NoNumericColumns);
        }
        if self.shocks.is_empty() {
            warn!("Shock catalog is empty; shock coverage is 0 for every country");
            anomalies.push(QualityAnomaly::NoShocks);
        }

        let observed: Vec<Vec<bool>> = indicator_columns
            .iter()
            .map(|column| {
                float_values_of(column).map(|values| values.into_iter().map(is_observed).collect())
            })
            .collect::<PanelResult<_>>()?;

        let expected_years = self.years.expected_years() as f64;
        let mut records = Vec::with_capacity(groups.len());

        for group in &groups {
            let total_years = group.rows.len();
            let year_coverage = total_years as f64 / expected_years;

            let overall_completeness = if observed.is_empty() {
                0.0
            } else {
                let fractions: f64 = observed
                    .iter()
                    .map(|column| {
                        let present = group.rows.iter().filter(|&&row| column[row]).count();
                        present as f64 / total_years as f64
                    })
                    .sum();
                fractions / observed.len() as f64
            };

            let country_years: Vec<i32> = group.rows.iter().filter_map(|&row| years[row]).collect();
            let shock_coverage = self
                .shocks
                .iter()
                .filter(|shock| country_years.iter().any(|&y| shock.window.contains(y)))
                .count();
            let shock_coverage_rate = if self.shocks.is_empty() {
                0.0
            } else {
                shock_coverage as f64 / self.shocks.len() as f64
            };

            let duplicates = country_years.len() - country_years.iter().collect::<HashSet<_>>().len();
            if duplicates > 0 {
                warn!(
                    "{} has {} duplicate country-year rows (year coverage {:.3})",
                    group.code, duplicates, year_coverage
                );
                anomalies.push(QualityAnomaly::DuplicateYears {
                    country_code: group.code.clone(),
                    duplicates,
                });
            }

            records.push(QualityRecord {
                country_code: group.code.clone(),
                total_years,
                year_coverage,
                overall_completeness,
                shock_coverage,
                shock_coverage_rate,
                quality_score: composite_score(
                    year_coverage,
                    overall_completeness,
                    shock_coverage_rate,
                ),
                meets_criteria: self.thresholds.is_met(
                    year_coverage,
                    overall_completeness,
                    shock_coverage,
                ),
            });
        }

        // Stable: equal scores keep first-seen country order.
        records.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(Ordering::Equal)
        });

        let table = QualityTable { records, anomalies };
        log_summary(&table);
        Ok(table)
    }
}

fn group_by_country(countries: &[Option<String>]) -> (Vec<CountryGroup>, usize) {
    let mut groups: Vec<CountryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut missing = 0;

    for (row, country) in countries.iter().enumerate() {
        let Some(code) = country.as_deref() else {
            missing += 1;
            continue;
        };
        match index.get(code) {
            Some(&position) => groups[position].rows.push(row),
            None => {
                index.insert(code, groups.len());
                groups.push(CountryGroup {
                    code: code.to_string(),
                    rows: vec![row],
                });
            }
        }
    }

    (groups, missing)
}

fn log_summary(table: &QualityTable) {
    if table.is_empty() {
        warn!("Quality assessment found no countries to score");
        return;
    }
    let summary = table.summary();
    info!("Quality assessment complete:");
    info!("  - Countries meeting criteria: {}", summary.meeting_criteria);
    info!("  - Average quality score: {:.3}", summary.mean_score);
    info!("  - Top 5 countries: {:?}", summary.top_countries);
}

/// Scores `panel` with the default thresholds and a `year` column.
pub fn score(
    panel: &DataFrame,
    shocks: &ShockCatalog,
    year_range: YearRange,
    country_column: &str,
) -> PanelResult<QualityTable> {
    QualityScorer::new(shocks, year_range)
        .with_country_column(country_column)
        .score(panel)
}

/// Scores `panel` with every setting taken from `config`.
pub fn score_with_config(
    panel: &DataFrame,
    shocks: &ShockCatalog,
    config: &AnalysisConfig,
) -> PanelResult<QualityTable> {
    QualityScorer::from_config(shocks, config).score(panel)
}
