use log::{info, warn};
use polars::prelude::*;

use crate::config::{AnalysisConfig, ReferenceData};
use crate::error::PanelResult;
use crate::services::quality::{QualityScorer, QualityTable};
use crate::services::selection::{select_countries, Selection};
use crate::transformations::derived::{
    add_derived_variables, filter_focus, has_maddison_series, standardize_columns,
};
use crate::transformations::merge::{merge_indicators, rename_indicator_codes};
use crate::transformations::shocks::{AnnotatedPanel, ShockAnnotator};

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub annotated: AnnotatedPanel,
    pub quality: QualityTable,
    pub selection: Selection,
}

/// Raw panel to annotated, scored and selected panel.
///
/// Steps: standardise columns, keep the focus window and countries, add the
/// derived GDP series, optionally merge an indicator table, tag shocks,
/// score quality and select countries.
pub struct PanelPipeline {
    config: AnalysisConfig,
    reference: ReferenceData,
}

impl PanelPipeline {
    /// Pipeline with default settings and the bundled reference catalogs.
    pub fn new() -> PanelResult<Self> {
        Ok(Self::with_config(
            AnalysisConfig::default(),
            ReferenceData::builtin()?,
        ))
    }

    pub fn with_config(config: AnalysisConfig, reference: ReferenceData) -> Self {
        Self { config, reference }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Standardises, filters and derives; the frame that annotation starts from.
    pub fn prepare(&self, raw: &DataFrame) -> PanelResult<DataFrame> {
        let year_column = self.config.year_column.as_str();
        let country_column = self.config.country_column.as_str();
        info!("Raw panel shape: {:?}", raw.shape());

        let standardized = standardize_columns(raw)?;
        let focused = filter_focus(
            &standardized,
            self.config.years,
            &self.reference.countries,
            year_column,
            country_column,
        )?;

        if has_maddison_series(&focused) {
            add_derived_variables(&focused, year_column, country_column)
        } else {
            warn!("Panel lacks gdp_per_capita or population; derived variables skipped");
            Ok(focused)
        }
    }

    /// Runs every step on `raw`.
    pub fn process(&self, raw: &DataFrame) -> PanelResult<PipelineOutput> {
        let prepared = self.prepare(raw)?;
        self.finish(prepared)
    }

    /// Like [`process`](Self::process), with `indicators` left-joined onto
    /// the prepared panel before annotation. Indicator-code column names are
    /// translated through the reference catalog first.
    pub fn process_with_indicators(
        &self,
        raw: &DataFrame,
        indicators: &DataFrame,
    ) -> PanelResult<PipelineOutput> {
        let prepared = self.prepare(raw)?;
        let indicators = rename_indicator_codes(indicators, &self.reference.indicators)?;
        let merged = merge_indicators(
            &prepared,
            &indicators,
            &self.config.year_column,
            &self.config.country_column,
        )?;
        self.finish(merged)
    }

    fn finish(&self, panel: DataFrame) -> PanelResult<PipelineOutput> {
        let annotated = ShockAnnotator::new(&self.reference.shocks)
            .with_year_column(self.config.year_column.clone())
            .with_country_column(self.config.country_column.clone())
            .annotate(&panel)?;
        info!(
            "Final dataset shape: {} rows x {} columns",
            annotated.height(),
            annotated.frame().width()
        );

        let quality =
            QualityScorer::from_config(&self.reference.shocks, &self.config).score(annotated.frame())?;
        let selection = select_countries(&quality, &self.config.selection);

        Ok(PipelineOutput {
            annotated,
            quality,
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CountryCatalog, IndicatorCatalog, Severity, ShockCatalog, ShockDefinition, ShockType,
        YearRange,
    };
    use crate::transformations::shocks::IS_SHOCK_PERIOD;
    use std::collections::BTreeMap;

    fn reference() -> ReferenceData {
        let countries = CountryCatalog::new(
            vec!["AAA".to_string(), "BBB".to_string()],
            BTreeMap::new(),
        )
        .unwrap();
        let shocks = ShockCatalog::new(vec![ShockDefinition::new(
            "gfc",
            YearRange::new(2008, 2010).unwrap(),
            ShockType::Financial,
            Severity::High,
        )])
        .unwrap();
        ReferenceData::new(countries, shocks, IndicatorCatalog::default())
    }

    fn config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.years = YearRange::new(2005, 2012).unwrap();
        config.thresholds.min_shock_coverage = 1;
        config.selection.min_years = 5;
        config.selection.min_countries = 1;
        config
    }

    fn raw_panel() -> DataFrame {
        let mut codes = Vec::new();
        let mut years = Vec::new();
        for code in ["AAA", "ZZZ", "BBB"] {
            for year in 2000..=2015 {
                codes.push(code);
                years.push(year);
            }
        }
        let gdppc: Vec<f64> = (0..codes.len()).map(|i| 1000.0 + i as f64).collect();
        let pop: Vec<f64> = vec![10.0; codes.len()];
        df!(
            "countrycode" => codes,
            "Year" => years,
            "gdppc" => gdppc,
            "pop" => pop,
        )
        .unwrap()
    }

    #[test]
    fn test_process_filters_annotates_and_scores() {
        let pipeline = PanelPipeline::with_config(config(), reference());
        let output = pipeline.process(&raw_panel()).unwrap();

        // Two focus countries over 2005-2012.
        assert_eq!(output.annotated.height(), 16);
        assert!(output.annotated.frame().column(IS_SHOCK_PERIOD).is_ok());
        assert!(output.annotated.frame().column("gdp_growth").is_ok());
        assert_eq!(output.annotated.shock_observations().unwrap(), 6);

        assert_eq!(output.quality.len(), 2);
        let record = output.quality.get("AAA").unwrap();
        assert_eq!(record.total_years, 8);
        assert!((record.year_coverage - 1.0).abs() < 1e-12);
        assert!(record.meets_criteria);
        assert!(output.quality.get("ZZZ").is_none());

        assert_eq!(output.selection.len(), 2);
        assert_eq!(output.selection.shortfall, None);
    }

    #[test]
    fn test_process_without_maddison_series() {
        let raw = df!(
            "country_code" => ["AAA", "AAA"],
            "year" => [2008, 2009],
            "exports" => [1.0, 2.0],
        )
        .unwrap();
        let pipeline = PanelPipeline::with_config(config(), reference());
        let output = pipeline.process(&raw).unwrap();

        assert!(output.annotated.frame().column("gdp_growth").is_err());
        assert_eq!(output.quality.len(), 1);
    }

    #[test]
    fn test_process_with_indicators_keeps_panel_rows() {
        let indicators = df!(
            "country_code" => ["AAA", "BBB"],
            "year" => [2008, 2009],
            "unemployment_total" => [5.0, 7.5],
        )
        .unwrap();
        let pipeline = PanelPipeline::with_config(config(), reference());
        let output = pipeline
            .process_with_indicators(&raw_panel(), &indicators)
            .unwrap();

        assert_eq!(output.annotated.height(), 16);
        let unemployment = output
            .annotated
            .frame()
            .column("unemployment_total")
            .unwrap();
        assert_eq!(unemployment.null_count(), 14);
    }

    #[test]
    fn test_default_pipeline_uses_bundled_reference() {
        let pipeline = PanelPipeline::new().unwrap();
        assert_eq!(pipeline.reference().countries.len(), 38);
        assert_eq!(pipeline.config().years, YearRange::default());
    }
}
