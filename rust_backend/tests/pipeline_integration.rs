//! Integration tests for the panel pipeline from CSV input to CSV output.
//!
//! These tests ensure that:
//! 1. A Maddison-style CSV loads and passes through every pipeline step
//! 2. The bundled reference catalogs drive filtering, tagging and scoring
//! 3. The annotated panel and the quality ranking write back as CSV

use std::fs;
use std::path::Path;

use resilience_panel::config::{AnalysisConfig, ReferenceData};
use resilience_panel::io::{write_csv, PanelLoader};
use resilience_panel::preprocessing::PanelPipeline;
use resilience_panel::transformations::shocks::{IS_SHOCK_PERIOD, SHOCK_NAME};
use tempfile::TempDir;

// ==================== Helper Functions ====================

/// Writes a raw panel: USA over 1985-2023, THA over 2005-2023 and VEN
/// (outside the focus list) over 1990-2023.
fn write_raw_panel(path: &Path) {
    let mut csv = String::from("countrycode,country,year,gdppc,pop\n");
    for year in 1985..=2023 {
        let gdppc = 30000.0 + 500.0 * (year - 1985) as f64;
        csv.push_str(&format!("USA,United States,{},{},{}\n", year, gdppc, 250.0));
    }
    for year in 2005..=2023 {
        csv.push_str(&format!("THA,Thailand,{},{},{}\n", year, 5000.0, 65.0));
    }
    for year in 1990..=2023 {
        csv.push_str(&format!("VEN,Venezuela,{},{},{}\n", year, 9000.0, 28.0));
    }
    fs::write(path, csv).unwrap();
}

fn run_default_pipeline(dir: &TempDir) -> resilience_panel::preprocessing::PipelineOutput {
    let input = dir.path().join("maddison.csv");
    write_raw_panel(&input);
    let raw = PanelLoader::load_from_file(&input).unwrap();
    PanelPipeline::new().unwrap().process(&raw).unwrap()
}

// ==================== Tests ====================

#[test]
fn test_pipeline_keeps_focus_countries_in_window() {
    let dir = TempDir::new().unwrap();
    let output = run_default_pipeline(&dir);

    // USA 34 rows, THA 19 rows, VEN dropped.
    assert_eq!(output.annotated.height(), 53);
    assert_eq!(output.quality.len(), 2);
    assert!(output.quality.get("VEN").is_none());
}

#[test]
fn test_pipeline_tags_every_bundled_shock() {
    let dir = TempDir::new().unwrap();
    let output = run_default_pipeline(&dir);

    let frame = output.annotated.frame();
    assert!(frame.column(IS_SHOCK_PERIOD).is_ok());
    assert!(frame.column(SHOCK_NAME).is_ok());
    assert_eq!(output.annotated.years_since_shocks().count(), 5);

    // Window years are 1997-1999, 2001-2002, 2008-2013 and 2020-2022:
    // 14 for USA, 9 for THA from 2005 onwards.
    assert_eq!(output.annotated.shock_observations().unwrap(), 14 + 9);
}

#[test]
fn test_pipeline_scores_and_selects() {
    let dir = TempDir::new().unwrap();
    let output = run_default_pipeline(&dir);

    let usa = output.quality.get("USA").unwrap();
    assert_eq!(usa.total_years, 34);
    assert!((usa.year_coverage - 1.0).abs() < 1e-12);
    assert_eq!(usa.shock_coverage, 5);
    // Growth series are null on the first year only.
    assert!(usa.overall_completeness > 0.98 && usa.overall_completeness < 1.0);
    assert!(usa.meets_criteria);

    let tha = output.quality.get("THA").unwrap();
    assert_eq!(tha.shock_coverage, 3);
    assert!(!tha.meets_criteria);

    assert_eq!(output.quality.records[0].country_code, "USA");
    assert_eq!(output.selection.included, vec!["USA"]);
    assert_eq!(output.selection.shortfall, Some(29));
}

#[test]
fn test_pipeline_outputs_write_as_csv() {
    let dir = TempDir::new().unwrap();
    let output = run_default_pipeline(&dir);
    let out_dir = dir.path().join("data");

    let mut annotated = output.annotated.to_wide_frame().unwrap();
    write_csv(&mut annotated, out_dir.join("annotated_panel.csv")).unwrap();
    let mut scores = output.quality.to_dataframe().unwrap();
    write_csv(&mut scores, out_dir.join("quality_scores.csv")).unwrap();

    let reloaded = PanelLoader::load_csv(out_dir.join("annotated_panel.csv")).unwrap();
    assert_eq!(reloaded.height(), 53);
    assert!(reloaded
        .column("years_since_global_financial_crisis_2008")
        .is_ok());

    let scores = PanelLoader::load_csv(out_dir.join("quality_scores.csv")).unwrap();
    assert_eq!(scores.height(), 2);
}

#[test]
fn test_pipeline_with_custom_window() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("maddison.csv");
    write_raw_panel(&input);
    let raw = PanelLoader::load_csv(&input).unwrap();

    let config = AnalysisConfig::from_toml_str(
        r#"
        years = { start = 2005, end = 2023 }

        [thresholds]
        min_shock_coverage = 3

        [selection]
        min_years = 19
        min_countries = 2
        "#,
    )
    .unwrap();
    let pipeline = PanelPipeline::with_config(config, ReferenceData::builtin().unwrap());
    let output = pipeline.process(&raw).unwrap();

    let tha = output.quality.get("THA").unwrap();
    assert!((tha.year_coverage - 1.0).abs() < 1e-12);
    assert!(tha.meets_criteria);
    assert_eq!(output.selection.len(), 2);
    assert_eq!(output.selection.shortfall, None);
}
