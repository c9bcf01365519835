//! Panel quality command-line tool
//!
//! Loads a country-year panel, runs the preparation pipeline and writes the
//! annotated panel and the quality ranking as CSV.
//!
//! # Usage
//!
//! ```bash
//! panel-quality data/maddison.csv
//! panel-quality data/maddison.csv data/world_bank.csv
//! ```
//!
//! # Environment Variables
//!
//! - `PANEL_CONFIG`: Analysis settings TOML (default: built-in defaults)
//! - `PANEL_REFERENCE`: Reference catalogs TOML (default: bundled catalogs)
//! - `PANEL_OUTPUT_DIR`: Output directory (default: data)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use resilience_panel::config::{AnalysisConfig, ReferenceData};
use resilience_panel::io::{write_csv, PanelLoader};
use resilience_panel::preprocessing::PanelPipeline;

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let panel_path = args
        .get(1)
        .context("usage: panel-quality <panel.csv> [indicators.csv]")?;
    let indicators_path = args.get(2);

    let config = match env::var("PANEL_CONFIG") {
        Ok(path) => AnalysisConfig::from_file(&path)?,
        Err(_) => AnalysisConfig::default(),
    };
    let reference = match env::var("PANEL_REFERENCE") {
        Ok(path) => ReferenceData::from_file(&path)?,
        Err(_) => ReferenceData::builtin()?,
    };
    let output_dir =
        PathBuf::from(env::var("PANEL_OUTPUT_DIR").unwrap_or_else(|_| "data".to_string()));

    info!(
        "Analysing {} focus countries over {} against {} shocks",
        reference.countries.len(),
        config.years,
        reference.shocks.len()
    );

    let raw = PanelLoader::load_from_file(panel_path)?;
    let pipeline = PanelPipeline::with_config(config, reference);
    let output = match indicators_path {
        Some(path) => {
            let indicators = PanelLoader::load_from_file(path)?;
            pipeline.process_with_indicators(&raw, &indicators)?
        }
        None => pipeline.process(&raw)?,
    };

    let mut annotated = output.annotated.to_wide_frame()?;
    write_csv(&mut annotated, output_dir.join("annotated_panel.csv"))?;
    let mut scores = output.quality.to_dataframe()?;
    write_csv(&mut scores, output_dir.join("quality_scores.csv"))?;

    let report = serde_json::json!({
        "summary": output.quality.summary(),
        "anomalies": output.quality.anomalies,
        "selection": output.selection,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
