//! Merging auxiliary indicator tables (World Bank style) onto the panel.

use log::{info, warn};
use polars::prelude::*;

use super::columns::require_column;
use crate::core::IndicatorCatalog;
use crate::error::PanelResult;

/// Renames columns named by an indicator code (`NY.GDP.PCAP.KD`) to the
/// catalog's panel column (`gdp_per_capita_constant`). Unknown columns keep
/// their name.
pub fn rename_indicator_codes(
    frame: &DataFrame,
    catalog: &IndicatorCatalog,
) -> PanelResult<DataFrame> {
    let mut renamed = 0usize;
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| match catalog.column_for(name.as_str()) {
            Some(column) => {
                renamed += 1;
                column.to_string()
            }
            None => name.to_string(),
        })
        .collect();

    let mut frame = frame.clone();
    frame.set_column_names(names)?;
    info!("Renamed {} indicator code columns", renamed);
    Ok(frame)
}

/// Left-joins `indicators` onto `panel` on (country, year).
///
/// Panel rows are kept whether or not the auxiliary table has a match.
/// Key columns are aligned to `String` and `Int32` on both sides first, and
/// the result comes back sorted by (country, year).
pub fn merge_indicators(
    panel: &DataFrame,
    indicators: &DataFrame,
    year_column: &str,
    country_column: &str,
) -> PanelResult<DataFrame> {
    for frame in [panel, indicators] {
        require_column(frame, year_column)?;
        require_column(frame, country_column)?;
    }

    let align_keys = |frame: &DataFrame| {
        frame.clone().lazy().with_columns([
            col(country_column).cast(DataType::String),
            col(year_column).cast(DataType::Int32),
        ])
    };

    let keys = [col(country_column), col(year_column)];
    let merged = align_keys(panel)
        .join(
            align_keys(indicators),
            keys.clone(),
            keys.clone(),
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs(keys, SortMultipleOptions::default())
        .collect()?;

    if merged.height() > panel.height() {
        warn!(
            "Indicator table has repeated ({}, {}) keys: merge grew the panel from {} to {} rows",
            country_column,
            year_column,
            panel.height(),
            merged.height()
        );
    }
    info!(
        "Merged {} indicator columns onto {} panel rows",
        indicators.width().saturating_sub(2),
        panel.height()
    );

    Ok(merged)
}
