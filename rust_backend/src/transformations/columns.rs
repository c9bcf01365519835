//! Typed column extraction shared by the panel transforms and the scorer.

use polars::prelude::*;

use crate::error::{PanelError, PanelResult};

pub(crate) fn require_column<'a>(frame: &'a DataFrame, name: &str) -> PanelResult<&'a Column> {
    frame
        .column(name)
        .map_err(|_| PanelError::missing_column(name))
}

pub(crate) fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame.column(name).is_ok()
}

/// Year values as `i32`, casting from whatever integer or float type the
/// source used.
pub(crate) fn year_values(frame: &DataFrame, name: &str) -> PanelResult<Vec<Option<i32>>> {
    let years = require_column(frame, name)?.cast(&DataType::Int32)?;
    let years = years.as_materialized_series().i32()?;
    Ok(years.into_iter().collect())
}

pub(crate) fn string_values(frame: &DataFrame, name: &str) -> PanelResult<Vec<Option<String>>> {
    let values = require_column(frame, name)?.cast(&DataType::String)?;
    let values = values.as_materialized_series().str()?;
    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

pub(crate) fn float_values(frame: &DataFrame, name: &str) -> PanelResult<Vec<Option<f64>>> {
    float_values_of(require_column(frame, name)?)
}

pub(crate) fn float_values_of(column: &Column) -> PanelResult<Vec<Option<f64>>> {
    let values = column.cast(&DataType::Float64)?;
    let values = values.as_materialized_series().f64()?;
    Ok(values.into_iter().collect())
}

/// Integer and float columns, excluding the named key columns.
pub(crate) fn numeric_columns<'a>(frame: &'a DataFrame, exclude: &[&str]) -> Vec<&'a Column> {
    frame
        .get_columns()
        .iter()
        .filter(|c| {
            let dtype = c.dtype();
            (dtype.is_integer() || dtype.is_float()) && !exclude.contains(&c.name().as_str())
        })
        .collect()
}

/// A value counts as observed when it is neither null nor NaN.
pub(crate) fn is_observed(value: Option<f64>) -> bool {
    value.is_some_and(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_values_cast_from_i64() {
        let df = df!("year" => [1990i64, 1991, 1992]).unwrap();
        assert_eq!(
            year_values(&df, "year").unwrap(),
            vec![Some(1990), Some(1991), Some(1992)]
        );
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let df = df!("country_code" => ["USA"]).unwrap();
        let err = year_values(&df, "year").unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_numeric_columns_skip_keys_and_text() {
        let df = df!(
            "country_code" => ["USA", "GBR"],
            "year" => [2000i32, 2000],
            "gdp" => [1.0, 2.0],
            "population" => [10i64, 20],
            "flag" => [true, false],
        )
        .unwrap();
        let names: Vec<&str> = numeric_columns(&df, &["year", "country_code"])
            .iter()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(names, vec!["gdp", "population"]);
    }

    #[test]
    fn test_nan_is_not_observed() {
        assert!(is_observed(Some(1.0)));
        assert!(!is_observed(Some(f64::NAN)));
        assert!(!is_observed(None));
    }
}
