//! Property tests for quality scoring bounds.

use polars::prelude::*;
use proptest::prelude::*;

use resilience_panel::config::QualityThresholds;
use resilience_panel::core::{Severity, ShockCatalog, ShockDefinition, ShockType, YearRange};
use resilience_panel::services::quality::{composite_score, score};

fn bundled_like_shocks() -> ShockCatalog {
    let windows = [(1997, 1999), (2001, 2002), (2008, 2010), (2010, 2013), (2020, 2022)];
    ShockCatalog::new(
        windows
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| {
                ShockDefinition::new(
                    format!("shock_{}", i),
                    YearRange::new(start, end).unwrap(),
                    ShockType::Financial,
                    Severity::Medium,
                )
            })
            .collect(),
    )
    .unwrap()
}

/// One country panel: a set of distinct years in 1990-2023 with two
/// indicators that may be missing on any row.
fn country_panel() -> impl Strategy<Value = DataFrame> {
    prop::collection::btree_set(1990i32..=2023, 1..=34).prop_flat_map(|years| {
        let n = years.len();
        (
            Just(years.into_iter().collect::<Vec<_>>()),
            prop::collection::vec(prop::option::of(-1e6f64..1e6), n),
            prop::collection::vec(prop::option::of(0i64..1_000_000), n),
        )
            .prop_map(|(years, gdp, pop)| {
                df!(
                    "country_code" => vec!["AAA"; years.len()],
                    "year" => years,
                    "gdp" => gdp,
                    "population" => pop,
                )
                .unwrap()
            })
    })
}

proptest! {
    #[test]
    fn prop_metrics_stay_in_unit_interval(panel in country_panel()) {
        let table = score(&panel, &bundled_like_shocks(), YearRange::default(), "country_code")
            .unwrap();
        prop_assert_eq!(table.len(), 1);

        let record = &table.records[0];
        prop_assert!((0.0..=1.0).contains(&record.year_coverage));
        prop_assert!((0.0..=1.0).contains(&record.overall_completeness));
        prop_assert!((0.0..=1.0).contains(&record.shock_coverage_rate));
        prop_assert!((0.0..=1.0 + 1e-12).contains(&record.quality_score));
        prop_assert!(record.shock_coverage <= 5);
        prop_assert!(table.anomalies.is_empty());
    }

    #[test]
    fn prop_criteria_match_thresholds(panel in country_panel()) {
        let table = score(&panel, &bundled_like_shocks(), YearRange::default(), "country_code")
            .unwrap();
        let record = &table.records[0];
        let thresholds = QualityThresholds::default();

        prop_assert_eq!(
            record.meets_criteria,
            record.year_coverage >= thresholds.min_year_coverage
                && record.overall_completeness >= thresholds.min_completeness
                && record.shock_coverage >= thresholds.min_shock_coverage
        );
        prop_assert_eq!(
            record.quality_score,
            composite_score(
                record.year_coverage,
                record.overall_completeness,
                record.shock_coverage_rate
            )
        );
    }

    #[test]
    fn prop_composite_score_is_monotone(
        yc in 0.0f64..=1.0,
        comp in 0.0f64..=1.0,
        rate in 0.0f64..=1.0,
        bump in 0.0f64..=0.5,
    ) {
        let base = composite_score(yc, comp, rate);
        prop_assert!(composite_score((yc + bump).min(1.0), comp, rate) >= base);
        prop_assert!(composite_score(yc, (comp + bump).min(1.0), rate) >= base);
        prop_assert!(composite_score(yc, comp, (rate + bump).min(1.0)) >= base);
    }
}
