//! Country selection for downstream analysis.

use log::{info, warn};
use serde::Serialize;

use super::quality::QualityTable;
use crate::config::SelectionPolicy;

/// Countries retained for analysis, in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    /// How many countries short of `min_countries` the selection is.
    pub shortfall: Option<usize>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn is_included(&self, country_code: &str) -> bool {
        self.included.iter().any(|c| c == country_code)
    }
}

/// Keeps countries that meet the quality criteria and have at least
/// `min_years` observations. A selection smaller than `min_countries` is
/// reported through `shortfall`, not rejected.
pub fn select_countries(table: &QualityTable, policy: &SelectionPolicy) -> Selection {
    let (included, excluded): (Vec<_>, Vec<_>) = table
        .records
        .iter()
        .partition(|r| r.meets_criteria && r.total_years >= policy.min_years);

    let included: Vec<String> = included.into_iter().map(|r| r.country_code.clone()).collect();
    let excluded: Vec<String> = excluded.into_iter().map(|r| r.country_code.clone()).collect();

    let shortfall = policy
        .min_countries
        .checked_sub(included.len())
        .filter(|&missing| missing > 0);
    if let Some(missing) = shortfall {
        warn!(
            "Only {} countries qualify for analysis ({} short of {})",
            included.len(),
            missing,
            policy.min_countries
        );
    } else {
        info!("{} countries selected for analysis", included.len());
    }

    Selection {
        included,
        excluded,
        shortfall,
    }
}
