use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{PanelError, PanelResult};

/// One source indicator code and the panel column it becomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub code: String,
    pub column: String,
}

/// A themed group of indicators (trade, labor, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorCategory {
    pub category: String,
    pub codes: Vec<Indicator>,
}

/// Dictionary of auxiliary indicator codes, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorCatalog {
    categories: Vec<IndicatorCategory>,
}

impl IndicatorCatalog {
    /// Builds the catalog; codes and column names must each be unique
    /// across all categories.
    pub fn new(categories: Vec<IndicatorCategory>) -> PanelResult<Self> {
        let mut codes = HashSet::new();
        let mut columns = HashSet::new();
        for indicator in categories.iter().flat_map(|c| c.codes.iter()) {
            if !codes.insert(indicator.code.as_str()) {
                return Err(PanelError::InvalidCatalog(format!(
                    "indicator code listed twice: {}",
                    indicator.code
                )));
            }
            if !columns.insert(indicator.column.as_str()) {
                return Err(PanelError::InvalidCatalog(format!(
                    "indicator column name used twice: {}",
                    indicator.column
                )));
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[IndicatorCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&IndicatorCategory> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Every indicator in category order.
    pub fn all(&self) -> impl Iterator<Item = &Indicator> {
        self.categories.iter().flat_map(|c| c.codes.iter())
    }

    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_for(&self, code: &str) -> Option<&str> {
        self.all()
            .find(|i| i.code == code)
            .map(|i| i.column.as_str())
    }
}
