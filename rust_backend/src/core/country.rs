use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{PanelError, PanelResult};

/// Recognised countries for the analysis plus named groupings of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountryCatalog {
    focus: Vec<String>,
    groups: BTreeMap<String, Vec<String>>,
}

/// Three uppercase ASCII letters, the ISO 3166-1 alpha-3 shape.
pub fn is_country_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

impl CountryCatalog {
    /// Builds the catalog. Every focus entry must be a well-formed code and
    /// the focus list may not repeat a country. Group members are not
    /// required to be in focus (the GFC regional list names GRC, for one).
    pub fn new(focus: Vec<String>, groups: BTreeMap<String, Vec<String>>) -> PanelResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for code in &focus {
            if !is_country_code(code) {
                return Err(PanelError::InvalidCatalog(format!(
                    "malformed focus country code: {:?}",
                    code
                )));
            }
            if !seen.insert(code.as_str()) {
                return Err(PanelError::InvalidCatalog(format!(
                    "focus country listed twice: {}",
                    code
                )));
            }
        }
        Ok(Self { focus, groups })
    }

    pub fn focus(&self) -> &[String] {
        &self.focus
    }

    pub fn len(&self) -> usize {
        self.focus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.focus.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.focus.iter().any(|c| c == code)
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Names of every group listing `code`.
    pub fn groups_of(&self, code: &str) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == code))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Checks a requested country list against the focus catalog.
    ///
    /// A code is valid when it is three uppercase letters and part of the
    /// focus list. Invalid entries are logged; the summary line reports how
    /// many of the requested codes passed.
    pub fn validate_selection(&self, codes: &[&str]) -> BTreeMap<String, bool> {
        let mut results = BTreeMap::new();

        for &code in codes {
            let is_valid = is_country_code(code) && self.contains(code);
            if !is_valid {
                warn!("Country {} not in focus list or invalid format", code);
            }
            results.insert(code.to_string(), is_valid);
        }

        let valid = results.values().filter(|v| **v).count();
        info!("Validated {}/{} countries", valid, results.len());

        results
    }
}
