use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PanelError, PanelResult};

/// Inclusive span of calendar years.
///
/// Used both for the analysis window (1990–2023 by default) and for shock
/// windows. `start <= end` always holds; the only way to build one is
/// through [`YearRange::new`] or deserialization, which run the same check.
///
/// # Examples
///
/// ```
/// use resilience_panel::core::YearRange;
///
/// let gfc = YearRange::new(2008, 2010).unwrap();
/// assert!(gfc.contains(2009));
/// assert!(!gfc.contains(2011));
/// assert_eq!(gfc.expected_years(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = PanelError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> PanelResult<Self> {
        if start > end {
            return Err(PanelError::InvalidConfig(format!(
                "year range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of calendar years in the range, both ends included.
    pub fn expected_years(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    pub fn overlaps(&self, other: &YearRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 1990,
            end: 2023,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
