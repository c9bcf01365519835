//! Reference data types: analysis windows, shocks, countries and indicators.
//!
//! These are immutable once built. Configuration constructs them at startup
//! and passes them explicitly to the annotator, scorer and pipeline.

pub mod country;
pub mod indicators;
pub mod shock;
pub mod years;

pub use country::{is_country_code, CountryCatalog};
pub use indicators::{Indicator, IndicatorCatalog, IndicatorCategory};
pub use shock::{Severity, ShockCatalog, ShockDefinition, ShockType};
pub use years::YearRange;
