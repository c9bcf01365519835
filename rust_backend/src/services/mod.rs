//! Scoring and selection over an annotated panel.
//!
//! [`quality`] reduces a panel to one [`QualityRecord`] per country and
//! ranks them; [`selection`] turns that ranking into the list of countries
//! kept for analysis.

pub mod quality;
pub mod selection;


pub use quality::{
    composite_score, score, score_with_config, QualityAnomaly, QualityRecord, QualityScorer,
    QualitySummary, QualityTable,
};
pub use selection::{select_countries, Selection};
