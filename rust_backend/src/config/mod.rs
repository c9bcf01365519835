//! Startup configuration: the analysis settings and the reference catalogs.
//!
//! Both are plain TOML documents deserialised with serde. They are loaded
//! once and passed by reference into every transformation.
//!
//! # Example
//!
//! ```no_run
//! use resilience_panel::config::{AnalysisConfig, ReferenceData};
//!
//! let config = AnalysisConfig::from_file("config/analysis.toml").unwrap();
//! let reference = ReferenceData::builtin().unwrap();
//! println!("{} shocks over {}", reference.shocks.len(), config.years);
//! ```

pub mod analysis;
pub mod reference;

pub use analysis::{AnalysisConfig, QualityThresholds, SelectionPolicy};
pub use reference::ReferenceData;
