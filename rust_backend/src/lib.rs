//! Shock-resilience country panel.
//!
//! Builds a country-year panel for 1990–2023 from a Maddison-style table,
//! merges auxiliary indicators, tags rows with the major macroeconomic shock
//! windows and scores each country's data quality to decide which countries
//! enter the analysis.
//!
//! # Modules
//!
//! - [`config`]: Analysis settings and reference catalogs (TOML)
//! - [`core`]: Year ranges, shocks, country and indicator catalogs
//! - [`transformations`]: Column standardisation, derived series, merging, shock tagging
//! - [`services`]: Quality scoring and country selection
//! - [`preprocessing`]: The end-to-end pipeline
//! - [`io`]: CSV loading and writing
//! - [`error`]: Library error type

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use error::{PanelError, PanelResult};
