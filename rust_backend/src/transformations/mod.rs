//! Panel transformations.
//!
//! This module turns a raw country-year frame into an annotated panel:
//! column standardisation, focus filtering, derived GDP series, merging of
//! auxiliary indicator tables and shock-period tagging.
//!
//! # Modules
//!
//! - [`derived`]: Standardise Maddison columns, filter to the focus window, add growth series
//! - [`merge`]: Rename indicator codes and left-join auxiliary tables
//! - [`shocks`]: Label rows with shock windows and years since each shock
//!
//! # Example
//!
//! ```no_run
//! use resilience_panel::config::ReferenceData;
//! use resilience_panel::transformations::annotate;
//! use polars::prelude::*;
//!
//! # fn example(panel: DataFrame) -> resilience_panel::error::PanelResult<()> {
//! let reference = ReferenceData::builtin()?;
//! let annotated = annotate(&panel, &reference.shocks)?;
//! println!("{} shock observations", annotated.shock_observations()?);
//! # Ok(())
//! # }
//! ```

pub(crate) mod columns;
pub mod derived;
pub mod merge;
pub mod shocks;


pub use derived::{add_derived_variables, filter_focus, pct_change_by_group, standardize_columns};
pub use merge::{merge_indicators, rename_indicator_codes};
pub use shocks::{annotate, shock_labels, AnnotatedPanel, ShockAnnotator};
