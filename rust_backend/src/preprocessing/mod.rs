//! End-to-end panel preparation.
//!
//! # Example
//!
//! ```no_run
//! use resilience_panel::io::PanelLoader;
//! use resilience_panel::preprocessing::PanelPipeline;
//!
//! # fn example() -> anyhow::Result<()> {
//! let raw = PanelLoader::load_from_file("data/maddison.csv")?;
//! let output = PanelPipeline::new()?.process(&raw)?;
//! println!("{:?}", output.quality.summary());
//! # Ok(())
//! # }
//! ```

pub mod pipeline;

pub use pipeline::{PanelPipeline, PipelineOutput};
