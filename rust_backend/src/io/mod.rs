//! Local file boundary: CSV panels in, CSV tables out.
//!
//! # Example
//!
//! ```no_run
//! use resilience_panel::io::{write_csv, PanelLoader};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut panel = PanelLoader::load_from_file("data/maddison.csv")?;
//! write_csv(&mut panel, "data/copy.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod loaders;


pub use loaders::{write_csv, PanelLoader};
