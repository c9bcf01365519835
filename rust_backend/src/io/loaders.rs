use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Reads country-year panels from local files.
pub struct PanelLoader;

impl PanelLoader {
    /// Load a panel, choosing the reader from the file extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "csv" => Self::load_csv(path),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load a CSV panel. A `year` column, if present, is cast to `Int32`.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to open {}", path.display()))?
            .finish()
            .context("Failed to parse CSV into DataFrame")?;

        if let Some(column) = df.column("year").ok().cloned() {
            let year = column
                .cast(&DataType::Int32)
                .context("Column 'year' is not numeric")?;
            df.with_column(year)?;
        }

        info!("Loaded {} rows x {} columns from {}", df.height(), df.width(), path.display());
        Ok(df)
    }
}

/// Write `frame` as CSV with a header row, creating parent directories.
pub fn write_csv<P: AsRef<Path>>(frame: &mut DataFrame, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} rows to {}", frame.height(), path.display());
    Ok(())
}
