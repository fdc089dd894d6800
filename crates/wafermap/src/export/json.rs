//! JSON export of the row summary and coordinate map.
//!
//! The row summary file is what the wafer-map plotter reads: one entry per row
//! with matches, `{"count": n, "columns": [...]}`, drawn as one unit square per
//! `(column, row)`.

use crate::analysis::{CoordinateMap, RowSummary};
use crate::error::{MapError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Render the row summary as pretty-printed JSON.
pub fn export_row_summary(summary: &RowSummary) -> Result<String> {
    to_pretty_json(summary, "row summary")
}

/// Render the coordinate map as pretty-printed JSON (`{key: [x, y]}`).
pub fn export_coordinates(coordinates: &CoordinateMap) -> Result<String> {
    to_pretty_json(coordinates, "coordinate map")
}

/// Write the row summary to `path`.
pub fn write_row_summary(summary: &RowSummary, path: &Path) -> Result<()> {
    let json = export_row_summary(summary)?;
    fs::write(path, json).map_err(|e| MapError::io(path, e))?;
    log::info!("Row summary saved to {}", path.display());
    Ok(())
}

/// Write the coordinate map to `path`.
pub fn write_coordinates(coordinates: &CoordinateMap, path: &Path) -> Result<()> {
    let json = export_coordinates(coordinates)?;
    fs::write(path, json).map_err(|e| MapError::io(path, e))
}

/// Load a row summary previously written with [`write_row_summary`].
pub fn read_row_summary(path: &Path) -> Result<RowSummary> {
    let file = File::open(path).map_err(|e| MapError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        MapError::format(
            format!("failed to parse row summary {}", path.display()),
            Some(e),
        )
    })
}

fn to_pretty_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MapError::serialization(format!("failed to encode {what}"), Some(e)))
}
