//! CSV format export of coordinate records.

use crate::analysis::CoordinateMap;
use crate::error::{MapError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render coordinate records as CSV with a `key,x,y` header.
pub fn export_coordinates_csv(coordinates: &CoordinateMap) -> String {
    let mut out = String::from("key,x,y\n");
    for (key, coord) in coordinates.iter() {
        // writing to a String cannot fail
        let _ = writeln!(out, "{},{},{}", escape_csv(key), coord.x, coord.y);
    }
    out
}

/// Write coordinate records as CSV to `path`.
pub fn write_coordinates_csv(coordinates: &CoordinateMap, path: &Path) -> Result<()> {
    fs::write(path, export_coordinates_csv(coordinates)).map_err(|e| MapError::io(path, e))
}

/// Escape CSV value (add quotes if contains comma, quote, or newline)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
