//! Locate NKF7 dies in a global wafer map
//!
//! This example demonstrates:
//! - Loading a wafer-map document
//! - Running the analysis
//! - Writing the row summary for the wafer-map plotter
//!
//! Usage: `cargo run --example locate_nkf7 -- [input.json] [summary.json]`

use std::path::PathBuf;
use wafermap::{analyze, export, AnalysisConfig, WaferDocument};

fn main() -> wafermap::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "ER1GlobalWaferMap.json".into()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| "nkf7_row_summary.json".into()));

    let doc = WaferDocument::from_path(&input)?;
    let analysis = analyze(&doc, &AnalysisConfig::default())?;

    println!("✓ Total NKF7 placements found: {}", analysis.coordinates.len());

    export::write_row_summary(&analysis.rows, &output)?;
    println!("✓ Summary saved to {}", output.display());
    println!("✓ Rows with NKF7 dies: {}", analysis.rows.len());

    if let Some(bounds) = analysis.rows.bounds(&AnalysisConfig::default().row_key_prefix) {
        println!(
            "  columns {}..={}, rows {}..={}",
            bounds.min_column, bounds.max_column, bounds.min_row, bounds.max_row
        );
    }

    Ok(())
}
