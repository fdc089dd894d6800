//! # wafermap
//!
//! Locates NKF7 dies on a wafer described by a global wafer-map document.
//!
//! The document lists, per wafer row, a sequence of variable-width column
//! blocks. Each block references a named group of die slots and declares which
//! of the group's slots exist at that position and which are testable. The
//! analysis rebuilds absolute wafer columns from those blocks and reports every
//! testable NKF7 die sitting at its group's target position.
//!
//! ## Pipeline
//!
//! ```text
//! WaferDocument (Groups + MapGroups)
//!     ↓
//! Column resolution (running cursor per row)
//!     ↓
//! Slot checks (target position, testable, bounds, family)
//!     ↓
//! CoordinateMap + RowSummary
//!     ↓
//! Export (JSON row summary, coordinates JSON/CSV)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wafermap::{analyze, export, AnalysisConfig, WaferDocument};
//!
//! # fn main() -> wafermap::Result<()> {
//! let doc = WaferDocument::from_path(Path::new("ER1GlobalWaferMap.json"))?;
//! let analysis = analyze(&doc, &AnalysisConfig::default())?;
//!
//! export::write_row_summary(&analysis.rows, Path::new("nkf7_row_summary.json"))?;
//! println!("{} NKF7 placements", analysis.coordinates.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod filter;
pub mod resolve;

// Re-export main types
pub use analysis::{
    analyze, Analysis, AnalysisStats, Analyzer, Bounds, CoordinateMap, Nkf7Coordinate,
    RowMatches, RowSummary,
};
pub use config::AnalysisConfig;
pub use document::{
    ColumnBlock, DieSlotDef, GroupCatalog, RowBody, RowKey, SlotSelection, WaferDocument,
    WaferRow,
};
pub use error::{MapError, Result};
pub use filter::{Rejection, TargetPositions};
pub use resolve::{
    resolve_row, Candidate, ColumnResolver, Placement, ResolvedBlock, RowLayout, TestableSet,
};
