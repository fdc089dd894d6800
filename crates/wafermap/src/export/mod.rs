//! Export of analysis results for downstream tools.
//!
//! - **JSON**: the row summary consumed by the wafer-map plotter, and the coordinate map
//! - **CSV**: coordinate records for spreadsheets and pandas

pub mod csv;
pub mod json;

pub use csv::{export_coordinates_csv, write_coordinates_csv};
pub use json::{
    export_coordinates, export_row_summary, read_row_summary, write_coordinates,
    write_row_summary,
};
