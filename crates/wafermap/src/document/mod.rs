//! The global wafer-map document.
//!
//! Only the fields the analysis reads are modelled:
//! - `Groups`: the [`GroupCatalog`]
//! - `MapGroups`: row entries, each holding a `MapGroupsColumns` block list
//!
//! Row entries keep the order they have in the document. A row body that does
//! not decode is kept as [`RowBody::Undecodable`] so the analysis can skip that
//! row alone. Everything else in the document is ignored.

mod catalog;
mod layout;

pub use catalog::{DieSlotDef, GroupCatalog};
pub use layout::{ColumnBlock, RowBody, RowColumns, RowKey, SlotSelection, WaferRow};

use crate::error::{MapError, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A loaded wafer-map document. Read-only for the duration of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WaferDocument {
    /// Group catalog
    #[serde(rename = "Groups", default)]
    pub groups: GroupCatalog,

    /// Row entries in document order
    #[serde(rename = "MapGroups", default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<WaferRow>,
}

impl WaferDocument {
    /// Assemble a document from its parts.
    pub fn new(groups: GroupCatalog, rows: Vec<WaferRow>) -> Self {
        Self { groups, rows }
    }

    /// Load a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the file cannot be opened and
    /// [`MapError::Format`] if its contents are not a valid wafer map.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| MapError::io(path, e))?;
        let doc = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            MapError::format(format!("failed to parse {}", path.display()), Some(e))
        })?;
        log::debug!("Loaded wafer map from {}", path.display());
        Ok(doc)
    }

    /// Load a document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| MapError::format("failed to parse wafer map", Some(e)))
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MapError::format("failed to parse wafer map", Some(e)))
    }

    /// Look up a row by its raw key.
    pub fn row(&self, key: &str) -> Option<&WaferRow> {
        self.rows.iter().find(|row| row.key == key)
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> std::result::Result<Vec<WaferRow>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RowsVisitor;

    impl<'de> Visitor<'de> for RowsVisitor {
        type Value = Vec<WaferRow>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of wafer rows")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rows = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, body)) = map.next_entry::<String, serde_json::Value>()? {
                rows.push(WaferRow::from_value(key, &body));
            }
            Ok(rows)
        }
    }

    deserializer.deserialize_map(RowsVisitor)
}
