//! Analysis outputs: coordinate records and the per-row summary.

use crate::document::RowKey;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Wafer coordinate of a matched die, in the negated native frame: `[-column, -row]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Nkf7Coordinate {
    /// Negated absolute column
    pub x: i64,
    /// Negated row index
    pub y: i64,
}

impl Nkf7Coordinate {
    /// Coordinate of the die at `column` on row `row`, or `None` if either
    /// cannot be negated within `i64`.
    pub fn at(column: usize, row: i64) -> Option<Self> {
        Some(Self {
            x: i64::try_from(column).ok()?.checked_neg()?,
            y: row.checked_neg()?,
        })
    }
}

impl From<[i64; 2]> for Nkf7Coordinate {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Nkf7Coordinate> for [i64; 2] {
    fn from(coord: Nkf7Coordinate) -> Self {
        [coord.x, coord.y]
    }
}

/// Coordinate records keyed by `{prefix}_{x}_{y}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateMap(BTreeMap<String, Nkf7Coordinate>);

impl CoordinateMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; a colliding key is overwritten.
    pub fn insert(&mut self, key: String, coord: Nkf7Coordinate) {
        self.0.insert(key, coord);
    }

    /// Look up a record by key.
    pub fn get(&self, key: &str) -> Option<&Nkf7Coordinate> {
        self.0.get(key)
    }

    /// Iterate records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Nkf7Coordinate)> {
        self.0.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Matches found on one row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMatches {
    /// Number of matches
    pub count: usize,
    /// Absolute columns of the matches, left to right
    pub columns: Vec<usize>,
}

impl RowMatches {
    /// Record a match at `column`.
    pub fn push(&mut self, column: usize) {
        self.count += 1;
        self.columns.push(column);
    }
}

/// Inclusive extents of the summary's unit squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Leftmost column
    pub min_column: usize,
    /// Rightmost column
    pub max_column: usize,
    /// Lowest row index
    pub min_row: i64,
    /// Highest row index
    pub max_row: i64,
}

/// Per-row match summary, holding only rows with at least one match.
///
/// Rows keep the order in which they were added, which is document order for
/// an analysis result. Serializes as `{rowKey: {"count": n, "columns": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSummary {
    rows: Vec<(String, RowMatches)>,
}

impl RowSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row. Rows without matches are not recorded.
    pub fn insert(&mut self, key: impl Into<String>, matches: RowMatches) {
        if matches.count == 0 {
            return;
        }
        let key = key.into();
        match self.rows.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = matches,
            None => self.rows.push((key, matches)),
        }
    }

    /// Matches of row `key`.
    pub fn get(&self, key: &str) -> Option<&RowMatches> {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, m)| m)
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowMatches)> {
        self.rows.iter().map(|(k, m)| (k.as_str(), m))
    }

    /// Number of rows with matches.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row has a match.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total matches over all rows.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, m)| m.count).sum()
    }

    /// Every matched `(column, row)` unit square. Rows whose key does not parse
    /// against `row_key_prefix` are skipped.
    pub fn cells<'a>(&'a self, row_key_prefix: &'a str) -> impl Iterator<Item = (usize, i64)> + 'a {
        self.rows.iter().flat_map(move |(key, matches)| {
            let row = RowKey::parse(key, row_key_prefix).index();
            matches
                .columns
                .iter()
                .filter_map(move |&column| row.map(|row| (column, row)))
        })
    }

    /// Inclusive extents of [`cells`](Self::cells), or `None` when there are none.
    pub fn bounds(&self, row_key_prefix: &str) -> Option<Bounds> {
        self.cells(row_key_prefix).fold(None, |acc, (column, row)| {
            Some(match acc {
                None => Bounds {
                    min_column: column,
                    max_column: column,
                    min_row: row,
                    max_row: row,
                },
                Some(b) => Bounds {
                    min_column: b.min_column.min(column),
                    max_column: b.max_column.max(column),
                    min_row: b.min_row.min(row),
                    max_row: b.max_row.max(row),
                },
            })
        })
    }
}

impl Serialize for RowSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (key, matches) in &self.rows {
            map.serialize_entry(key, matches)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RowSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SummaryVisitor;

        impl<'de> Visitor<'de> for SummaryVisitor {
            type Value = RowSummary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of row summaries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut summary = RowSummary::new();
                while let Some((key, matches)) = map.next_entry::<String, RowMatches>()? {
                    summary.insert(key, matches);
                }
                Ok(summary)
            }
        }

        deserializer.deserialize_map(SummaryVisitor)
    }
}
