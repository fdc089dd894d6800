//! Wafer rows, column blocks and slot selections.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const ALL_TOKEN: &str = "All";

/// A block's declaration of which local die slots it selects.
///
/// Written in the document either as `["All"]` or as a list of slot indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSelection {
    /// Every slot of the referenced group (or every existing slot, for the testable set)
    All,
    /// Exactly these local slot indices, in document order
    Explicit(Vec<usize>),
    /// A list holding entries that are not slot indices (`None`); every entry
    /// still counts toward the list's length
    Irregular(Vec<Option<usize>>),
}

impl Default for SlotSelection {
    fn default() -> Self {
        SlotSelection::Explicit(Vec::new())
    }
}

impl SlotSelection {
    /// Whether this is the `All` sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, SlotSelection::All)
    }

    /// Entries of an explicit list in order, `None` where an entry names no slot.
    /// Empty for `All`.
    pub fn entries(&self) -> Vec<Option<usize>> {
        match self {
            SlotSelection::All => Vec::new(),
            SlotSelection::Explicit(slots) => slots.iter().copied().map(Some).collect(),
            SlotSelection::Irregular(entries) => entries.clone(),
        }
    }
}

impl Serialize for SlotSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SlotSelection::All => [ALL_TOKEN].serialize(serializer),
            SlotSelection::Explicit(slots) => slots.serialize(serializer),
            SlotSelection::Irregular(entries) => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SlotSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;

        if let [Value::String(token)] = values.as_slice() {
            if token == ALL_TOKEN {
                return Ok(SlotSelection::All);
            }
        }

        let entries: Vec<Option<usize>> = values
            .iter()
            .map(|v| v.as_u64().and_then(|n| usize::try_from(n).ok()))
            .collect();

        if entries.iter().all(Option::is_some) {
            Ok(SlotSelection::Explicit(entries.into_iter().flatten().collect()))
        } else {
            Ok(SlotSelection::Irregular(entries))
        }
    }
}

/// One entry of a row's column sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBlock {
    /// Referenced group; may be unknown to the catalog
    #[serde(rename = "GroupName", default)]
    pub group_name: String,

    /// Slots physically present at this block's position
    #[serde(rename = "ExistingAsics", default)]
    pub existing: SlotSelection,

    /// Slots that are mechanically intact and testable
    #[serde(rename = "MechanicallyIntergerASICs", default)]
    pub testable: SlotSelection,
}

impl ColumnBlock {
    /// Create a block.
    pub fn new(
        group_name: impl Into<String>,
        existing: SlotSelection,
        testable: SlotSelection,
    ) -> Self {
        Self {
            group_name: group_name.into(),
            existing,
            testable,
        }
    }
}

/// Body of a `MapGroups` row entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowColumns {
    /// Column blocks, left to right
    #[serde(rename = "MapGroupsColumns", default)]
    pub blocks: Vec<ColumnBlock>,
}

/// Body of a row entry after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowBody {
    /// Column blocks, left to right
    Blocks(Vec<ColumnBlock>),
    /// The body did not decode; holds the decoder's message
    Undecodable(String),
}

/// A row entry as written in the document: its key plus its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaferRow {
    /// Raw row key (e.g. `MapGroupsRow12`)
    pub key: String,
    /// Decoded body
    pub body: RowBody,
}

impl WaferRow {
    /// Create a row from its blocks.
    pub fn new(key: impl Into<String>, blocks: Vec<ColumnBlock>) -> Self {
        Self {
            key: key.into(),
            body: RowBody::Blocks(blocks),
        }
    }

    /// Create a row whose body could not be decoded.
    pub fn undecodable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: RowBody::Undecodable(reason.into()),
        }
    }

    /// Decode a raw row body. Decoding failures are kept on the row, not raised.
    pub fn from_value(key: impl Into<String>, body: &Value) -> Self {
        match RowColumns::deserialize(body) {
            Ok(columns) => Self::new(key, columns.blocks),
            Err(e) => Self::undecodable(key, e.to_string()),
        }
    }

    /// The row's blocks, or `None` when the body did not decode.
    pub fn blocks(&self) -> Option<&[ColumnBlock]> {
        match &self.body {
            RowBody::Blocks(blocks) => Some(blocks),
            RowBody::Undecodable(_) => None,
        }
    }
}

/// Classification of a `MapGroups` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    /// Key carries the row prefix followed by an integer row index
    Index(i64),
    /// Key carries the row prefix but the remainder is not an integer
    Malformed,
    /// Key does not carry the row prefix
    Unrelated,
}

impl RowKey {
    /// Classify `key` against `prefix`.
    pub fn parse(key: &str, prefix: &str) -> Self {
        match key.strip_prefix(prefix) {
            None => RowKey::Unrelated,
            // the row index is negated in coordinates, so i64::MIN is unusable
            Some(rest) => match rest.trim().parse::<i64>() {
                Ok(index) if index.checked_neg().is_some() => RowKey::Index(index),
                _ => RowKey::Malformed,
            },
        }
    }

    /// The row index, if the key is well formed.
    pub fn index(self) -> Option<i64> {
        match self {
            RowKey::Index(index) => Some(index),
            _ => None,
        }
    }
}
