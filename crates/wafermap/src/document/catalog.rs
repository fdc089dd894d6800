//! Group catalog: named, ordered die-slot definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One die slot within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieSlotDef {
    /// Family label, possibly carrying a variant suffix (e.g. `NKF7_v2`)
    #[serde(rename = "FamilyType", default)]
    pub family_type: String,
}

impl DieSlotDef {
    /// Create a slot definition with the given family label.
    pub fn new(family_type: impl Into<String>) -> Self {
        Self {
            family_type: family_type.into(),
        }
    }

    /// Whether the family label contains `family`.
    pub fn is_family(&self, family: &str) -> bool {
        self.family_type.contains(family)
    }
}

/// Mapping from group name to its ordered die slots.
///
/// Slot positions are 0-based within the group and have no relation to wafer columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupCatalog {
    groups: HashMap<String, Vec<DieSlotDef>>,
}

impl GroupCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a group.
    pub fn with_group(mut self, name: impl Into<String>, slots: Vec<DieSlotDef>) -> Self {
        self.insert(name, slots);
        self
    }

    /// Insert or replace a group.
    pub fn insert(&mut self, name: impl Into<String>, slots: Vec<DieSlotDef>) {
        self.groups.insert(name.into(), slots);
    }

    /// Ordered slots of `name`, or an empty slice for an unknown group.
    pub fn slots(&self, name: &str) -> &[DieSlotDef] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of slots in `name` (0 for an unknown group).
    pub fn group_len(&self, name: &str) -> usize {
        self.slots(name).len()
    }

    /// Whether the catalog defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the catalog has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
