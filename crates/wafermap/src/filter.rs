//! Target positions and the per-slot acceptance checks.
//!
//! A slot placed on the wafer is reported only if it passes, in order:
//! target position, testability, catalog bounds, family label.

use crate::document::DieSlotDef;
use crate::resolve::TestableSet;
use std::fmt;

/// Groups that carry the family of interest, with the one slot position that carries it.
const BUILTIN_TARGETS: &[(&str, usize)] = &[("Group2", 8), ("Group9", 7)];

/// Lookup table from group name to its target slot position.
///
/// The table's groups are exactly the groups of interest; any other group is
/// only sized for column accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPositions {
    entries: &'static [(&'static str, usize)],
}

impl TargetPositions {
    /// The built-in table.
    pub const fn builtin() -> Self {
        Self {
            entries: BUILTIN_TARGETS,
        }
    }

    /// Target slot position for `group`, if the group is of interest.
    pub fn position(&self, group: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| *name == group)
            .map(|&(_, position)| position)
    }

    /// Whether `group` is of interest.
    pub fn is_target_group(&self, group: &str) -> bool {
        self.position(group).is_some()
    }

    /// Names of the groups of interest.
    pub fn groups(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(name, _)| name)
    }
}

impl Default for TargetPositions {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Why a placed slot was not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Slot is not the group's target position
    NotTargetPosition,
    /// Slot is not in the block's testable set
    NotTestable,
    /// Slot index is past the end of the group's catalog entry
    OutOfBounds,
    /// Slot's family label does not contain the family of interest
    FamilyMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotTargetPosition => write!(f, "not the target position"),
            Rejection::NotTestable => write!(f, "not testable"),
            Rejection::OutOfBounds => write!(f, "outside the group catalog"),
            Rejection::FamilyMismatch => write!(f, "family mismatch"),
        }
    }
}

/// Run the acceptance checks for one placed slot.
///
/// `slots` is the catalog entry of the block's group and `target` its target position.
pub fn check_slot(
    slot: usize,
    target: usize,
    testable: &TestableSet,
    slots: &[DieSlotDef],
    family: &str,
) -> Result<(), Rejection> {
    if slot != target {
        return Err(Rejection::NotTargetPosition);
    }
    if !testable.contains(slot) {
        return Err(Rejection::NotTestable);
    }
    let def = slots.get(slot).ok_or(Rejection::OutOfBounds)?;
    if !def.is_family(family) {
        return Err(Rejection::FamilyMismatch);
    }
    Ok(())
}
