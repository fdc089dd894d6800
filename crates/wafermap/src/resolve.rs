//! Column index resolution.
//!
//! Each row is walked left to right with a single cursor holding the next free
//! absolute column. A block occupies one column per *existing* slot, so its
//! width is the size of its existence set, not the size of its group and not
//! one column per block. The cursor advances past every block, including
//! blocks whose group is not of interest.
//!
//! ```text
//! block:    | Group1 (All, 6 slots) | Group2 [2, 8] | ...
//! columns:  | 0  1  2  3  4  5      | 6  7          | 8 ...
//! slots:    | 0  1  2  3  4  5      | 2  8          |
//! ```

use crate::document::{ColumnBlock, GroupCatalog, SlotSelection};
use crate::filter::TargetPositions;
use log::{trace, warn};
use std::collections::HashSet;

/// A local slot index placed at an absolute wafer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Local slot index within the block's group
    pub slot: usize,
    /// Absolute column on the wafer row
    pub column: usize,
}

/// Slots of a block that are testable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestableSet(HashSet<usize>);

impl TestableSet {
    /// Build a set from slot indices.
    pub fn from_slots(slots: impl IntoIterator<Item = usize>) -> Self {
        Self(slots.into_iter().collect())
    }

    /// Whether `slot` is testable.
    pub fn contains(&self, slot: usize) -> bool {
        self.0.contains(&slot)
    }

    /// Number of testable slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is testable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A block with its absolute column range resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBlock<'a> {
    /// The source block
    pub block: &'a ColumnBlock,
    /// First absolute column occupied by the block
    pub start: usize,
    /// Existing entries in document order; the i-th occupies `start + i`.
    /// `None` marks an entry that names no slot but still takes its column.
    pub existing: Vec<Option<usize>>,
    /// Testable slot indices
    pub testable: TestableSet,
    /// Target slot position when the block's group is of interest
    pub target: Option<usize>,
}

impl ResolvedBlock<'_> {
    /// Number of columns the block occupies.
    pub fn width(&self) -> usize {
        self.existing.len()
    }

    /// One past the last column occupied by the block.
    pub fn end(&self) -> usize {
        self.start + self.width()
    }

    /// Whether the block's group is of interest.
    pub fn is_of_interest(&self) -> bool {
        self.target.is_some()
    }

    /// Every existing slot with its absolute column.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        placements_from(self.start, &self.existing)
    }

    /// Placements handed to the filter: all of them for a block of interest, none otherwise.
    pub fn candidates(&self) -> impl Iterator<Item = Placement> + '_ {
        self.is_of_interest()
            .then(|| self.placements())
            .into_iter()
            .flatten()
    }
}

fn placements_from(
    start: usize,
    existing: &[Option<usize>],
) -> impl Iterator<Item = Placement> + '_ {
    existing
        .iter()
        .enumerate()
        .filter_map(move |(i, slot)| slot.map(|slot| Placement { slot, column: start + i }))
}

/// Walks one row's blocks, assigning absolute columns.
#[derive(Debug)]
pub struct ColumnResolver<'a> {
    catalog: &'a GroupCatalog,
    targets: TargetPositions,
    cursor: usize,
}

impl<'a> ColumnResolver<'a> {
    /// Start a row at column 0.
    pub fn new(catalog: &'a GroupCatalog, targets: TargetPositions) -> Self {
        Self {
            catalog,
            targets,
            cursor: 0,
        }
    }

    /// Next free absolute column.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resolve the next block of the row and advance the cursor past it.
    pub fn resolve(&mut self, block: &'a ColumnBlock) -> ResolvedBlock<'a> {
        let group_len = self.catalog.group_len(&block.group_name);

        let existing = match &block.existing {
            SlotSelection::All => (0..group_len).map(Some).collect::<Vec<_>>(),
            selection => {
                let entries = selection.entries();
                if self.catalog.contains(&block.group_name)
                    && entries.iter().flatten().any(|&slot| slot >= group_len)
                {
                    warn!(
                        "Block of {} lists slots beyond its {} catalog entries: {:?}",
                        block.group_name, group_len, entries
                    );
                }
                entries
            }
        };

        let testable = match &block.testable {
            SlotSelection::All => TestableSet::from_slots(existing.iter().flatten().copied()),
            selection => TestableSet::from_slots(selection.entries().into_iter().flatten()),
        };

        let resolved = ResolvedBlock {
            block,
            start: self.cursor,
            existing,
            testable,
            target: self.targets.position(&block.group_name),
        };

        self.cursor += resolved.width();
        trace!(
            "Block {} spans columns {}..{}",
            block.group_name,
            resolved.start,
            self.cursor
        );

        resolved
    }
}

/// All blocks of a row with their resolved columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout<'a> {
    /// Resolved blocks, left to right
    pub blocks: Vec<ResolvedBlock<'a>>,
    /// Final cursor value: total number of columns in the row
    pub width: usize,
}

/// A placement within a block of interest, with that block's target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'l, 'a> {
    /// The resolved block holding the placement
    pub block: &'l ResolvedBlock<'a>,
    /// Target slot position of the block's group
    pub target: usize,
    /// The placed slot
    pub placement: Placement,
}

impl<'a> RowLayout<'a> {
    /// Placements of every block of interest, left to right.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate<'_, 'a>> + '_ {
        self.blocks
            .iter()
            .filter_map(|block| block.target.map(|target| (block, target)))
            .flat_map(|(block, target)| {
                block.placements().map(move |placement| Candidate {
                    block,
                    target,
                    placement,
                })
            })
    }
}

/// Resolve a whole row's block sequence.
pub fn resolve_row<'a>(
    catalog: &'a GroupCatalog,
    targets: TargetPositions,
    blocks: &'a [ColumnBlock],
) -> RowLayout<'a> {
    let mut resolver = ColumnResolver::new(catalog, targets);
    let blocks: Vec<_> = blocks.iter().map(|block| resolver.resolve(block)).collect();

    RowLayout {
        blocks,
        width: resolver.cursor(),
    }
}
