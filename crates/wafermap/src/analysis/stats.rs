//! Counters collected during an analysis run.

use crate::filter::Rejection;

/// Diagnostic counters for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Rows whose key parsed to a row index
    pub rows_scanned: usize,
    /// Entries without the row key prefix
    pub rows_ignored: usize,
    /// Entries with the prefix but an unparsable row index
    pub rows_skipped: usize,
    /// Blocks resolved over all scanned rows
    pub blocks: usize,
    /// Resolved blocks whose group is of interest
    pub blocks_of_interest: usize,
    /// Columns resolved over all scanned rows
    pub columns: usize,
    /// Accepted placements
    pub matches: usize,
    /// Placements rejected for not being the target position
    pub not_target_position: usize,
    /// Placements rejected as untestable
    pub not_testable: usize,
    /// Placements rejected as outside the group catalog
    pub out_of_bounds: usize,
    /// Placements rejected for their family label
    pub family_mismatch: usize,
}

impl AnalysisStats {
    /// Count one rejection.
    pub fn reject(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::NotTargetPosition => self.not_target_position += 1,
            Rejection::NotTestable => self.not_testable += 1,
            Rejection::OutOfBounds => self.out_of_bounds += 1,
            Rejection::FamilyMismatch => self.family_mismatch += 1,
        }
    }

    /// Total rejected placements.
    pub fn rejected(&self) -> usize {
        self.not_target_position + self.not_testable + self.out_of_bounds + self.family_mismatch
    }

    /// Add another run's counters to these.
    pub fn merge(&mut self, other: &AnalysisStats) {
        self.rows_scanned += other.rows_scanned;
        self.rows_ignored += other.rows_ignored;
        self.rows_skipped += other.rows_skipped;
        self.blocks += other.blocks;
        self.blocks_of_interest += other.blocks_of_interest;
        self.columns += other.columns;
        self.matches += other.matches;
        self.not_target_position += other.not_target_position;
        self.not_testable += other.not_testable;
        self.out_of_bounds += other.out_of_bounds;
        self.family_mismatch += other.family_mismatch;
    }
}
