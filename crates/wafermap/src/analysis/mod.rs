//! NKF7 placement analysis.
//!
//! Rows are independent: each is resolved into absolute columns, every
//! candidate placement of a block of interest goes through
//! [`check_slot`](crate::filter::check_slot), and accepted placements are
//! accumulated into the coordinate map and the row summary. The document is
//! never modified.

mod output;
mod stats;

pub use output::{Bounds, CoordinateMap, Nkf7Coordinate, RowMatches, RowSummary};
pub use stats::AnalysisStats;

use crate::config::AnalysisConfig;
use crate::document::{GroupCatalog, RowKey, WaferDocument, WaferRow};
use crate::error::Result;
use crate::filter::{check_slot, TargetPositions};
use crate::resolve::{resolve_row, Candidate};
use log::{debug, info};
use rayon::prelude::*;

/// Result of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Coordinate record per matched die
    pub coordinates: CoordinateMap,
    /// Rows with at least one match, in document order
    pub rows: RowSummary,
    /// Diagnostic counters
    pub stats: AnalysisStats,
}

/// Outcome of a single row entry.
#[derive(Debug)]
enum RowOutcome {
    Ignored,
    Skipped,
    Scanned {
        key: String,
        found: Vec<(String, Nkf7Coordinate)>,
        matches: RowMatches,
        stats: AnalysisStats,
    },
}

/// Runs the analysis with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    targets: TargetPositions,
}

impl Analyzer {
    /// Create an analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`](crate::MapError::InvalidConfig) if the
    /// configuration does not validate.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            targets: TargetPositions::builtin(),
        })
    }

    /// The analyzer's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every row of `doc`.
    pub fn analyze(&self, doc: &WaferDocument) -> Analysis {
        let outcomes: Vec<RowOutcome> = if self.config.parallel {
            doc.rows
                .par_iter()
                .map(|row| self.analyze_row(&doc.groups, row))
                .collect()
        } else {
            doc.rows
                .iter()
                .map(|row| self.analyze_row(&doc.groups, row))
                .collect()
        };

        let mut analysis = Analysis::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Ignored => analysis.stats.rows_ignored += 1,
                RowOutcome::Skipped => analysis.stats.rows_skipped += 1,
                RowOutcome::Scanned {
                    key,
                    found,
                    matches,
                    stats,
                } => {
                    for (coord_key, coord) in found {
                        analysis.coordinates.insert(coord_key, coord);
                    }
                    analysis.rows.insert(key, matches);
                    analysis.stats.merge(&stats);
                }
            }
        }

        info!(
            "Total {} placements found: {} on {} rows",
            self.config.family,
            analysis.coordinates.len(),
            analysis.rows.len()
        );

        analysis
    }

    fn analyze_row(&self, catalog: &GroupCatalog, row: &WaferRow) -> RowOutcome {
        let row_index = match RowKey::parse(&row.key, &self.config.row_key_prefix) {
            RowKey::Index(index) => index,
            RowKey::Unrelated => return RowOutcome::Ignored,
            RowKey::Malformed => {
                debug!("Skipping row with malformed key: {}", row.key);
                return RowOutcome::Skipped;
            }
        };

        let Some(blocks) = row.blocks() else {
            debug!("Skipping row with undecodable body: {}", row.key);
            return RowOutcome::Skipped;
        };

        let layout = resolve_row(catalog, self.targets, blocks);

        let mut stats = AnalysisStats {
            rows_scanned: 1,
            blocks: layout.blocks.len(),
            blocks_of_interest: layout.blocks.iter().filter(|b| b.is_of_interest()).count(),
            columns: layout.width,
            ..Default::default()
        };
        let mut found = Vec::new();
        let mut matches = RowMatches::default();

        for Candidate {
            block,
            target,
            placement,
        } in layout.candidates()
        {
            let group = &block.block.group_name;

            if let Err(rejection) = check_slot(
                placement.slot,
                target,
                &block.testable,
                catalog.slots(group),
                &self.config.family,
            ) {
                stats.reject(rejection);
                continue;
            }

            let Some(coord) = Nkf7Coordinate::at(placement.column, row_index) else {
                debug!(
                    "Skipping row {}: column {} has no coordinate",
                    row.key, placement.column
                );
                return RowOutcome::Skipped;
            };

            debug!(
                "[{}] slot {} of {} at column {} is {}",
                row.key, placement.slot, group, placement.column, self.config.family
            );

            found.push((self.config.coordinate_key(coord.x, coord.y), coord));
            matches.push(placement.column);
            stats.matches += 1;
        }

        RowOutcome::Scanned {
            key: row.key.clone(),
            found,
            matches,
            stats,
        }
    }
}

/// Analyze `doc` with `config`.
///
/// # Errors
///
/// Returns [`MapError::InvalidConfig`](crate::MapError::InvalidConfig) if the
/// configuration does not validate.
pub fn analyze(doc: &WaferDocument, config: &AnalysisConfig) -> Result<Analysis> {
    Ok(Analyzer::new(config.clone())?.analyze(doc))
}
