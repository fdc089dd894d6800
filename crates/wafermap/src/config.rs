//! Analysis configuration.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Substring a slot's family label must contain to count as a match
    pub family: String,

    /// Prefix identifying row entries under `MapGroups`; the rest of the key is the row index
    pub row_key_prefix: String,

    /// Prefix of the coordinate keys (`{prefix}_{-col}_{-row}`)
    pub coordinate_key_prefix: String,

    /// Analyze rows on the rayon thread pool and merge in document order
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            family: "NKF7".to_string(),
            row_key_prefix: "MapGroupsRow".to_string(),
            coordinate_key_prefix: "NKF7_S".to_string(),
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Enable or disable parallel row analysis.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] if the family or row key prefix is empty.
    pub fn validate(&self) -> Result<()> {
        if self.family.is_empty() {
            return Err(MapError::invalid_config("family must not be empty"));
        }

        if self.row_key_prefix.is_empty() {
            return Err(MapError::invalid_config("row_key_prefix must not be empty"));
        }

        Ok(())
    }

    /// Build the coordinate key for an absolute column and row index.
    pub fn coordinate_key(&self, x: i64, y: i64) -> String {
        format!("{}_{}_{}", self.coordinate_key_prefix, x, y)
    }
}
