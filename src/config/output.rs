use serde::{Deserialize, Serialize};

use super::traits::ConfigSection;
use crate::error::ReplisimError;

/// What gets written per simulated cell, and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub folder: String,
    /// Write one `.cseq` strand file per chromosome.
    pub write_strands: bool,
    /// Write the per-cell `summary.json` record.
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: "output".to_string(),
            write_strands: true,
            write_summary: true,
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), ReplisimError> {
        if self.folder.is_empty() {
            return Err(ReplisimError::Configuration(
                "The output folder must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
