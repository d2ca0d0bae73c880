use serde::{Deserialize, Serialize};

use super::traits::ConfigSection;
use crate::error::ReplisimError;

/// Where the genome dataset lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root directory of genome datasets.
    pub data_dir: String,
    /// Organism subdirectory to load.
    pub organism: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            organism: "example".to_string(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), ReplisimError> {
        if self.data_dir.is_empty() {
            return Err(ReplisimError::Configuration(
                "The data directory must not be empty".to_string(),
            ));
        }
        if self.organism.is_empty() {
            return Err(ReplisimError::Configuration(
                "The organism name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
