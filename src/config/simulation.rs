use serde::{Deserialize, Serialize};

use super::traits::ConfigSection;
use crate::error::ReplisimError;

/// Engine parameters for a batch of cell simulations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of independent cells to simulate.
    pub cells: usize,
    /// Size of each cell's replication fork pool.
    pub resources: usize,
    /// Bases replicated per fork per tick.
    pub speed: usize,
    /// Tick budget before a cell is declared timed out.
    pub timeout: u32,
    /// RNAP cycling period; 0 disables transcription conflicts.
    pub period: u32,
    /// Constitutive-origin window in bases; 0 selects the stochastic
    /// activation policy.
    pub constitutive: usize,
    /// Boost dormant origins around collision sites.
    pub dormant: bool,
    /// Base seed; cell `i` runs with `i XOR seed`.
    pub seed: u64,
    /// Label used in output paths.
    pub name: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cells: 1,
            resources: 10,
            speed: 1,
            timeout: 1_000_000,
            period: 0,
            constitutive: 0,
            dormant: false,
            seed: 0,
            name: "sphase".to_string(),
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), ReplisimError> {
        if self.cells == 0 {
            return Err(ReplisimError::Configuration(
                "At least one cell must be simulated".to_string(),
            ));
        }
        if self.resources < 2 {
            return Err(ReplisimError::Configuration(
                "Origins fire bidirectionally, so the fork pool needs at least two forks"
                    .to_string(),
            ));
        }
        if self.speed == 0 {
            return Err(ReplisimError::Configuration(
                "Fork speed must be positive".to_string(),
            ));
        }
        if self.timeout == 0 {
            return Err(ReplisimError::Configuration(
                "The tick budget must be positive".to_string(),
            ));
        }
        if self.name.is_empty() {
            return Err(ReplisimError::Configuration(
                "The run name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn a_one_fork_pool_is_rejected() {
        let config = SimulationConfig {
            resources: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_speed_is_rejected() {
        let config = SimulationConfig {
            speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
