use log::{info, warn};

use crate::{
    data::DataProvider,
    engines::forks::ForkManager,
    engines::replication::{ActivationPolicy, Chromosome, Genome},
    error::Result,
    types::{SimulationStats, TerminationReason},
};

/// Tunable parameters of one S-phase run.
#[derive(Debug, Clone, Copy)]
pub struct SPhaseParams {
    /// Window of the constitutive-origin policy; 0 selects the stochastic
    /// policy.
    pub origin_range: usize,
    /// Size of the replication fork pool.
    pub fork_count: usize,
    /// Bases replicated per fork per tick.
    pub speed: usize,
    /// Tick budget before the run is declared timed out.
    pub timeout: u32,
    /// RNAP cycling period; 0 disables transcription conflicts.
    pub transcription_period: u32,
    /// Whether collisions boost dormant origins nearby.
    pub use_dormant: bool,
}

/// One independent cell simulation: samples candidate origins each tick,
/// fires them through the fork manager, and runs the tick loop until the
/// genome is replicated, the budget runs out, or no origin can ever fire
/// again.
pub struct SPhase {
    params: SPhaseParams,
    genome: Genome,
    fork_manager: ForkManager,
}

impl SPhase {
    /// Builds the simulation from provider data, creating one chromosome
    /// per code the provider lists. The provider is only read during
    /// construction.
    pub fn new(params: SPhaseParams, provider: &dyn DataProvider, seed: u64) -> Result<Self> {
        let mut chromosomes = Vec::new();
        for code in provider.codes() {
            chromosomes.push(Chromosome::new(
                code.clone(),
                provider.length(&code)?,
                provider.probability_landscape(&code)?,
                provider.transcription_regions(&code)?,
                provider.constitutive_origins(&code)?,
            )?);
        }
        Self::with_genome(params, Genome::new(chromosomes, seed)?)
    }

    /// Builds the simulation over an already-assembled genome.
    pub fn with_genome(params: SPhaseParams, genome: Genome) -> Result<Self> {
        let fork_manager = ForkManager::new(params.fork_count, params.speed)?;
        Ok(Self {
            params,
            genome,
            fork_manager,
        })
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn fork_manager(&self) -> &ForkManager {
        &self.fork_manager
    }

    pub fn params(&self) -> SPhaseParams {
        self.params
    }

    /// Runs the tick loop to termination. Each tick advances and unfreezes
    /// forks, resolves transcription conflicts, then makes one attachment
    /// attempt per currently free fork. Termination is checked at the top
    /// of every tick.
    pub fn simulate(&mut self, cell: usize) -> Result<SimulationStats> {
        let use_constitutive = self.params.origin_range > 0;
        let policy = if use_constitutive {
            ActivationPolicy::Constitutive {
                origin_range: self.params.origin_range,
            }
        } else {
            ActivationPolicy::Stochastic
        };

        info!("cell {cell}: starting simulation");

        let mut time: u32 = 0;
        let mut collisions: u64 = 0;
        let termination = loop {
            if self.genome.is_fully_replicated() {
                break TerminationReason::Complete;
            }
            if time >= self.params.timeout {
                break TerminationReason::Timeout;
            }
            if use_constitutive
                && self.genome.unfired_constitutive_origins() == 0
                && self.fork_manager.free_count() == self.fork_manager.pool_size()
            {
                break TerminationReason::Deadlock;
            }

            time += 1;

            self.fork_manager
                .advance_attached_forks(&mut self.genome, time)?;

            if self.params.transcription_period > 0 {
                collisions += self.fork_manager.check_replication_transcription_conflicts(
                    &mut self.genome,
                    time,
                    self.params.transcription_period,
                    self.params.use_dormant,
                )? as u64;
            }

            if !self.genome.is_fully_replicated() {
                let attempts = self.fork_manager.free_count();
                for _ in 0..attempts {
                    let location = self.genome.sample_random_location();
                    if location.is_replicated(&self.genome)
                        || self.fork_manager.free_count() < 2
                        || !location.will_activate(&mut self.genome, policy)
                    {
                        continue;
                    }
                    self.fork_manager
                        .attach_forks(&mut self.genome, location, time)?;
                    if use_constitutive {
                        if let Some(origin) = location
                            .find_nearby_unfired_origin(&self.genome, self.params.origin_range)
                        {
                            location.mark_origin_fired(&mut self.genome, origin)?;
                        }
                    }
                }
            }
        };

        match termination {
            TerminationReason::Complete => {
                info!("cell {cell}: genome fully replicated at tick {time}")
            }
            TerminationReason::Timeout => warn!("cell {cell}: timed out after {time} ticks"),
            TerminationReason::Deadlock => {
                warn!("cell {cell}: no usable origin left after {time} ticks")
            }
        }
        info!("cell {cell}: {collisions} collisions");

        Ok(SimulationStats {
            termination_tick: time,
            termination,
            collisions,
            average_interorigin_distance: self.genome.average_interorigin_distance(),
            unfired_constitutive_origins: self.genome.unfired_constitutive_origins(),
        })
    }
}
