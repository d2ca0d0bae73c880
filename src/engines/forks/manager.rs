use serde::Serialize;

use crate::{
    engines::forks::fork::{ForkState, ReplicationFork},
    engines::replication::{Genome, GenomicLocation},
    error::{ReplisimError, Result},
    types::ForkDirection,
};

/// Lifetime counters of the fork pool.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ForkMetrics {
    pub attached: u64,
    pub detached_normal: u64,
    pub detached_collision: u64,
}

/// Owns the fixed pool of replication forks and schedules their work each
/// tick: attaching pairs at fired origins, advancing them, ending cooldown
/// quarantines and resolving collisions with transcription. Between ticks
/// `free + attached + cooldown` always equals the pool size.
pub struct ForkManager {
    forks: Vec<ReplicationFork>,
    free_count: usize,
    metrics: ForkMetrics,
}

impl ForkManager {
    pub fn new(pool_size: usize, speed: usize) -> Result<Self> {
        if pool_size == 0 {
            return Err(ReplisimError::InvalidArgument(
                "the fork pool must not be empty".to_string(),
            ));
        }
        if speed == 0 {
            return Err(ReplisimError::InvalidArgument(
                "fork speed must be positive".to_string(),
            ));
        }

        Ok(Self {
            forks: (0..pool_size).map(|_| ReplicationFork::new(speed)).collect(),
            free_count: pool_size,
            metrics: ForkMetrics::default(),
        })
    }

    pub fn pool_size(&self) -> usize {
        self.forks.len()
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn metrics(&self) -> ForkMetrics {
        self.metrics
    }

    pub fn forks(&self) -> &[ReplicationFork] {
        &self.forks
    }

    /// Fires an origin at `location`: launches two free forks outward in
    /// opposite directions, so both leading strands are synthesized. With
    /// fewer than two free forks the origin is left unfired. Returns
    /// whether a pair was launched.
    pub fn attach_forks(
        &mut self,
        genome: &mut Genome,
        location: GenomicLocation,
        time: u32,
    ) -> Result<bool> {
        if self.free_count < 2 {
            return Ok(false);
        }

        let mut attached = 0;
        let mut direction = ForkDirection::Forward;
        for fork in &mut self.forks {
            if !fork.is_free() {
                continue;
            }
            fork.attach(genome, location, direction, time)?;
            self.metrics.attached += 1;
            attached += 1;
            direction = ForkDirection::Reverse;
            if attached == 2 {
                break;
            }
        }
        self.free_count -= attached;

        if attached == 2 {
            genome
                .chromosome_mut(location.chromosome())
                .record_fired_origin();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// One pass over the pool: cooldown quarantines end and count as free
    /// again, attached forks advance. A fork whose advance came back
    /// non-normal went into cooldown and is counted as a normal detach.
    pub fn advance_attached_forks(&mut self, genome: &mut Genome, time: u32) -> Result<()> {
        for fork in &mut self.forks {
            if fork.clear_cooldown() {
                self.free_count += 1;
            } else if fork.is_attached() {
                let outcome = fork.advance(genome, time)?;
                if !outcome.is_normal() {
                    self.metrics.detached_normal += 1;
                }
            }
        }
        Ok(())
    }

    /// Detects head-to-head encounters between attached forks and the
    /// transcription machinery cycling through each region with `period`.
    /// The polymerase sits at offset `time % period` within every region; a
    /// fork whose in-region offset coincides with it modulo the period, and
    /// whose direction opposes the region's, collides. A colliding fork
    /// detaches into cooldown, after boosting nearby dormant origins when
    /// `use_dormant` is set. At most one collision per fork per tick.
    /// Returns the number of collisions found.
    pub fn check_replication_transcription_conflicts(
        &mut self,
        genome: &mut Genome,
        time: u32,
        period: u32,
        use_dormant: bool,
    ) -> Result<usize> {
        if period == 0 {
            return Err(ReplisimError::InvalidArgument(
                "the transcription period must be positive".to_string(),
            ));
        }

        let rnap_position = (time % period) as usize;
        let mut collisions = 0;

        for fork in &mut self.forks {
            let (chromosome, base, direction) = match fork.state() {
                ForkState::Attached {
                    chromosome,
                    base,
                    direction,
                } => (chromosome, base, direction),
                _ => continue,
            };

            let region_count = genome.chromosome(chromosome).transcription_regions().len();
            for index in 0..region_count {
                let region = genome.chromosome(chromosome).transcription_regions()[index];
                let offset = match region.offset_of(base) {
                    Some(offset) => offset,
                    None => continue,
                };

                if offset % period as usize == rnap_position
                    && direction.opposes(region.rnap_direction())
                {
                    if use_dormant {
                        genome.chromosome_mut(chromosome).boost_dormant_activation(base)?;
                    }
                    fork.detach(true);
                    self.metrics.detached_collision += 1;
                    collisions += 1;
                    break;
                }
            }
        }

        Ok(collisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::replication::Chromosome;
    use crate::types::TranscriptionRegion;

    fn bare_genome(length: usize) -> Genome {
        let chrm =
            Chromosome::new("chr1", length, vec![0.0; length], Vec::new(), Vec::new()).unwrap();
        Genome::new(vec![chrm], 0).unwrap()
    }

    fn pool_states(manager: &ForkManager) -> (usize, usize, usize) {
        let free = manager.forks().iter().filter(|f| f.is_free()).count();
        let attached = manager.forks().iter().filter(|f| f.is_attached()).count();
        let cooldown = manager.forks().iter().filter(|f| f.in_cooldown()).count();
        (free, attached, cooldown)
    }

    #[test]
    fn an_empty_pool_is_rejected() {
        assert!(matches!(
            ForkManager::new(0, 1),
            Err(ReplisimError::InvalidArgument(_))
        ));
        assert!(matches!(
            ForkManager::new(4, 0),
            Err(ReplisimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn attaching_needs_two_free_forks() {
        let mut genome = bare_genome(1000);
        let mut manager = ForkManager::new(1, 1).unwrap();
        let loc = genome.location_at(0, 500).unwrap();

        assert!(!manager.attach_forks(&mut genome, loc, 1).unwrap());
        assert_eq!(manager.free_count(), 1);
        assert_eq!(genome.chromosome(0).replicated_count(), 0);
    }

    #[test]
    fn pool_accounting_stays_consistent() {
        let mut genome = bare_genome(10_000);
        let mut manager = ForkManager::new(5, 10).unwrap();
        let loc = genome.location_at(0, 5_000).unwrap();

        manager.attach_forks(&mut genome, loc, 1).unwrap();
        let (free, attached, cooldown) = pool_states(&manager);
        assert_eq!(free, manager.free_count());
        assert_eq!(free + attached + cooldown, manager.pool_size());

        for tick in 2..50 {
            manager.advance_attached_forks(&mut genome, tick).unwrap();
            let (free, attached, cooldown) = pool_states(&manager);
            assert_eq!(free, manager.free_count());
            assert_eq!(free + attached + cooldown, manager.pool_size());
        }
    }

    #[test]
    fn cooldown_slots_return_to_the_pool_on_the_next_tick() {
        let mut genome = bare_genome(100);
        let mut manager = ForkManager::new(2, 60).unwrap();
        let loc = genome.location_at(0, 50).unwrap();
        manager.attach_forks(&mut genome, loc, 1).unwrap();

        // Both forks run off an end on their first advance.
        manager.advance_attached_forks(&mut genome, 2).unwrap();
        assert_eq!(manager.free_count(), 0);
        assert_eq!(manager.metrics().detached_normal, 2);

        manager.advance_attached_forks(&mut genome, 3).unwrap();
        assert_eq!(manager.free_count(), 2);
    }

    #[test]
    fn collision_requires_opposing_directions_and_phase_match() {
        let regions = vec![TranscriptionRegion { start: 1000, end: 2600 }];
        let chrm =
            Chromosome::new("chr1", 3000, vec![0.0; 3000], regions, Vec::new()).unwrap();
        let mut genome = Genome::new(vec![chrm], 0).unwrap();
        let mut manager = ForkManager::new(2, 1).unwrap();

        let loc = genome.location_at(0, 1400).unwrap();
        manager.attach_forks(&mut genome, loc, 1).unwrap();

        // Phase mismatch: nothing happens.
        let collisions = manager
            .check_replication_transcription_conflicts(&mut genome, 1401, 1000, false)
            .unwrap();
        assert_eq!(collisions, 0);

        // Phase match at offset 400: only the forward fork opposes the
        // region and collides; its reverse twin is co-directional.
        let collisions = manager
            .check_replication_transcription_conflicts(&mut genome, 1400, 1000, false)
            .unwrap();
        assert_eq!(collisions, 1);
        assert!(manager.forks()[0].in_cooldown());
        assert!(manager.forks()[1].is_attached());
        assert_eq!(manager.metrics().detached_collision, 1);
    }

    #[test]
    fn a_zero_period_is_rejected() {
        let mut genome = bare_genome(100);
        let mut manager = ForkManager::new(2, 1).unwrap();
        assert!(matches!(
            manager.check_replication_transcription_conflicts(&mut genome, 1, 0, false),
            Err(ReplisimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn collisions_boost_the_landscape_when_dormant_support_is_on() {
        let regions = vec![TranscriptionRegion { start: 1000, end: 2600 }];
        let chrm =
            Chromosome::new("chr1", 3000, vec![0.0; 3000], regions, Vec::new()).unwrap();
        let mut genome = Genome::new(vec![chrm], 0).unwrap();
        let mut manager = ForkManager::new(2, 1).unwrap();

        let loc = genome.location_at(0, 1400).unwrap();
        manager.attach_forks(&mut genome, loc, 1).unwrap();
        manager
            .check_replication_transcription_conflicts(&mut genome, 1400, 1000, true)
            .unwrap();

        assert_eq!(genome.chromosome(0).activation_probability(1400).unwrap(), 1.0);
    }
}
