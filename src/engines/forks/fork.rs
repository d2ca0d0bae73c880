use crate::{
    engines::replication::{Genome, GenomicLocation},
    error::{ReplisimError, Result},
    types::{ChromosomeId, ForkDirection, ReplicateOutcome},
};

/// Position of a fork in its lifecycle. A problem detach (collision or
/// boundary runoff) passes through `Cooldown` for one tick so the slot
/// cannot immediately reattach at the same site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkState {
    Free,
    Attached {
        chromosome: ChromosomeId,
        base: usize,
        direction: ForkDirection,
    },
    Cooldown,
}

/// A mobile replication unit. While attached it moves `speed` bases per
/// tick along its direction, replicating everything it passes.
pub struct ReplicationFork {
    speed: usize,
    state: ForkState,
}

impl ReplicationFork {
    pub fn new(speed: usize) -> Self {
        Self {
            speed,
            state: ForkState::Free,
        }
    }

    pub fn speed(&self) -> usize {
        self.speed
    }

    pub fn state(&self) -> ForkState {
        self.state
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, ForkState::Free)
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, ForkState::Attached { .. })
    }

    pub fn in_cooldown(&self) -> bool {
        matches!(self.state, ForkState::Cooldown)
    }

    pub fn base(&self) -> Option<usize> {
        match self.state {
            ForkState::Attached { base, .. } => Some(base),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<ForkDirection> {
        match self.state {
            ForkState::Attached { direction, .. } => Some(direction),
            _ => None,
        }
    }

    pub fn chromosome(&self) -> Option<ChromosomeId> {
        match self.state {
            ForkState::Attached { chromosome, .. } => Some(chromosome),
            _ => None,
        }
    }

    /// Binds the fork to `location` and replicates the origin base itself
    /// at `time`, so the origin counts as replicated at the moment of
    /// firing. Only a free fork may attach.
    pub fn attach(
        &mut self,
        genome: &mut Genome,
        location: GenomicLocation,
        direction: ForkDirection,
        time: u32,
    ) -> Result<()> {
        match self.state {
            ForkState::Free => {}
            ForkState::Attached { .. } => {
                return Err(ReplisimError::IllegalState(
                    "cannot attach a fork that is already attached".to_string(),
                ))
            }
            ForkState::Cooldown => {
                return Err(ReplisimError::IllegalState(
                    "cannot attach a fork during its cooldown tick".to_string(),
                ))
            }
        }

        let chromosome = location.chromosome();
        let base = location.base();
        genome
            .chromosome_mut(chromosome)
            .replicate(base, base as i64, time)?;
        self.state = ForkState::Attached {
            chromosome,
            base,
            direction,
        };
        Ok(())
    }

    /// Moves the fork `speed` bases along its direction, replicating as it
    /// goes. A non-normal outcome (the step ran off the chromosome, or
    /// landed entirely in already-replicated territory) sends the fork into
    /// cooldown; the outcome is returned either way.
    pub fn advance(&mut self, genome: &mut Genome, time: u32) -> Result<ReplicateOutcome> {
        let (chromosome, base, direction) = match self.state {
            ForkState::Attached {
                chromosome,
                base,
                direction,
            } => (chromosome, base, direction),
            _ => {
                return Err(ReplisimError::IllegalState(
                    "cannot advance a fork that is not attached".to_string(),
                ))
            }
        };

        let end = base as i64 + self.speed as i64 * direction.step();
        let outcome = genome.chromosome_mut(chromosome).replicate(base, end, time)?;
        if outcome.is_normal() {
            // A normal outcome means `end` stayed inside the strand.
            self.state = ForkState::Attached {
                chromosome,
                base: end as usize,
                direction,
            };
        } else {
            self.detach(true);
        }
        Ok(outcome)
    }

    /// `is_problem` sends the fork into its one-tick cooldown quarantine;
    /// otherwise it returns directly to the free pool.
    pub fn detach(&mut self, is_problem: bool) {
        self.state = if is_problem {
            ForkState::Cooldown
        } else {
            ForkState::Free
        };
    }

    /// Ends the cooldown quarantine. Only the fork manager's per-tick pass
    /// calls this, which bounds the quarantine to exactly one tick.
    pub(crate) fn clear_cooldown(&mut self) -> bool {
        if self.in_cooldown() {
            self.state = ForkState::Free;
            true
        } else {
            false
        }
    }
}
