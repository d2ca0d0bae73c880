use serde::{Deserialize, Serialize};

/// Index of a chromosome inside its genome's arena.
pub type ChromosomeId = usize;

/// Direction of travel along a chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForkDirection {
    Forward,
    Reverse,
}

impl ForkDirection {
    /// Signed step, +1 or -1.
    pub fn step(self) -> i64 {
        match self {
            ForkDirection::Forward => 1,
            ForkDirection::Reverse => -1,
        }
    }

    pub fn opposes(self, other: ForkDirection) -> bool {
        self != other
    }
}

/// A transcribed interval of a chromosome. A region annotated with
/// `start < end` is transcribed in the `Reverse` direction, one with
/// `start > end` in the `Forward` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRegion {
    pub start: usize,
    pub end: usize,
}

impl TranscriptionRegion {
    /// Direction the transcribing polymerase moves in.
    pub fn rnap_direction(&self) -> ForkDirection {
        if self.start < self.end {
            ForkDirection::Reverse
        } else {
            ForkDirection::Forward
        }
    }

    /// Offset of `base` from the region's `start` coordinate, or `None`
    /// when the base lies outside the region.
    pub fn offset_of(&self, base: usize) -> Option<usize> {
        if self.start <= self.end {
            if base < self.start || base > self.end {
                return None;
            }
            Some(base - self.start)
        } else {
            if base > self.start || base < self.end {
                return None;
            }
            Some(self.start - base)
        }
    }
}

/// A fixed candidate origin site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstitutiveOrigin {
    pub base: usize,
}

/// Result of one replication call over a base interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicateOutcome {
    /// The interval was fully in bounds and at least one new base was marked.
    Normal,
    /// The requested interval ran past a chromosome boundary and was clipped.
    Clipped,
    /// Every base of the requested interval was already replicated.
    AlreadyReplicated,
}

impl ReplicateOutcome {
    pub fn is_normal(self) -> bool {
        matches!(self, ReplicateOutcome::Normal)
    }
}

/// Why a simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Every base of every chromosome was replicated.
    Complete,
    /// The tick budget ran out first.
    Timeout,
    /// No unfired constitutive origin remained and the whole pool sat free.
    Deadlock,
}

/// Statistics of one finished cell simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub termination_tick: u32,
    pub termination: TerminationReason,
    pub collisions: u64,
    pub average_interorigin_distance: f64,
    pub unfired_constitutive_origins: usize,
}

/// Per-cell summary record written next to the strand files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellSummary {
    pub cell: usize,
    pub fork_count: usize,
    pub speed: usize,
    pub termination_tick: u32,
    pub termination: TerminationReason,
    pub average_interorigin_distance: f64,
    pub collisions: u64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_orientation_follows_coordinate_order() {
        let ascending = TranscriptionRegion { start: 100, end: 500 };
        let descending = TranscriptionRegion { start: 500, end: 100 };

        assert_eq!(ascending.rnap_direction(), ForkDirection::Reverse);
        assert_eq!(descending.rnap_direction(), ForkDirection::Forward);
    }

    #[test]
    fn region_offsets_are_measured_from_start() {
        let ascending = TranscriptionRegion { start: 100, end: 500 };
        assert_eq!(ascending.offset_of(100), Some(0));
        assert_eq!(ascending.offset_of(350), Some(250));
        assert_eq!(ascending.offset_of(500), Some(400));
        assert_eq!(ascending.offset_of(99), None);
        assert_eq!(ascending.offset_of(501), None);

        let descending = TranscriptionRegion { start: 500, end: 100 };
        assert_eq!(descending.offset_of(500), Some(0));
        assert_eq!(descending.offset_of(350), Some(150));
        assert_eq!(descending.offset_of(100), Some(400));
        assert_eq!(descending.offset_of(501), None);
    }

    #[test]
    fn opposing_directions() {
        assert!(ForkDirection::Forward.opposes(ForkDirection::Reverse));
        assert!(!ForkDirection::Forward.opposes(ForkDirection::Forward));
    }
}
