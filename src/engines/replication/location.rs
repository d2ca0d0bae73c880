use rand::Rng;

use crate::{
    engines::replication::Genome,
    error::Result,
    types::{ChromosomeId, ConstitutiveOrigin},
};

/// How a candidate origin site decides whether it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// One uniform draw against the base's activation probability.
    Stochastic,
    /// Fires iff an unfired constitutive origin lies within
    /// `origin_range / 2` bases.
    Constitutive { origin_range: usize },
}

/// A transient reference to a single base of a single chromosome. Locations
/// are produced per query, hold no borrow of the genome, and are only
/// constructible with a base inside the chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomicLocation {
    chromosome: ChromosomeId,
    base: usize,
}

impl GenomicLocation {
    pub(crate) fn new_unchecked(chromosome: ChromosomeId, base: usize) -> Self {
        Self { chromosome, base }
    }

    pub fn chromosome(&self) -> ChromosomeId {
        self.chromosome
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn is_replicated(&self, genome: &Genome) -> bool {
        genome
            .chromosome(self.chromosome)
            .base_replicated_unchecked(self.base)
    }

    /// Decides whether an origin fires at this location under `policy`,
    /// drawing from the genome's RNG in the stochastic case.
    pub fn will_activate(&self, genome: &mut Genome, policy: ActivationPolicy) -> bool {
        match policy {
            ActivationPolicy::Stochastic => {
                let probability = genome
                    .chromosome(self.chromosome)
                    .activation_probability_unchecked(self.base);
                genome.rng_mut().gen::<f64>() < probability
            }
            ActivationPolicy::Constitutive { origin_range } => self
                .find_nearby_unfired_origin(genome, origin_range)
                .is_some(),
        }
    }

    /// First unfired constitutive origin within `origin_range / 2` bases.
    pub fn find_nearby_unfired_origin(
        &self,
        genome: &Genome,
        origin_range: usize,
    ) -> Option<ConstitutiveOrigin> {
        genome
            .chromosome(self.chromosome)
            .find_unfired_origin_near(self.base, origin_range)
    }

    /// Records `origin` as fired on this location's chromosome. `Ok(false)`
    /// when it had already fired.
    pub fn mark_origin_fired(
        &self,
        genome: &mut Genome,
        origin: ConstitutiveOrigin,
    ) -> Result<bool> {
        genome.chromosome_mut(self.chromosome).mark_origin_fired(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::replication::Chromosome;

    fn genome_with_landscape(landscape: Vec<f64>) -> Genome {
        let length = landscape.len();
        let chrm =
            Chromosome::new("chr1", length, landscape, Vec::new(), Vec::new()).unwrap();
        Genome::new(vec![chrm], 99).unwrap()
    }

    #[test]
    fn stochastic_activation_follows_the_landscape() {
        let mut certain = genome_with_landscape(vec![1.0; 50]);
        let loc = certain.location_at(0, 25).unwrap();
        for _ in 0..100 {
            assert!(loc.will_activate(&mut certain, ActivationPolicy::Stochastic));
        }

        let mut never = genome_with_landscape(vec![0.0; 50]);
        let loc = never.location_at(0, 25).unwrap();
        for _ in 0..100 {
            assert!(!loc.will_activate(&mut never, ActivationPolicy::Stochastic));
        }
    }

    #[test]
    fn constitutive_activation_needs_an_unfired_origin_in_range() {
        let origins = vec![ConstitutiveOrigin { base: 40 }];
        let chrm =
            Chromosome::new("chr1", 100, vec![0.0; 100], Vec::new(), origins).unwrap();
        let mut genome = Genome::new(vec![chrm], 0).unwrap();
        let policy = ActivationPolicy::Constitutive { origin_range: 20 };

        let near = genome.location_at(0, 45).unwrap();
        let far = genome.location_at(0, 80).unwrap();
        assert!(near.will_activate(&mut genome, policy));
        assert!(!far.will_activate(&mut genome, policy));

        assert!(near
            .mark_origin_fired(&mut genome, ConstitutiveOrigin { base: 40 })
            .unwrap());
        assert!(!near.will_activate(&mut genome, policy));
    }

    #[test]
    fn replication_status_is_delegated_to_the_chromosome() {
        let mut genome = genome_with_landscape(vec![0.0; 50]);
        let loc = genome.location_at(0, 10).unwrap();

        assert!(!loc.is_replicated(&genome));
        genome.chromosome_mut(0).replicate(10, 10, 1).unwrap();
        assert!(loc.is_replicated(&genome));
    }
}
