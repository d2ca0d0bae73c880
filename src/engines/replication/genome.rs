use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::{
    engines::replication::{Chromosome, GenomicLocation},
    error::{ReplisimError, Result},
    types::ChromosomeId,
};

/// The chromosome arena of one simulated cell, together with the cell's
/// private RNG and the length-weighted chromosome distribution used for
/// genome-wide uniform base sampling.
pub struct Genome {
    chromosomes: Vec<Chromosome>,
    chromosome_picker: WeightedIndex<usize>,
    rng: StdRng,
}

impl Genome {
    /// Builds a genome over `chromosomes`, seeding the simulation's RNG from
    /// `seed`. The weighted distribution is built once here and never
    /// rebuilt; chromosome lengths are immutable.
    pub fn new(chromosomes: Vec<Chromosome>, seed: u64) -> Result<Self> {
        if chromosomes.is_empty() {
            return Err(ReplisimError::InvalidArgument(
                "a genome needs at least one chromosome".to_string(),
            ));
        }
        let chromosome_picker = WeightedIndex::new(chromosomes.iter().map(Chromosome::size))
            .map_err(|e| {
                ReplisimError::InvalidArgument(format!("bad chromosome length weights: {e}"))
            })?;

        Ok(Self {
            chromosomes,
            chromosome_picker,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Total number of bases across all chromosomes.
    pub fn size(&self) -> usize {
        self.chromosomes.iter().map(Chromosome::size).sum()
    }

    pub fn chromosome_count(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosome(&self, id: ChromosomeId) -> &Chromosome {
        &self.chromosomes[id]
    }

    pub fn chromosome_mut(&mut self, id: ChromosomeId) -> &mut Chromosome {
        &mut self.chromosomes[id]
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A validated location handle for an explicit chromosome and base.
    pub fn location_at(&self, chromosome: ChromosomeId, base: usize) -> Result<GenomicLocation> {
        let chrm = self.chromosomes.get(chromosome).ok_or_else(|| {
            ReplisimError::InvalidArgument(format!("no chromosome with index {chromosome}"))
        })?;
        if base >= chrm.size() {
            return Err(ReplisimError::IndexOutOfRange {
                code: chrm.code().to_string(),
                base,
                length: chrm.size(),
            });
        }
        Ok(GenomicLocation::new_unchecked(chromosome, base))
    }

    /// Picks a chromosome with probability proportional to its length, then
    /// a uniform base within it, which is uniform over the whole genome.
    pub fn sample_random_location(&mut self) -> GenomicLocation {
        let chromosome = self.chromosome_picker.sample(&mut self.rng);
        let base = self.rng.gen_range(0..self.chromosomes[chromosome].size());
        GenomicLocation::new_unchecked(chromosome, base)
    }

    /// As `sample_random_location`, resampling until an unreplicated base
    /// turns up. `None` when the genome has no unreplicated bases left.
    pub fn sample_random_unreplicated_location(&mut self) -> Option<GenomicLocation> {
        if self.is_fully_replicated() {
            return None;
        }
        let chromosome = loop {
            let candidate = self.chromosome_picker.sample(&mut self.rng);
            if !self.chromosomes[candidate].is_fully_replicated() {
                break candidate;
            }
        };
        let base = loop {
            let candidate = self.rng.gen_range(0..self.chromosomes[chromosome].size());
            if !self.chromosomes[chromosome].base_replicated_unchecked(candidate) {
                break candidate;
            }
        };
        Some(GenomicLocation::new_unchecked(chromosome, base))
    }

    pub fn is_fully_replicated(&self) -> bool {
        self.chromosomes.iter().all(Chromosome::is_fully_replicated)
    }

    /// Genome size over the number of inter-origin spaces. Every chromosome
    /// contributes one space even before any of its origins fire.
    pub fn average_interorigin_distance(&self) -> f64 {
        let spaces: usize = self
            .chromosomes
            .iter()
            .map(|c| c.fired_origin_count() + 1)
            .sum();
        if spaces == 0 {
            return 0.0;
        }
        self.size() as f64 / spaces as f64
    }

    pub fn total_constitutive_origins(&self) -> usize {
        self.chromosomes
            .iter()
            .map(|c| c.constitutive_origins().len())
            .sum()
    }

    pub fn unfired_constitutive_origins(&self) -> usize {
        self.chromosomes
            .iter()
            .map(Chromosome::unfired_origin_count)
            .sum()
    }
}
