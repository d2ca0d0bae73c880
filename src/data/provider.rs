use std::collections::HashMap;

use crate::{
    error::{ReplisimError, Result},
    types::{ConstitutiveOrigin, TranscriptionRegion},
};

/// Capability interface the simulation core consumes its genome data
/// through. Implementors are read-only snapshots: every accessor may be
/// called concurrently from parallel cell simulations.
pub trait DataProvider: Send + Sync {
    /// Chromosome identifiers, in genome order.
    fn codes(&self) -> Vec<String>;
    fn length(&self, code: &str) -> Result<usize>;
    /// Per-base activation probabilities, `length(code)` entries in [0, 1].
    fn probability_landscape(&self, code: &str) -> Result<Vec<f64>>;
    fn transcription_regions(&self, code: &str) -> Result<Vec<TranscriptionRegion>>;
    fn constitutive_origins(&self, code: &str) -> Result<Vec<ConstitutiveOrigin>>;
}

/// Everything a provider knows about one chromosome.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeData {
    pub length: usize,
    pub probability_landscape: Vec<f64>,
    pub transcription_regions: Vec<TranscriptionRegion>,
    pub constitutive_origins: Vec<ConstitutiveOrigin>,
}

/// In-memory provider. Loaders assemble one of these; tests build them
/// directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataProvider {
    codes: Vec<String>,
    chromosomes: HashMap<String, ChromosomeData>,
}

impl MemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a chromosome, keeping insertion order for `codes()`.
    pub fn insert(&mut self, code: impl Into<String>, data: ChromosomeData) {
        let code = code.into();
        if !self.chromosomes.contains_key(&code) {
            self.codes.push(code.clone());
        }
        self.chromosomes.insert(code, data);
    }

    fn entry(&self, code: &str) -> Result<&ChromosomeData> {
        self.chromosomes.get(code).ok_or_else(|| {
            ReplisimError::DataLoading(format!("unknown chromosome code '{code}'"))
        })
    }
}

impl DataProvider for MemoryDataProvider {
    fn codes(&self) -> Vec<String> {
        self.codes.clone()
    }

    fn length(&self, code: &str) -> Result<usize> {
        Ok(self.entry(code)?.length)
    }

    fn probability_landscape(&self, code: &str) -> Result<Vec<f64>> {
        Ok(self.entry(code)?.probability_landscape.clone())
    }

    fn transcription_regions(&self, code: &str) -> Result<Vec<TranscriptionRegion>> {
        Ok(self.entry(code)?.transcription_regions.clone())
    }

    fn constitutive_origins(&self, code: &str) -> Result<Vec<ConstitutiveOrigin>> {
        Ok(self.entry(code)?.constitutive_origins.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_insertion_order() {
        let mut provider = MemoryDataProvider::new();
        provider.insert("chr2", ChromosomeData { length: 10, ..Default::default() });
        provider.insert("chr1", ChromosomeData { length: 20, ..Default::default() });

        assert_eq!(provider.codes(), vec!["chr2".to_string(), "chr1".to_string()]);
        assert_eq!(provider.length("chr2").unwrap(), 10);
        assert_eq!(provider.length("chr1").unwrap(), 20);
    }

    #[test]
    fn unknown_codes_are_a_loading_error() {
        let provider = MemoryDataProvider::new();
        assert!(matches!(
            provider.length("chrX"),
            Err(ReplisimError::DataLoading(_))
        ));
    }

    #[test]
    fn reinserting_a_code_replaces_its_data() {
        let mut provider = MemoryDataProvider::new();
        provider.insert("chr1", ChromosomeData { length: 10, ..Default::default() });
        provider.insert("chr1", ChromosomeData { length: 30, ..Default::default() });

        assert_eq!(provider.codes().len(), 1);
        assert_eq!(provider.length("chr1").unwrap(), 30);
    }
}
