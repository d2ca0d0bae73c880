use crate::{
    error::{ReplisimError, Result},
    types::{ConstitutiveOrigin, ReplicateOutcome, TranscriptionRegion},
};

/// Spread, in bases, of the activation bump applied around a collision site.
const DORMANT_SIGMA: f64 = 10_000.0;

/// Replication state of one chromosome: which base was replicated at which
/// tick, the per-base activation landscape, and the transcription regions
/// and constitutive origins it carries.
pub struct Chromosome {
    code: String,
    length: usize,
    strand: Vec<Option<u32>>,
    activation_landscape: Vec<f64>,
    transcription_regions: Vec<TranscriptionRegion>,
    constitutive_origins: Vec<ConstitutiveOrigin>,
    fired_constitutive_origins: Vec<ConstitutiveOrigin>,
    replicated_count: usize,
    fired_origin_count: usize,
}

impl Chromosome {
    pub fn new(
        code: impl Into<String>,
        length: usize,
        activation_landscape: Vec<f64>,
        transcription_regions: Vec<TranscriptionRegion>,
        constitutive_origins: Vec<ConstitutiveOrigin>,
    ) -> Result<Self> {
        if length == 0 {
            return Err(ReplisimError::InvalidArgument(
                "chromosome length must be positive".to_string(),
            ));
        }
        if activation_landscape.len() != length {
            return Err(ReplisimError::InvalidArgument(format!(
                "activation landscape has {} entries for a chromosome of length {}",
                activation_landscape.len(),
                length
            )));
        }

        Ok(Self {
            code: code.into(),
            length,
            strand: vec![None; length],
            activation_landscape,
            transcription_regions,
            constitutive_origins,
            fired_constitutive_origins: Vec::new(),
            replicated_count: 0,
            fired_origin_count: 0,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn size(&self) -> usize {
        self.length
    }

    /// Replication timeline: `None` is unreplicated, `Some(t)` the tick at
    /// which the base was replicated.
    pub fn strand(&self) -> &[Option<u32>] {
        &self.strand
    }

    pub fn replicated_count(&self) -> usize {
        self.replicated_count
    }

    pub fn fired_origin_count(&self) -> usize {
        self.fired_origin_count
    }

    pub fn transcription_regions(&self) -> &[TranscriptionRegion] {
        &self.transcription_regions
    }

    pub fn constitutive_origins(&self) -> &[ConstitutiveOrigin] {
        &self.constitutive_origins
    }

    pub fn fired_constitutive_origins(&self) -> &[ConstitutiveOrigin] {
        &self.fired_constitutive_origins
    }

    fn check_base(&self, base: usize) -> Result<()> {
        if base >= self.length {
            return Err(ReplisimError::IndexOutOfRange {
                code: self.code.clone(),
                base,
                length: self.length,
            });
        }
        Ok(())
    }

    pub fn is_base_replicated(&self, base: usize) -> Result<bool> {
        self.check_base(base)?;
        Ok(self.strand[base].is_some())
    }

    pub(crate) fn base_replicated_unchecked(&self, base: usize) -> bool {
        self.strand[base].is_some()
    }

    pub fn activation_probability(&self, base: usize) -> Result<f64> {
        self.check_base(base)?;
        Ok(self.activation_landscape[base])
    }

    pub(crate) fn activation_probability_unchecked(&self, base: usize) -> f64 {
        self.activation_landscape[base]
    }

    /// Marks every unreplicated base of the closed interval between `start`
    /// and `end` as replicated at `time`, traversing backward when
    /// `end < start`. Bases already replicated are left untouched. An `end`
    /// outside the chromosome is clipped to the valid range and reported as
    /// `Clipped`; an interval with nothing left to replicate is reported as
    /// `AlreadyReplicated`. A `start` outside the chromosome is a contract
    /// violation.
    pub fn replicate(&mut self, start: usize, end: i64, time: u32) -> Result<ReplicateOutcome> {
        self.check_base(start)?;

        let mut clipped = false;
        let end = if end < 0 {
            clipped = true;
            0
        } else if end as usize >= self.length {
            clipped = true;
            self.length - 1
        } else {
            end as usize
        };

        let (lo, hi) = if end < start { (end, start) } else { (start, end) };
        let mut newly_replicated = 0;
        for cell in &mut self.strand[lo..=hi] {
            if cell.is_none() {
                *cell = Some(time);
                newly_replicated += 1;
            }
        }
        self.replicated_count += newly_replicated;

        if clipped {
            Ok(ReplicateOutcome::Clipped)
        } else if newly_replicated == 0 {
            Ok(ReplicateOutcome::AlreadyReplicated)
        } else {
            Ok(ReplicateOutcome::Normal)
        }
    }

    /// Adds a Gaussian bump centered at `base` to the activation landscape
    /// over a window of two sigmas on each side, clamping every cell to 1.0.
    /// Raises the odds that a dormant origin near a stalled region fires.
    pub fn boost_dormant_activation(&mut self, base: usize) -> Result<()> {
        self.check_base(base)?;

        let window = (2.0 * DORMANT_SIGMA) as usize;
        let lo = base.saturating_sub(window);
        let hi = (base + window).min(self.length);
        for curr in lo..hi {
            let offset = curr as f64 - base as f64;
            let bump = (-(offset * offset) / (2.0 * DORMANT_SIGMA * DORMANT_SIGMA)).exp();
            let cell = &mut self.activation_landscape[curr];
            *cell = (*cell + bump).min(1.0);
        }
        Ok(())
    }

    pub fn is_fully_replicated(&self) -> bool {
        self.replicated_count == self.length
    }

    /// First constitutive origin within `origin_range / 2` bases of `base`
    /// that has not fired yet. Absence is an expected outcome.
    pub fn find_unfired_origin_near(
        &self,
        base: usize,
        origin_range: usize,
    ) -> Option<ConstitutiveOrigin> {
        let half_range = origin_range / 2;
        self.constitutive_origins
            .iter()
            .filter(|origin| !self.fired_constitutive_origins.contains(origin))
            .find(|origin| origin.base.abs_diff(base) <= half_range)
            .copied()
    }

    /// Records `origin` as fired. Returns `Ok(false)` without mutating when
    /// it had already fired; an origin that is not part of this chromosome
    /// is rejected.
    pub fn mark_origin_fired(&mut self, origin: ConstitutiveOrigin) -> Result<bool> {
        if !self.constitutive_origins.contains(&origin) {
            return Err(ReplisimError::InvalidArgument(format!(
                "base {} is not a constitutive origin of chromosome '{}'",
                origin.base, self.code
            )));
        }
        if self.fired_constitutive_origins.contains(&origin) {
            return Ok(false);
        }
        self.fired_constitutive_origins.push(origin);
        Ok(true)
    }

    pub fn unfired_origin_count(&self) -> usize {
        self.constitutive_origins.len() - self.fired_constitutive_origins.len()
    }

    /// Bumps the fired-origin counter feeding the inter-origin metric. The
    /// fork manager calls this once per successfully fired origin pair.
    pub(crate) fn record_fired_origin(&mut self) {
        self.fired_origin_count += 1;
    }
}
