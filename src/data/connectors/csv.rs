use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::{
    data::provider::{ChromosomeData, MemoryDataProvider},
    error::{ReplisimError, Result},
    types::{ConstitutiveOrigin, TranscriptionRegion},
};

/// Smallest probability a landscape cell is rescaled to; the maximum score
/// maps to 1.0.
const LANDSCAPE_FLOOR: f64 = 1e-4;

/// Loads a genome dataset from a directory of CSV tables:
///
/// - `chromosomes.csv` with columns `code,length`
/// - `transcription_regions.csv` with `chromosome_code,start,end`
/// - `origins.csv` with `chromosome_code,position`
/// - one `{code}.csv` score file per chromosome with a `score` column
///
/// Region and origin tables may be absent, in which case every chromosome
/// simply carries none.
pub struct CsvGenomeConnector {
    data_dir: PathBuf,
}

impl CsvGenomeConnector {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load(&self) -> Result<MemoryDataProvider> {
        let chromosomes = Self::read_csv(&self.data_dir.join("chromosomes.csv"))?;
        let regions = Self::read_optional_csv(&self.data_dir.join("transcription_regions.csv"))?;
        let origins = Self::read_optional_csv(&self.data_dir.join("origins.csv"))?;

        let codes = chromosomes.column("code")?.str()?.clone();
        let lengths = chromosomes
            .column("length")?
            .cast(&DataType::Int64)?
            .i64()?
            .clone();

        let mut provider = MemoryDataProvider::new();
        for row in 0..chromosomes.height() {
            let code = codes.get(row).ok_or_else(|| {
                ReplisimError::DataLoading(format!("chromosomes.csv row {row} has no code"))
            })?;
            let length = lengths.get(row).ok_or_else(|| {
                ReplisimError::DataLoading(format!("chromosomes.csv row {row} has no length"))
            })?;
            if length <= 0 {
                return Err(ReplisimError::DataLoading(format!(
                    "chromosome '{code}' has non-positive length {length}"
                )));
            }
            let length = length as usize;

            let scores = self.read_scores(code)?;
            provider.insert(
                code,
                ChromosomeData {
                    length,
                    probability_landscape: normalize_scores(&scores, length)?,
                    transcription_regions: Self::regions_for(regions.as_ref(), code)?,
                    constitutive_origins: Self::origins_for(origins.as_ref(), code)?,
                },
            );
        }
        Ok(provider)
    }

    fn read_csv(path: &Path) -> Result<DataFrame> {
        CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| {
                ReplisimError::DataLoading(format!("failed to read {}: {e}", path.display()))
            })
    }

    fn read_optional_csv(path: &Path) -> Result<Option<DataFrame>> {
        if !path.exists() {
            log::warn!("{} not found, continuing without it", path.display());
            return Ok(None);
        }
        Self::read_csv(path).map(Some)
    }

    fn read_scores(&self, code: &str) -> Result<Vec<f64>> {
        let path = self.data_dir.join(format!("{code}.csv"));
        let frame = Self::read_csv(&path)?;
        let scores = frame
            .column("score")?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .collect::<Vec<f64>>();
        if scores.is_empty() {
            return Err(ReplisimError::DataLoading(format!(
                "{} contains no scores",
                path.display()
            )));
        }
        Ok(scores)
    }

    fn regions_for(
        frame: Option<&DataFrame>,
        code: &str,
    ) -> Result<Vec<TranscriptionRegion>> {
        let Some(frame) = frame else {
            return Ok(Vec::new());
        };
        let codes = frame.column("chromosome_code")?.str()?;
        let starts = frame.column("start")?.cast(&DataType::Int64)?.i64()?.clone();
        let ends = frame.column("end")?.cast(&DataType::Int64)?.i64()?.clone();

        let mut regions = Vec::new();
        for row in 0..frame.height() {
            if codes.get(row) != Some(code) {
                continue;
            }
            match (starts.get(row), ends.get(row)) {
                (Some(start), Some(end)) if start >= 0 && end >= 0 => {
                    regions.push(TranscriptionRegion {
                        start: start as usize,
                        end: end as usize,
                    });
                }
                _ => {
                    return Err(ReplisimError::DataLoading(format!(
                        "transcription_regions.csv row {row} is malformed"
                    )))
                }
            }
        }
        Ok(regions)
    }

    fn origins_for(frame: Option<&DataFrame>, code: &str) -> Result<Vec<ConstitutiveOrigin>> {
        let Some(frame) = frame else {
            return Ok(Vec::new());
        };
        let codes = frame.column("chromosome_code")?.str()?;
        let positions = frame
            .column("position")?
            .cast(&DataType::Int64)?
            .i64()?
            .clone();

        let mut origins = Vec::new();
        for row in 0..frame.height() {
            if codes.get(row) != Some(code) {
                continue;
            }
            match positions.get(row) {
                Some(position) if position >= 0 => {
                    origins.push(ConstitutiveOrigin {
                        base: position as usize,
                    });
                }
                _ => {
                    return Err(ReplisimError::DataLoading(format!(
                        "origins.csv row {row} is malformed"
                    )))
                }
            }
        }
        Ok(origins)
    }
}

/// Rescales raw per-window scores into activation probabilities and
/// stretches them stepwise across `length` bases: the maximum score maps to
/// 1.0 and the minimum to the landscape floor.
pub fn normalize_scores(scores: &[f64], length: usize) -> Result<Vec<f64>> {
    if scores.is_empty() {
        return Err(ReplisimError::DataLoading(
            "cannot build a landscape from an empty score list".to_string(),
        ));
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    if !(max - min).is_finite() || max == min {
        return Err(ReplisimError::DataLoading(
            "score list has no dynamic range to rescale".to_string(),
        ));
    }

    let a = (1.0 - LANDSCAPE_FLOOR) / (max - min);
    let b = 1.0 - max * a;
    let step = (length as f64 / scores.len() as f64).ceil().max(1.0) as usize;

    let mut probabilities = vec![0.0; length];
    for (window, score) in scores.iter().enumerate() {
        let probability = (a * score + b).clamp(0.0, 1.0);
        for cell in probabilities
            .iter_mut()
            .skip(window * step)
            .take(step)
        {
            *cell = probability;
        }
    }
    Ok(probabilities)
}
