use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info};
use rayon::prelude::*;

use crate::{
    config::AppConfig,
    data::DataProvider,
    engines::sphase::driver::{SPhase, SPhaseParams},
    error::Result,
    output::CellWriter,
    types::CellSummary,
};

/// Wall-clock spent in each phase of one cell run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTimings {
    pub create: Duration,
    pub simulate: Duration,
    pub save: Duration,
}

/// Outcome of one cell of the batch.
#[derive(Debug, Clone)]
pub struct CellRecord {
    pub summary: CellSummary,
    pub timings: PhaseTimings,
}

/// Runs every cell of the configured batch in parallel. Cells are fully
/// independent: each owns its genome and fork pool and draws from its own
/// RNG seeded with `cell XOR run_seed`, so results do not depend on worker
/// scheduling. A cell that fails setup is logged and dropped from the
/// results; the rest of the batch carries on.
pub fn run_batch(
    config: &AppConfig,
    provider: &dyn DataProvider,
) -> Result<Vec<CellRecord>> {
    config.validate()?;

    let simulation = &config.simulation;
    let params = SPhaseParams {
        origin_range: simulation.constitutive,
        fork_count: simulation.resources,
        speed: simulation.speed,
        timeout: simulation.timeout,
        transcription_period: simulation.period,
        use_dormant: simulation.dormant,
    };
    let writer = CellWriter::new(
        Path::new(&config.output.folder),
        &simulation.name,
        simulation.dormant,
        simulation.resources,
        simulation.period,
        config.output.write_strands,
        config.output.write_summary,
    );

    info!(
        "running {} cells with {} forks at speed {}",
        simulation.cells, simulation.resources, simulation.speed
    );

    let records: Vec<CellRecord> = (0..simulation.cells)
        .into_par_iter()
        .filter_map(|cell| {
            match run_cell(cell, params, config, provider, &writer) {
                Ok(record) => Some(record),
                Err(err) => {
                    error!("cell {cell}: aborted: {err}");
                    None
                }
            }
        })
        .collect();

    log_timing_averages(&records);
    Ok(records)
}

fn run_cell(
    cell: usize,
    params: SPhaseParams,
    config: &AppConfig,
    provider: &dyn DataProvider,
    writer: &CellWriter,
) -> Result<CellRecord> {
    let seed = cell as u64 ^ config.simulation.seed;

    let started = Instant::now();
    let mut sphase = SPhase::new(params, provider, seed)?;
    let create = started.elapsed();

    let started = Instant::now();
    let stats = sphase.simulate(cell)?;
    let simulate = started.elapsed();

    let started = Instant::now();
    let summary = writer.write_cell(
        &config.simulation.name,
        cell,
        params.fork_count,
        params.speed,
        &stats,
        sphase.genome(),
    )?;
    let save = started.elapsed();

    Ok(CellRecord {
        summary,
        timings: PhaseTimings {
            create,
            simulate,
            save,
        },
    })
}

fn log_timing_averages(records: &[CellRecord]) {
    if records.is_empty() {
        return;
    }
    let cells = records.len() as f64;
    let millis = |pick: fn(&PhaseTimings) -> Duration| {
        records
            .iter()
            .map(|r| pick(&r.timings).as_secs_f64() * 1_000.0)
            .sum::<f64>()
            / cells
    };

    info!("average creation time   [ms]: {:.3}", millis(|t| t.create));
    info!("average simulation time [ms]: {:.3}", millis(|t| t.simulate));
    info!("average saving time     [ms]: {:.3}", millis(|t| t.save));
}
