use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{
    engines::replication::Genome,
    error::Result,
    output::strand::encode_strand,
    types::{CellSummary, SimulationStats},
};

/// Writes one simulated cell's artifacts: a `cell.txt` metadata line, one
/// `{code}.cseq` strand file per chromosome, and a JSON summary record.
pub struct CellWriter {
    run_dir: PathBuf,
    write_strands: bool,
    write_summary: bool,
}

impl CellWriter {
    /// `{output}/{name}_{dormant}_{forks}_{period}` groups every cell run
    /// with one parameter combination.
    pub fn new(
        output: &Path,
        name: &str,
        use_dormant: bool,
        fork_count: usize,
        period: u32,
        write_strands: bool,
        write_summary: bool,
    ) -> Self {
        let run_dir = output.join(format!("{name}_{use_dormant}_{fork_count}_{period}"));
        Self {
            run_dir,
            write_strands,
            write_summary,
        }
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn write_cell(
        &self,
        name: &str,
        cell: usize,
        fork_count: usize,
        speed: usize,
        stats: &SimulationStats,
        genome: &Genome,
    ) -> Result<CellSummary> {
        let cell_dir = self.run_dir.join(format!("{name}_simulation_{cell}"));
        fs::create_dir_all(&cell_dir)?;

        let metadata = format!(
            "{}\t{}\t{}\t{}\t\n",
            fork_count, speed, stats.termination_tick, stats.average_interorigin_distance
        );
        fs::write(cell_dir.join("cell.txt"), metadata)?;

        if self.write_strands {
            for chromosome in genome.chromosomes() {
                fs::write(
                    cell_dir.join(format!("{}.cseq", chromosome.code())),
                    encode_strand(chromosome.strand()),
                )?;
            }
        }

        let summary = CellSummary {
            cell,
            fork_count,
            speed,
            termination_tick: stats.termination_tick,
            termination: stats.termination,
            average_interorigin_distance: stats.average_interorigin_distance,
            collisions: stats.collisions,
            finished_at: Utc::now(),
        };
        if self.write_summary {
            let file = fs::File::create(cell_dir.join("summary.json"))?;
            serde_json::to_writer_pretty(file, &summary)?;
        }
        Ok(summary)
    }
}
