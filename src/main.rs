use std::path::Path;

use anyhow::Context;
use log::info;

use replisim::config::ConfigManager;
use replisim::data::CsvGenomeConnector;
use replisim::engines::sphase::run_batch;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1);
    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref().map(Path::new))
        .context("loading configuration")?;
    let config = manager.get();

    let dataset_dir = Path::new(&config.data.data_dir).join(&config.data.organism);
    let provider = CsvGenomeConnector::new(&dataset_dir)
        .load()
        .with_context(|| format!("loading genome data from {}", dataset_dir.display()))?;

    let records = run_batch(&config, &provider).context("running the simulation batch")?;
    info!(
        "finished {} of {} cells",
        records.len(),
        config.simulation.cells
    );

    Ok(())
}
