use replisim::config::AppConfig;
use replisim::data::{ChromosomeData, MemoryDataProvider};
use replisim::engines::sphase::{run_batch, SPhase, SPhaseParams};
use replisim::output::encode_strand;
use replisim::types::{ConstitutiveOrigin, TerminationReason, TranscriptionRegion};

fn fixture_provider() -> MemoryDataProvider {
    let mut provider = MemoryDataProvider::new();
    provider.insert(
        "chrA",
        ChromosomeData {
            length: 2_000,
            probability_landscape: vec![0.008; 2_000],
            transcription_regions: vec![
                TranscriptionRegion { start: 200, end: 900 },
                TranscriptionRegion { start: 1_700, end: 1_100 },
            ],
            constitutive_origins: vec![
                ConstitutiveOrigin { base: 500 },
                ConstitutiveOrigin { base: 1_500 },
            ],
        },
    );
    provider.insert(
        "chrB",
        ChromosomeData {
            length: 1_000,
            probability_landscape: vec![0.008; 1_000],
            transcription_regions: Vec::new(),
            constitutive_origins: vec![ConstitutiveOrigin { base: 400 }],
        },
    );
    provider
}

fn fixture_params() -> SPhaseParams {
    SPhaseParams {
        origin_range: 0,
        fork_count: 6,
        speed: 3,
        timeout: 200_000,
        transcription_period: 75,
        use_dormant: true,
    }
}

fn run_fixture(seed: u64) -> (replisim::types::SimulationStats, Vec<String>) {
    let provider = fixture_provider();
    let mut sphase = SPhase::new(fixture_params(), &provider, seed).unwrap();
    let stats = sphase.simulate(0).unwrap();
    let strands = sphase
        .genome()
        .chromosomes()
        .iter()
        .map(|chromosome| encode_strand(chromosome.strand()))
        .collect();
    (stats, strands)
}

#[test]
fn a_stochastic_run_terminates_and_reproduces_exactly() {
    let (stats, strands) = run_fixture(1234);

    assert_eq!(stats.termination, TerminationReason::Complete);
    assert!(stats.termination_tick > 0);
    assert!(stats.average_interorigin_distance > 0.0);

    // Same seed, same fixture: identical tick counts, collision counts and
    // serialized strands.
    let (repeat_stats, repeat_strands) = run_fixture(1234);
    assert_eq!(stats, repeat_stats);
    assert_eq!(strands, repeat_strands);
}

#[test]
fn different_seeds_diverge() {
    let (_, first) = run_fixture(1);
    let (_, second) = run_fixture(2);
    assert_ne!(first, second);
}

#[test]
fn a_constitutive_run_fires_only_listed_origins() {
    let provider = fixture_provider();
    let mut params = fixture_params();
    params.origin_range = 300;
    params.transcription_period = 0;

    let mut sphase = SPhase::new(params, &provider, 99).unwrap();
    let stats = sphase.simulate(0).unwrap();

    // All three origins are reachable, so every one of them fires and the
    // genome finishes.
    assert_eq!(stats.termination, TerminationReason::Complete);
    assert_eq!(stats.unfired_constitutive_origins, 0);
    let fired: usize = sphase
        .genome()
        .chromosomes()
        .iter()
        .map(|c| c.fired_constitutive_origins().len())
        .sum();
    assert_eq!(fired, 3);
}

#[test]
fn batch_cells_are_reproducible_and_independent() {
    let provider = fixture_provider();
    let scratch = std::env::temp_dir().join(format!("replisim_batch_{}", std::process::id()));

    let mut config = AppConfig::default();
    config.simulation.cells = 3;
    config.simulation.resources = 6;
    config.simulation.speed = 3;
    config.simulation.period = 75;
    config.simulation.dormant = true;
    config.simulation.seed = 7;
    config.simulation.name = "fixture".to_string();
    config.output.folder = scratch.to_string_lossy().into_owned();

    let mut first = run_batch(&config, &provider).unwrap();
    let mut second = run_batch(&config, &provider).unwrap();
    first.sort_by_key(|record| record.summary.cell);
    second.sort_by_key(|record| record.summary.cell);

    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.summary.cell, b.summary.cell);
        assert_eq!(a.summary.termination_tick, b.summary.termination_tick);
        assert_eq!(a.summary.collisions, b.summary.collisions);
        assert_eq!(
            a.summary.average_interorigin_distance,
            b.summary.average_interorigin_distance
        );
    }

    let run_dir = scratch.join("fixture_true_6_75");
    for cell in 0..3 {
        let cell_dir = run_dir.join(format!("fixture_simulation_{cell}"));
        assert!(cell_dir.join("cell.txt").exists());
        assert!(cell_dir.join("chrA.cseq").exists());
        assert!(cell_dir.join("chrB.cseq").exists());
        assert!(cell_dir.join("summary.json").exists());
    }

    std::fs::remove_dir_all(&scratch).unwrap();
}

#[test]
fn an_unreachable_chromosome_deadlocks_a_constitutive_run() {
    let mut provider = MemoryDataProvider::new();
    provider.insert(
        "reachable",
        ChromosomeData {
            length: 3_000,
            probability_landscape: vec![0.0; 3_000],
            transcription_regions: Vec::new(),
            constitutive_origins: vec![ConstitutiveOrigin { base: 1_500 }],
        },
    );
    provider.insert(
        "stranded",
        ChromosomeData {
            length: 3_000,
            probability_landscape: vec![0.0; 3_000],
            transcription_regions: Vec::new(),
            constitutive_origins: Vec::new(),
        },
    );

    let mut params = fixture_params();
    params.origin_range = 300;
    params.transcription_period = 0;

    let mut sphase = SPhase::new(params, &provider, 11).unwrap();
    let stats = sphase.simulate(0).unwrap();

    assert_eq!(stats.termination, TerminationReason::Deadlock);
    assert!(!sphase.genome().is_fully_replicated());
}
