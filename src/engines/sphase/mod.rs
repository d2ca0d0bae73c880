pub mod batch;
pub mod driver;

pub use batch::{run_batch, CellRecord, PhaseTimings};
pub use driver::{SPhase, SPhaseParams};
