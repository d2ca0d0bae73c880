pub mod chromosome;
pub mod genome;
pub mod location;

pub use chromosome::Chromosome;
pub use genome::Genome;
pub use location::{ActivationPolicy, GenomicLocation};
