pub mod connectors;
pub mod provider;

pub use connectors::CsvGenomeConnector;
pub use provider::{ChromosomeData, DataProvider, MemoryDataProvider};
