pub mod csv;

pub use csv::CsvGenomeConnector;
