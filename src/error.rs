use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplisimError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Base {base} is outside chromosome '{code}' (length {length})")]
    IndexOutOfRange {
        code: String,
        base: usize,
        length: usize,
    },

    #[error("Illegal fork state: {0}")]
    IllegalState(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReplisimError>;
