use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalog entries found in {0}")]
    NoEntries(String),

    #[error("nothing to write: record list is empty")]
    EmptyOutput,

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    BadDelimiter(String),

    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
