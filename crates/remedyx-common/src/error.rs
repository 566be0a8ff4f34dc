use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemedyxError {
    #[error("gene universe is empty: no genes found in PPI or association inputs")]
    EmptyUniverse,

    #[error("matrix index {index} out of range for universe of {len} genes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RemedyxError>;
