use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card code: {0}")]
    InvalidCardCode(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Storage error for {key}: {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type DrillResult<T> = Result<T, DrillError>;
