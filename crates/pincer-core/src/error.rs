use thiserror::Error;

#[derive(Debug, Error)]
pub enum PincerError {
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("population error: {0}")]
    Population(String),

    #[error("batch error: {0}")]
    Batch(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PincerResult<T> = Result<T, PincerError>;
