use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("A challenge is already in progress")]
    ChallengeInProgress,
    #[error("Invalid redirect pattern: {0}")]
    InvalidPattern(String),
    #[error("Loading indicator error: {0}")]
    IndicatorError(String),
    #[error("Navigable surface error: {0}")]
    SurfaceError(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
