use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrainingError>;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Sample rate must be within 0.0..=1.0, got {0}")]
    InvalidSampleRate(f64),

    #[error("Failed to write training records: {0}")]
    Io(#[from] std::io::Error),
}
