//! Error types for the Posture Perfect rep counter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid landmark frame: expected {expected} values, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Landmark source error: {0}")]
    Source(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
