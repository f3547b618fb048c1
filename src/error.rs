use thiserror::Error;

/// Failures surfaced by the network engine.
///
/// The variants are kept distinct so that a caller can tell bad client input
/// (`InvalidInput`) apart from problems on the serving side.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid input: expected {expected} values, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("numeric corruption: {0}")]
    NumericCorruption(String),

    #[error("weight storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("weight file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

impl EngineError {
    /// True when the failure was caused by the caller's input rather than by
    /// the engine or its storage.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
