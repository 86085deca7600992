use thiserror::Error;

#[derive(Error, Debug)]
pub enum FraudError {
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Oracle call timed out after {timeout_ms}ms")]
    OracleTimeout { timeout_ms: u64 },

    #[error("Oracle response could not be parsed: {0}")]
    OracleResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FraudResult<T> = Result<T, FraudError>;
