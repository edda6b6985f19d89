use thiserror::Error;

/// Failures reported by a ledger backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt ledger snapshot: {0}")]
    Corrupt(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Donation {0} not found")]
    NotFound(String),

    #[error("Failed to read donation {key}: {source}")]
    BackendRead {
        key: String,
        #[source]
        source: BackendError,
    },

    #[error("Failed to write donation {key}: {source}")]
    BackendWrite {
        key: String,
        #[source]
        source: BackendError,
    },

    #[error("Failed to scan ledger: {0}")]
    BackendScan(#[source] BackendError),

    #[error("Failed to serialize donation {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize donation at key {key}: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open ledger: {0}")]
    Open(#[source] BackendError),

    #[error("Failed to render output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
