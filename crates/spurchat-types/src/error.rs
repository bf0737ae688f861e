use thiserror::Error;

/// Errors from the session/message store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Errors from the external completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(String),

    #[error("completion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion response contained no candidates")]
    EmptyResponse,

    #[error("failed to parse completion response: {0}")]
    Deserialization(String),
}

/// Errors from loading the relay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable '{0}'")]
    MissingVar(String),

    #[error("invalid value for '{name}': {message}")]
    InvalidVar { name: String, message: String },
}
