//! Error types for dialect dispatch

/// Errors surfaced by the registry and the crate-level functions.
///
/// Malformed input is not an error: parsers return an empty forest and report problems as
/// warnings. Errors are reserved for requests the engine cannot serve at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BabelError {
    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("{0}")]
    NotSupported(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BabelError {
    fn from(err: serde_json::Error) -> Self {
        BabelError::Serialization(err.to_string())
    }
}
