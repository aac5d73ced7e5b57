//! Recognition error types shared by every backend.

use thiserror::Error;

/// Errors that can occur while building, deploying or querying an
/// intent recognition backend.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{kind} '{name}' is already registered")]
    DuplicateDefinition { kind: &'static str, name: String },

    #[error("unsupported entity kind: {0}")]
    UnsupportedEntityKind(String),

    #[error("state '{0}' has no outgoing intents")]
    EmptyState(String),

    #[error("unresolved {kind} reference '{name}' in '{owner}'")]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        owner: String,
    },

    #[error("invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("remote operation failed: {0}")]
    RemoteOperation(String),

    #[error("prediction failed: {0}")]
    Prediction(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("no recognition context registered for state '{0}'")]
    UnknownContext(String),

    #[error("the recognition engine has not been trained")]
    NotTrained,

    #[error("the bot model is frozen once training has started")]
    ModelFrozen,

    #[error("the recognition provider is shut down")]
    Shutdown,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for recognition results.
pub type RecognitionResult<T> = Result<T, RecognitionError>;
