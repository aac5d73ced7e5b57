//! NLUServer client error types.

use thiserror::Error;

/// Errors raised while talking to an NLUServer instance.
#[derive(Debug, Error)]
pub enum NluServerError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NLUServer returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("client is shut down")]
    Shutdown,
}

impl NluServerError {
    /// The request never reached the server, so sending it again is harmless.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Connection failures and timeouts are worth retrying; HTTP errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// Convenience alias for NLUServer results.
pub type NluServerResult<T> = Result<T, NluServerError>;
