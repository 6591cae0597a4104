//! Error taxonomy for pwalink.
//!
//! One enum covers the whole pipeline so callers can match on the failure
//! class without digging through source chains:
//! - `InvalidArgument`: the caller or a response violated a required invariant
//! - `Protocol`: a trusted endpoint answered without an expected field
//! - `MalformedResponse`: a response body could not be parsed at all
//! - `Transport`: opaque HTTP-layer failure, passed through unretried

use thiserror::Error;

/// Result alias used across pwalink crates.
pub type PwalinkResult<T> = Result<T, PwalinkError>;

#[derive(Debug, Error)]
pub enum PwalinkError {
    /// The caller supplied an invalid value, or a response yielded a value
    /// that violates a required entity invariant.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A trusted endpoint's response is missing an expected protocol field.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A response body is not well-formed, or a structured field inside it
    /// cannot be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Failure in the HTTP layer, including non-success statuses.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PwalinkError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Wrap an error from the HTTP layer without losing its source chain.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Transport failure described by a message only (e.g. a status line).
    pub fn transport_message(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            source: None,
        }
    }
}
