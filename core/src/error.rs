//! Error types for the vegetable API client.
//!
//! # Design
//! `ValidationError` is raised before anything touches the network, so a
//! caller can treat it as an input bug. Everything that went wrong on the way
//! to or from the remote lands in `RequestFailed`, carrying the remote's error
//! body when there was one and the transport's message when there was not.
//! Nothing here is retried; the caller owns that policy.

use std::fmt;

/// Why a request did not produce a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The server answered with a non-2xx status. `payload` is the parsed
    /// JSON error body, or the raw text as a JSON string if it was not JSON.
    Remote {
        status: u16,
        payload: serde_json::Value,
    },

    /// The transport could not complete the round-trip.
    Transport(String),
}

/// Errors returned by `VegetableClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// A required argument was missing. No request was sent.
    ValidationError(String),

    /// The request was sent but did not succeed.
    RequestFailed(Failure),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON, e.g. a price
    /// that is infinite or NaN.
    SerializationError(String),
}

impl ApiError {
    pub(crate) fn validation(message: &str) -> Self {
        ApiError::ValidationError(message.to_string())
    }

    /// Status code of a remote failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed(Failure::Remote { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Structured error body returned by the server, if any.
    pub fn remote_payload(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::RequestFailed(Failure::Remote { payload, .. }) => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Remote { status, payload } => write!(f, "HTTP {status}: {payload}"),
            Failure::Transport(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "invalid input: {msg}"),
            ApiError::RequestFailed(failure) => write!(f, "request failed: {failure}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
