//! Error types for the todo collection client.
//!
//! # Design
//! `Api` covers every non-2xx response. The collection endpoint reports
//! failures as a JSON body with a `message` field; when present it is
//! extracted into `Api::message` so the controller can surface the server's
//! own wording, otherwise the controller falls back to a generic
//! per-operation message. Serialization/deserialization failures get their
//! own variants and are recovered identically to transport failures.

use std::fmt;

/// Errors returned by `TodoApi` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned a non-2xx status. `message` carries the server's
    /// `{message}` body field when the body parsed as one.
    Api { status: u16, message: Option<String> },

    /// The response body could not be deserialized into the expected shape.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Api { status, message: Some(msg) } => {
                write!(f, "HTTP {status}: {msg}")
            }
            ApiError::Api { status, message: None } => {
                write!(f, "HTTP {status}")
            }
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
