//! Error types for the notes API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other unexpected responses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! Ordering and partitioning never fail, so nothing in `ordering` returns
//! this type.

use thiserror::Error;

/// Errors returned by `NotesClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested note or todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one (and not 404).
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The speech endpoint answered with something that is not audio.
    #[error("unexpected content type: {0}")]
    UnexpectedContentType(String),
}
