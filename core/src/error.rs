//! Error types for loading todos from the remote API.
//!
//! # Design
//! `NotFound` gets a dedicated variant because hosts usually report a missing
//! collection differently from "the server returned an unexpected status."
//! All other non-200 responses land in `HttpError` with the raw status code
//! and body for debugging. `Transport` is produced by whoever executes the
//! request, never by the parser.

use thiserror::Error;

/// Errors produced while fetching or parsing the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than 200 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into remote todos.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}
