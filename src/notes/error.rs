//! Error types for the notes API.

use crate::dispatch::DispatchError;
use thiserror::Error;

/// Errors returned by [`NotesClient`](super::NotesClient) operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// No endpoint could serve the request
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Request payload could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response payload did not match the expected shape
    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
}
