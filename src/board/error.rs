//! Error types for board actions.

use crate::notes::NotesError;
use crate::realtime::RealtimeError;
use thiserror::Error;

/// Errors surfaced to the user by board actions.
#[derive(Debug, Error)]
pub enum BoardError {
    /// No endpoint could complete the action; nothing was changed locally
    #[error("could not {action} note: no endpoint reachable")]
    Unavailable {
        action: &'static str,
        #[source]
        source: NotesError,
    },

    #[error("cannot move note from {from} to {to}: board has {len} notes")]
    InvalidMove { from: usize, to: usize, len: usize },

    #[error(transparent)]
    Realtime(#[from] RealtimeError),
}
