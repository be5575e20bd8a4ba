//! Error types for the realtime channel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Inbound frame was not a JSON `{event, data}` object
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Known event with a payload of the wrong shape
    #[error("invalid payload for '{event}': {message}")]
    InvalidPayload { event: String, message: String },

    /// Socket driver is not keeping up; the frame was not queued
    #[error("outbound queue full, frame dropped")]
    QueueFull,

    /// Socket driver dropped its end of the outbound queue
    #[error("realtime channel closed")]
    Closed,
}
