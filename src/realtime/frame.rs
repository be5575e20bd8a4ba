//! JSON framing of realtime events.

use super::RealtimeError;
use crate::notes::Note;
use serde::Deserialize;
use serde_json::Value;

/// Inbound: full replacement ordering of notes.
pub const ORDER_UPDATED: &str = "orderUpdated";
/// Inbound: notes changed, re-fetch.
pub const NOTES_UPDATED: &str = "notesUpdated";
/// Outbound: locally reordered collection.
pub const UPDATE_ORDER: &str = "updateOrder";

/// Decoded inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    OrderUpdated(Vec<Note>),
    NotesUpdated,
    /// Any event this client does not react to
    Other(String),
}

#[derive(Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Decode a `{ "event": ..., "data": ... }` text frame.
pub fn decode_frame(text: &str) -> Result<InboundEvent, RealtimeError> {
    let frame: RawFrame =
        serde_json::from_str(text).map_err(|e| RealtimeError::InvalidFrame(e.to_string()))?;

    match frame.event.as_str() {
        ORDER_UPDATED => serde_json::from_value(frame.data)
            .map(InboundEvent::OrderUpdated)
            .map_err(|e| RealtimeError::InvalidPayload {
                event: ORDER_UPDATED.to_string(),
                message: e.to_string(),
            }),
        NOTES_UPDATED => Ok(InboundEvent::NotesUpdated),
        other => Ok(InboundEvent::Other(other.to_string())),
    }
}

/// Encode the outbound reorder frame.
pub fn encode_update_order(notes: &[Note]) -> Result<String, RealtimeError> {
    serde_json::to_string(&serde_json::json!({
        "event": UPDATE_ORDER,
        "data": notes,
    }))
    .map_err(|e| RealtimeError::InvalidPayload {
        event: UPDATE_ORDER.to_string(),
        message: e.to_string(),
    })
}
