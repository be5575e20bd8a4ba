//! Realtime note events.
//!
//! The push connection itself (socket transport, reconnects) is driven
//! externally. This module decodes the frames it delivers, fans them out to
//! subscribers through [`NoteEventHub`], and queues outbound reorder frames.

mod error;
mod frame;

pub use error::*;
pub use frame::*;

use crate::notes::Note;
use crate::registry::Endpoint;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Per-stream buffer; slow subscribers skip ahead past lagged events.
const EVENT_BUFFER: usize = 64;

/// Outbound frames waiting for the socket driver.
pub const OUTBOUND_BUFFER: usize = 32;

/// Marker delivered on the change-signal stream: notes changed, re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotesChanged;

/// Fan-out point for the two inbound notification streams.
pub struct NoteEventHub {
    order_tx: broadcast::Sender<Vec<Note>>,
    change_tx: broadcast::Sender<NotesChanged>,
}

impl NoteEventHub {
    pub fn new() -> Self {
        let (order_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (change_tx, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            order_tx,
            change_tx,
        }
    }

    /// Subscribe to full-state replacement orderings.
    pub fn subscribe_order_updates(&self) -> Subscription<Vec<Note>> {
        Subscription::new("order_updates", self.order_tx.subscribe())
    }

    /// Subscribe to "notes changed" signals.
    pub fn subscribe_change_signals(&self) -> Subscription<NotesChanged> {
        Subscription::new("change_signals", self.change_tx.subscribe())
    }

    /// Deliver a replacement ordering; returns how many subscribers got it.
    pub fn publish_order(&self, notes: Vec<Note>) -> usize {
        // Sending with no subscribers is not an error for us
        self.order_tx.send(notes).unwrap_or(0)
    }

    pub fn publish_change(&self) -> usize {
        self.change_tx.send(NotesChanged).unwrap_or(0)
    }

    pub fn order_subscriber_count(&self) -> usize {
        self.order_tx.receiver_count()
    }

    pub fn change_subscriber_count(&self) -> usize {
        self.change_tx.receiver_count()
    }
}

impl Default for NoteEventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Live subscription to one hub stream.
///
/// Dropping the subscription unsubscribes it.
pub struct Subscription<T: Clone> {
    stream: &'static str,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    fn new(stream: &'static str, rx: broadcast::Receiver<T>) -> Self {
        Self { stream, rx }
    }

    /// Next event, or `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(stream = self.stream, skipped, "Subscriber lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Explicitly end the subscription.
    pub fn unsubscribe(self) {
        tracing::debug!(stream = self.stream, "Unsubscribed");
    }
}

/// Client side of the single long-lived push connection.
///
/// Bound to one endpoint for its whole life; there is no failover for the
/// realtime channel.
pub struct RealtimeChannel {
    endpoint: Endpoint,
    hub: Arc<NoteEventHub>,
    outbound: mpsc::Sender<String>,
}

impl RealtimeChannel {
    /// Open the channel against `endpoint`.
    ///
    /// The returned receiver yields encoded outbound frames for the socket
    /// driver. At most [`OUTBOUND_BUFFER`] frames wait in it at once.
    pub fn open(endpoint: Endpoint, hub: Arc<NoteEventHub>) -> (Self, mpsc::Receiver<String>) {
        let (outbound, rx) = mpsc::channel(OUTBOUND_BUFFER);
        tracing::info!(endpoint = %endpoint, "Realtime channel opened");
        (
            Self {
                endpoint,
                hub,
                outbound,
            },
            rx,
        )
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn hub(&self) -> &Arc<NoteEventHub> {
        &self.hub
    }

    /// Decode one inbound text frame and publish it to subscribers.
    pub fn handle_frame(&self, text: &str) -> Result<InboundEvent, RealtimeError> {
        let event = decode_frame(text)?;
        match &event {
            InboundEvent::OrderUpdated(notes) => {
                let delivered = self.hub.publish_order(notes.clone());
                tracing::debug!(notes = notes.len(), delivered, "Order update received");
            }
            InboundEvent::NotesUpdated => {
                let delivered = self.hub.publish_change();
                tracing::debug!(delivered, "Notes change signal received");
            }
            InboundEvent::Other(name) => {
                tracing::debug!(event = %name, "Ignoring realtime event");
            }
        }
        Ok(event)
    }

    /// Queue the full reordered collection for broadcast to other clients.
    ///
    /// Never waits: a full queue drops the frame and reports
    /// [`RealtimeError::QueueFull`].
    pub fn emit_order(&self, notes: &[Note]) -> Result<(), RealtimeError> {
        let frame = encode_update_order(notes)?;
        self.outbound.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    "Outbound queue full, order frame dropped"
                );
                RealtimeError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => RealtimeError::Closed,
        })
    }
}
