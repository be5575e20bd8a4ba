//! Headless note board controller.
//!
//! Holds the client-side note list and runs the startup and user-action
//! flows: probe endpoints, open the realtime channel on the live endpoint,
//! fetch, then apply server-confirmed changes only.

mod error;

pub use error::*;

use crate::health::HealthSnapshot;
use crate::notes::{NewNote, Note, NotesClient};
use crate::realtime::{NoteEventHub, RealtimeChannel};
use crate::registry::Endpoint;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Client-visible board state.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub notes: Vec<Note>,
    pub endpoint_status: Vec<HealthSnapshot>,
    pub active_endpoint: Option<Endpoint>,
    pub loading: bool,
}

/// Note board wired to the note API and the realtime hub.
pub struct NoteBoard {
    client: NotesClient,
    hub: Arc<NoteEventHub>,
    state: Arc<RwLock<BoardState>>,
    channel: Option<RealtimeChannel>,
    listener: Option<(CancellationToken, JoinHandle<()>)>,
}

impl NoteBoard {
    pub fn new(client: NotesClient, hub: Arc<NoteEventHub>) -> Self {
        Self {
            client,
            hub,
            state: Arc::new(RwLock::new(BoardState {
                loading: true,
                ..Default::default()
            })),
            channel: None,
            listener: None,
        }
    }

    /// Copy of the current state.
    pub fn state(&self) -> BoardState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state().notes
    }

    pub fn channel(&self) -> Option<&RealtimeChannel> {
        self.channel.as_ref()
    }

    /// Startup: probe every endpoint, open the realtime channel on the live
    /// endpoint, start listening for pushes, then fetch.
    ///
    /// Returns the bounded outbound frame queue for the socket driver, or
    /// `None` when no endpoint is configured or the board was already
    /// initialised. The driver must keep draining it or reorders fail with
    /// a queue-full error.
    pub async fn initialize(&mut self) -> Option<mpsc::Receiver<String>> {
        let dispatcher = self.client.dispatcher().clone();

        let status = dispatcher.probe_all().await;
        let live = dispatcher.preview_endpoint();
        {
            let mut state = self.write_state();
            state.endpoint_status = status;
            state.active_endpoint = live.clone();
        }

        let mut outbound = None;
        if self.channel.is_none() {
            if let Some(endpoint) = live {
                let (channel, rx) = RealtimeChannel::open(endpoint, self.hub.clone());
                self.channel = Some(channel);
                outbound = Some(rx);
                self.start_listener();
            }
        }

        self.refresh().await;
        outbound
    }

    /// Re-fetch notes. Failures are logged and leave the current list intact.
    pub async fn refresh(&self) {
        refresh_into(&self.client, &self.state).await;
    }

    /// Create a note; the list is updated only after the server confirms.
    pub async fn save_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), BoardError> {
        let note = NewNote::new(title, content);
        self.client
            .create_note(&note)
            .await
            .map_err(|source| BoardError::Unavailable {
                action: "add",
                source,
            })?;
        self.refresh().await;
        Ok(())
    }

    pub async fn edit_note(&self, note: &Note) -> Result<(), BoardError> {
        self.client
            .update_note(note)
            .await
            .map_err(|source| BoardError::Unavailable {
                action: "edit",
                source,
            })?;
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), BoardError> {
        self.client
            .delete_note(id)
            .await
            .map_err(|source| BoardError::Unavailable {
                action: "delete",
                source,
            })?;
        self.refresh().await;
        Ok(())
    }

    /// Move a note locally and broadcast the new order to other clients.
    pub fn reorder(&self, from: usize, to: usize) -> Result<(), BoardError> {
        let notes = {
            let mut state = self.write_state();
            let len = state.notes.len();
            if from >= len || to >= len {
                return Err(BoardError::InvalidMove { from, to, len });
            }
            let moved = state.notes.remove(from);
            state.notes.insert(to, moved);
            state.notes.clone()
        };

        if let Some(channel) = &self.channel {
            channel.emit_order(&notes)?;
        }
        Ok(())
    }

    /// Stop listening for pushes and release both subscriptions.
    pub async fn shutdown(&mut self) {
        if let Some((cancel, handle)) = self.listener.take() {
            cancel.cancel();
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Realtime listener ended abnormally");
            }
        }
    }

    fn start_listener(&mut self) {
        let cancel = CancellationToken::new();
        let mut orders = self.hub.subscribe_order_updates();
        let mut changes = self.hub.subscribe_change_signals();
        let client = self.client.clone();
        let state = self.state.clone();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    update = orders.recv() => match update {
                        Some(notes) => {
                            state.write().unwrap_or_else(|e| e.into_inner()).notes = notes;
                        }
                        None => break,
                    },
                    signal = changes.recv() => match signal {
                        Some(_) => refresh_into(&client, &state).await,
                        None => break,
                    },
                }
            }
            orders.unsubscribe();
            changes.unsubscribe();
        });

        self.listener = Some((cancel, handle));
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for NoteBoard {
    fn drop(&mut self) {
        if let Some((cancel, _)) = &self.listener {
            cancel.cancel();
        }
    }
}

async fn refresh_into(client: &NotesClient, state: &RwLock<BoardState>) {
    let result = client.list_notes().await;
    let live = client.dispatcher().preview_endpoint();

    let mut state = state.write().unwrap_or_else(|e| e.into_inner());
    match result {
        Ok(notes) => {
            state.notes = notes;
            state.active_endpoint = live;
        }
        Err(e) => tracing::error!(error = %e, "Failed to load notes"),
    }
    state.loading = false;
}
