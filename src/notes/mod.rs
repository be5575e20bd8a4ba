//! Typed access to the note API through the failover dispatcher.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET /post` |
//! | create    | `POST /post` with `{title, content, user_id}` |
//! | update    | `PUT /post` with the full note |
//! | delete    | `DELETE /post/{id}` |

mod error;
mod types;

pub use error::*;
pub use types::*;

use crate::dispatch::{DispatchOutcome, Dispatcher, OperationDescriptor};
use std::sync::Arc;

/// Collection path of the note API.
pub const NOTES_PATH: &str = "/post";

/// Note API client.
///
/// Every call goes through the shared [`Dispatcher`], so health and
/// active-endpoint state are common to all of them.
#[derive(Clone)]
pub struct NotesClient {
    dispatcher: Arc<Dispatcher>,
}

impl NotesClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Fetch every note. An empty response body is an empty collection.
    pub async fn list_notes(&self) -> Result<Vec<Note>, NotesError> {
        let outcome = self
            .dispatcher
            .dispatch(&OperationDescriptor::get(NOTES_PATH))
            .await?;

        let notes = outcome
            .decode::<Vec<Note>>()
            .map_err(NotesError::Decode)?
            .unwrap_or_default();
        tracing::debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    /// Create a note. The response body is returned as-is.
    pub async fn create_note(&self, note: &NewNote) -> Result<DispatchOutcome, NotesError> {
        let body = serde_json::to_value(note).map_err(NotesError::Encode)?;
        let outcome = self
            .dispatcher
            .dispatch(&OperationDescriptor::post(NOTES_PATH, body))
            .await?;
        Ok(outcome)
    }

    /// Replace a note, identified by the id inside the body.
    pub async fn update_note(&self, note: &Note) -> Result<DispatchOutcome, NotesError> {
        let body = serde_json::to_value(note).map_err(NotesError::Encode)?;
        let outcome = self
            .dispatcher
            .dispatch(&OperationDescriptor::put(NOTES_PATH, body))
            .await?;
        Ok(outcome)
    }

    pub async fn delete_note(&self, id: i64) -> Result<DispatchOutcome, NotesError> {
        let outcome = self
            .dispatcher
            .dispatch(&OperationDescriptor::delete(format!("{}/{}", NOTES_PATH, id)))
            .await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_note_uses_camel_case_timestamps() {
        let json = r#"{
            "id": 4,
            "title": "groceries",
            "content": "milk",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T11:30:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, 4);
        assert_eq!(
            note.created_at,
            chrono::Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );

        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("updated_at").is_none());
    }

    #[test]
    fn test_new_note_body_shape() {
        let note = NewNote::new("title", "content");
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "title", "content": "content", "user_id": 1})
        );

        assert_eq!(note.with_user_id(9).user_id, 9);
    }

    #[test]
    fn test_notes_error_is_transparent_for_dispatch() {
        let err = NotesError::from(crate::dispatch::DispatchError::NoEndpoints);
        assert_eq!(err.to_string(), "no endpoints configured");
    }
}
