//! Note entities exchanged with the note API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner id sent with new notes when the caller does not pick one.
pub const DEFAULT_USER_ID: i64 = 1;

/// A stored note, as returned by `GET /post` and pushed on the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            user_id: DEFAULT_USER_ID,
        }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }
}
