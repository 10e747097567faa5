use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note.
///
/// The `id` is assigned by SQLite on insert and never changes afterwards.
/// `created_at` is set once; `modified_at` moves forward on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: i64,
    /// Author name.
    pub username: String,
    pub contents: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input for creating or updating a memo. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoRequest {
    #[serde(alias = "author")]
    pub username: String,
    pub contents: String,
}

impl MemoRequest {
    pub fn new(username: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            contents: contents.into(),
        }
    }
}

/// A memo as returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoResponse {
    pub id: i64,
    pub username: String,
    pub contents: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Memo> for MemoResponse {
    fn from(memo: Memo) -> Self {
        Self {
            id: memo.id,
            username: memo.username,
            contents: memo.contents,
            created_at: memo.created_at,
            modified_at: memo.modified_at,
        }
    }
}
