use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - an append-only reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Assigned by the backend on insert.
    pub id: i64,
    pub post_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    /// Create a new comment stamped with the current time.
    pub fn new(post_id: Uuid, comment: String) -> Self {
        Self {
            post_id,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Attach the backend-assigned identifier.
    pub fn with_id(self, id: i64) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}
