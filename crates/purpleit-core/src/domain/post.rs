use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a user-submitted item on the board.
///
/// The `id` is generated by the client that creates the post and doubles as
/// the URL key and the foreign key used by comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub upvotes: i64,
    /// Hashed secret credential required to edit or delete the post.
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post with zero upvotes.
    pub fn new(
        id: Uuid,
        title: String,
        content: Option<String>,
        image_url: Option<String>,
        secret_hash: String,
    ) -> Self {
        Self {
            id,
            title,
            content: content.filter(|c| !c.is_empty()),
            image_url: image_url.filter(|u| !u.is_empty()),
            upvotes: 0,
            secret_hash,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// A post is edited iff it has an update timestamp strictly after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some_and(|updated| updated > self.created_at)
    }

    /// Apply an edit, stamping `updated_at` with `now`.
    pub fn apply_edit(&mut self, edit: PostEdit, now: DateTime<Utc>) {
        self.title = edit.title;
        self.content = edit.content.filter(|c| !c.is_empty());
        self.image_url = edit.image_url.filter(|u| !u.is_empty());
        self.updated_at = Some(now);
    }
}

/// Editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEdit {
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

/// Returns the title trimmed, or `None` when nothing is left.
pub fn normalize_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
