//! One-shot user-facing notices.

/// A message shown once to the user, then taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub const SECRET_MISMATCH: &str = "Invalid secret key. Please try again.";
pub const TITLE_REQUIRED: &str = "Please enter a title for your post.";
pub const SECRET_REQUIRED: &str = "Please choose a secret key so you can edit or delete your post later.";

pub const POST_CREATED: &str = "Post created successfully!";
pub const POST_UPDATED: &str = "Post updated successfully!";
pub const POST_DELETED: &str = "Post deleted successfully!";

pub const LOAD_POSTS_FAILED: &str = "Error loading posts. Please try again.";
pub const LOAD_POST_FAILED: &str = "Error loading post. Please try again.";
pub const LOAD_COMMENTS_FAILED: &str = "Error loading comments. Please try again.";
pub const CREATE_FAILED: &str = "Error creating post. Please try again.";
pub const UPDATE_FAILED: &str = "Error updating post. Please try again.";
pub const DELETE_FAILED: &str = "Error deleting post. Please try again.";
pub const UPVOTE_FAILED: &str = "Error upvoting post. Please try again.";
pub const COMMENT_FAILED: &str = "Error adding comment. Please try again.";

impl Notice {
    pub fn info(message: &str) -> Self {
        Notice::Info(message.to_string())
    }

    pub fn error(message: &str) -> Self {
        Notice::Error(message.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Info(msg) | Notice::Error(msg) => msg,
        }
    }
}
