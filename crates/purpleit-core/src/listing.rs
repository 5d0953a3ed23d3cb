//! Client-side search and sort over an in-memory list of posts.

use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// Order applied to the visible set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Date,
    /// Most upvoted first.
    Popularity,
}

/// Posts whose title contains `query`, ignoring case.
///
/// An empty query returns every post in its original order.
pub fn filter_by_title(posts: &[Post], query: &str) -> Vec<Post> {
    if query.is_empty() {
        return posts.to_vec();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Sort posts in place. Equal keys keep their relative order.
pub fn sort_posts(posts: &mut [Post], order: SortOrder) {
    match order {
        SortOrder::Date => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Popularity => posts.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
    }
}
