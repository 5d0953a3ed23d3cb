//! Browse, search and sort posts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use purpleit_core::domain::Post;
use purpleit_core::listing::{SortOrder, filter_by_title, sort_posts};
use purpleit_core::time::format_relative;

use crate::api::BoardApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::request_seq::{RequestSeq, Ticket};

/// One row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: Uuid,
    pub age: String,
    pub title: String,
    pub upvotes: i64,
    pub edited: bool,
}

/// What to show instead of rows when nothing is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoMatches(String),
    NoPosts,
}

pub struct ListView {
    api: Arc<dyn BoardApi>,
    all: Vec<Post>,
    visible: Vec<Post>,
    sort: SortOrder,
    loading: bool,
    seq: RequestSeq,
    notice: Option<Notice>,
}

impl ListView {
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self {
            api,
            all: Vec::new(),
            visible: Vec::new(),
            sort: SortOrder::Date,
            loading: false,
            seq: RequestSeq::new(),
            notice: None,
        }
    }

    /// Fetch every post. The search text is empty on entry.
    pub async fn enter(&mut self) {
        self.reload("").await;
    }

    pub async fn reload(&mut self, query: &str) {
        let ticket = self.begin_load();
        let result = self.api.list_posts().await;
        self.finish_load(ticket, result, query);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.seq.next()
    }

    /// Apply a fetch result unless a newer fetch has been issued since.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Post>, ApiError>, query: &str) {
        if !self.seq.is_current(ticket) {
            tracing::debug!("Discarding stale post list");
            return;
        }
        self.loading = false;

        match result {
            Ok(posts) => {
                self.all = posts;
                self.apply_query(query);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load posts");
                self.notice = Some(Notice::error(notice::LOAD_POSTS_FAILED));
            }
        }
    }

    /// Recompute the visible set from the full set.
    ///
    /// The full set is kept newest first, so the sort indicator goes back to
    /// `Date`.
    pub fn apply_query(&mut self, query: &str) {
        self.visible = filter_by_title(&self.all, query);
        self.sort = SortOrder::Date;
    }

    /// Reorder the visible set only.
    pub fn sort_by(&mut self, order: SortOrder) {
        sort_posts(&mut self.visible, order);
        self.sort = order;
    }

    pub fn visible(&self) -> &[Post] {
        &self.visible
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self, now: DateTime<Utc>) -> Vec<PostCard> {
        self.visible
            .iter()
            .map(|post| PostCard {
                id: post.id,
                age: format_relative(post.created_at, now),
                title: post.title.clone(),
                upvotes: post.upvotes,
                edited: post.is_edited(),
            })
            .collect()
    }

    pub fn empty_state(&self, query: &str) -> Option<EmptyState> {
        if self.loading || !self.visible.is_empty() {
            return None;
        }

        if query.is_empty() {
            Some(EmptyState::NoPosts)
        } else {
            Some(EmptyState::NoMatches(query.to_string()))
        }
    }

    pub fn count_label(&self) -> String {
        match self.visible.len() {
            1 => "1 post".to_string(),
            n => format!("{n} posts"),
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, seed_post};
    use chrono::TimeDelta;

    fn titles(view: &ListView) -> Vec<&str> {
        view.visible().iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_enter_loads_newest_first() {
        let api = FakeApi::new();
        seed_post(&api, "older", 0, TimeDelta::hours(2)).await;
        seed_post(&api, "newer", 0, TimeDelta::minutes(5)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;

        assert_eq!(titles(&view), vec!["newer", "older"]);
        assert_eq!(view.sort_order(), SortOrder::Date);
        assert!(!view.is_loading());
        assert_eq!(view.count_label(), "2 posts");
    }

    #[tokio::test]
    async fn test_search_filters_full_set() {
        let api = FakeApi::new();
        seed_post(&api, "Rust tips", 0, TimeDelta::hours(1)).await;
        seed_post(&api, "Cooking", 0, TimeDelta::hours(2)).await;
        seed_post(&api, "rusty bikes", 0, TimeDelta::hours(3)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;

        view.apply_query("RUST");
        assert_eq!(titles(&view), vec!["Rust tips", "rusty bikes"]);

        view.apply_query("zzz");
        assert!(view.visible().is_empty());
        assert_eq!(
            view.empty_state("zzz"),
            Some(EmptyState::NoMatches("zzz".to_string()))
        );

        view.apply_query("");
        assert_eq!(view.visible().len(), 3);
        assert_eq!(view.empty_state(""), None);
    }

    #[tokio::test]
    async fn test_sort_by_popularity_then_date() {
        let api = FakeApi::new();
        seed_post(&api, "A", 3, TimeDelta::hours(1)).await;
        seed_post(&api, "B", 7, TimeDelta::hours(2)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;
        assert_eq!(titles(&view), vec!["A", "B"]);

        view.sort_by(SortOrder::Popularity);
        assert_eq!(titles(&view), vec!["B", "A"]);
        assert_eq!(view.sort_order(), SortOrder::Popularity);

        view.sort_by(SortOrder::Date);
        assert_eq!(titles(&view), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_sort_does_not_reapply_search() {
        let api = FakeApi::new();
        seed_post(&api, "cat", 1, TimeDelta::hours(1)).await;
        seed_post(&api, "dog", 9, TimeDelta::hours(2)).await;
        seed_post(&api, "catalog", 5, TimeDelta::hours(3)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;
        view.apply_query("cat");
        view.sort_by(SortOrder::Popularity);

        assert_eq!(titles(&view), vec!["catalog", "cat"]);
    }

    #[tokio::test]
    async fn test_query_resets_sort_indicator() {
        let api = FakeApi::new();
        seed_post(&api, "one", 1, TimeDelta::hours(1)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;
        view.sort_by(SortOrder::Popularity);
        view.apply_query("on");

        assert_eq!(view.sort_order(), SortOrder::Date);
    }

    #[tokio::test]
    async fn test_empty_board() {
        let api = FakeApi::new();
        let mut view = ListView::new(api.clone());
        view.enter().await;

        assert_eq!(view.empty_state(""), Some(EmptyState::NoPosts));
        assert_eq!(view.count_label(), "0 posts");
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let api = FakeApi::new();
        let fresh = seed_post(&api, "fresh", 0, TimeDelta::minutes(1)).await;

        let mut view = ListView::new(api.clone());
        let first = view.begin_load();
        let second = view.begin_load();

        view.finish_load(second, Ok(vec![fresh.clone()]), "");
        view.finish_load(first, Ok(Vec::new()), "");

        assert_eq!(view.visible(), &[fresh]);
    }

    #[tokio::test]
    async fn test_load_failure_raises_notice() {
        let api = FakeApi::new();
        api.fail_on("list_posts");

        let mut view = ListView::new(api.clone());
        view.enter().await;

        assert!(!view.is_loading());
        assert_eq!(
            view.take_notice(),
            Some(Notice::error(notice::LOAD_POSTS_FAILED))
        );
        assert_eq!(view.take_notice(), None);
    }

    #[tokio::test]
    async fn test_items_carry_age_and_edited_flag() {
        let api = FakeApi::new();
        let post = seed_post(&api, "aged", 4, TimeDelta::hours(3)).await;

        let mut view = ListView::new(api.clone());
        view.enter().await;

        let items = view.items(Utc::now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, post.id);
        assert_eq!(items[0].age, "3 hours ago");
        assert_eq!(items[0].upvotes, 4);
        assert!(!items[0].edited);
        assert_eq!(view.count_label(), "1 post");
    }
}
