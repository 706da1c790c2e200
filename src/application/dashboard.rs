//! Moderation dashboard: aggregate counts and pending queues.
//!
//! Aggregate state only ever changes by re-fetching the whole payload; other
//! sessions may be moderating concurrently, so local increment/decrement
//! arithmetic would drift. Every successful moderation action is followed by
//! a refresh; a failed action leaves the previous snapshot in place.

use tracing::debug;
use velina_api_types::{Acknowledgement, Comment, DashboardPayload, DashboardResponse, Post};

use crate::domain::types::{Confirmation, Tab};
use crate::infra::api::ApiClient;

use super::error::ActionError;
use super::posts::DeleteOutcome;

const OVERVIEW_RECENT: usize = 3;

/// Read-only projection over the last fetched payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateCounts {
    pub total_users: u64,
    pub pending_posts: u64,
    pub pending_comments: u64,
    pub published_posts: u64,
}

pub struct Dashboard {
    api: ApiClient,
    snapshot: Option<DashboardPayload>,
    loading: bool,
    active_tab: Tab,
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: None,
            loading: false,
            active_tab: Tab::default(),
        }
    }

    pub fn snapshot(&self) -> Option<&DashboardPayload> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Tab selection is pure UI state; it never triggers a fetch.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn counts(&self) -> Option<AggregateCounts> {
        self.snapshot.as_ref().map(|payload| AggregateCounts {
            total_users: payload.stats.total_users,
            pending_posts: payload.stats.pending_posts,
            pending_comments: payload.stats.pending_comments,
            published_posts: payload.posts.len() as u64,
        })
    }

    /// The overview columns: at most three recent items per pending queue.
    pub fn recent_pending(&self) -> Option<(&[Post], &[Comment])> {
        self.snapshot.as_ref().map(|payload| {
            let posts = &payload.pending_posts;
            let comments = &payload.pending_comments;
            (
                &posts[..posts.len().min(OVERVIEW_RECENT)],
                &comments[..comments.len().min(OVERVIEW_RECENT)],
            )
        })
    }

    /// Re-fetch the full aggregate payload and replace the snapshot
    /// wholesale. On failure the previous snapshot is retained.
    pub async fn refresh(&mut self) -> Result<(), ActionError> {
        self.loading = true;
        let result = self.api.get::<DashboardResponse>("/api/admin", &[]).await;
        self.loading = false;

        let resp = result?;
        debug!(
            pending_posts = resp.dashboard.pending_posts.len(),
            pending_comments = resp.dashboard.pending_comments.len(),
            "dashboard refreshed"
        );
        self.snapshot = Some(resp.dashboard);
        Ok(())
    }

    pub async fn approve_post(&mut self, post_id: &str) -> Result<(), ActionError> {
        self.api
            .put::<Acknowledgement>(&format!("/api/admin/posts/{post_id}/approve"), None)
            .await?;
        self.refresh().await
    }

    pub async fn delete_post(
        &mut self,
        post_id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ActionError> {
        if confirmation == Confirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.api
            .delete::<Acknowledgement>(&format!("/api/admin/posts/{post_id}"))
            .await?;
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn approve_comment(&mut self, comment_id: &str) -> Result<(), ActionError> {
        self.api
            .put::<Acknowledgement>(&format!("/api/admin/comments/{comment_id}/approve"), None)
            .await?;
        self.refresh().await
    }

    pub async fn delete_comment(
        &mut self,
        comment_id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ActionError> {
        if confirmation == Confirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.api
            .delete::<Acknowledgement>(&format!("/api/admin/comments/{comment_id}"))
            .await?;
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
