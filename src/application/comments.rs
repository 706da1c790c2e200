//! The comment thread under a single post.

use tracing::debug;
use velina_api_types::{Acknowledgement, Comment, CommentsResponse};

use crate::domain::types::Confirmation;
use crate::infra::api::ApiClient;

use super::error::ActionError;
use super::posts::DeleteOutcome;

/// One view's copy of a post's comments, with a `submitting` flag so the view
/// can disable its submit control while a call is in flight.
pub struct CommentThread {
    api: ApiClient,
    post_id: String,
    comments: Vec<Comment>,
    submitting: bool,
}

impl CommentThread {
    pub fn new(api: ApiClient, post_id: impl Into<String>) -> Self {
        Self {
            api,
            post_id: post_id.into(),
            comments: Vec::new(),
            submitting: false,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn refresh(&mut self) -> Result<(), ActionError> {
        let resp: CommentsResponse = self
            .api
            .get(&format!("/api/posts/{}/comments", self.post_id), &[])
            .await?;
        debug!(count = resp.comments.len(), post = %self.post_id, "comment thread refreshed");
        self.comments = resp.comments;
        Ok(())
    }

    /// Submit a new comment and refresh the thread on success. Blank content
    /// is rejected before any call is issued.
    pub async fn submit(&mut self, content: &str) -> Result<(), ActionError> {
        if content.trim().is_empty() {
            return Err(ActionError::validation("comment content is required"));
        }

        self.submitting = true;
        let result = self
            .api
            .post::<Acknowledgement>(
                &format!("/api/posts/{}/comments", self.post_id),
                serde_json::json!({ "content": content }),
            )
            .await;
        self.submitting = false;

        result?;
        self.refresh().await
    }

    pub async fn delete(
        &mut self,
        comment_id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ActionError> {
        if confirmation == Confirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.api
            .delete::<Acknowledgement>(&format!(
                "/api/posts/{}/comments/{comment_id}",
                self.post_id
            ))
            .await?;
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
