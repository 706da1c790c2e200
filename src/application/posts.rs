//! Post operations and the per-view post list.
//!
//! A list is owned by exactly one view; after a successful mutation the view
//! re-queries the API rather than patching its copy in place.

use tracing::debug;
use velina_api_types::{Acknowledgement, Pagination, Post, PostResponse, PostsResponse};

use crate::domain::types::Confirmation;
use crate::infra::api::ApiClient;

use super::error::ActionError;

pub const MAX_TITLE_CHARS: usize = 200;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// User-supplied post fields, validated before any call is issued.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    fn validate(&self) -> Result<(), ActionError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ActionError::validation("title and content are both required"));
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(ActionError::validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(())
    }

    fn body(&self) -> serde_json::Value {
        serde_json::json!({ "title": self.title, "content": self.content })
    }
}

/// Result of a confirmation-gated deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// One view's copy of the paginated post list.
pub struct PostListView {
    api: ApiClient,
    page: u32,
    limit: u32,
    posts: Vec<Post>,
    pagination: Option<Pagination>,
    loading: bool,
}

impl PostListView {
    pub fn new(api: ApiClient, limit: u32) -> Self {
        Self {
            api,
            page: 1,
            limit,
            posts: Vec::new(),
            pagination: None,
            loading: false,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace this view's copy of the list from the API. On failure the
    /// previous copy is retained.
    pub async fn refresh(&mut self) -> Result<(), ActionError> {
        self.loading = true;
        let result = self
            .api
            .get::<PostsResponse>(
                "/api/posts",
                &[
                    ("page", self.page.to_string()),
                    ("limit", self.limit.to_string()),
                ],
            )
            .await;
        self.loading = false;

        let resp = result?;
        debug!(count = resp.posts.len(), page = self.page, "post list refreshed");
        self.posts = resp.posts;
        self.pagination = Some(resp.pagination);
        Ok(())
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ActionError> {
        self.page = page.max(1);
        self.refresh().await
    }

    /// Delete a post after explicit confirmation; a successful delete is
    /// always followed by a refresh of this list.
    pub async fn delete(
        &mut self,
        post_id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ActionError> {
        if confirmation == Confirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.api
            .delete::<Acknowledgement>(&format!("/api/posts/{post_id}"))
            .await?;
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }
}

pub async fn fetch_post(api: &ApiClient, post_id: &str) -> Result<Post, ActionError> {
    let resp: PostResponse = api.get(&format!("/api/posts/{post_id}"), &[]).await?;
    Ok(resp.post)
}

/// Submit a new post. Its initial status is server-determined; the client
/// never sends one.
pub async fn create_post(api: &ApiClient, draft: &PostDraft) -> Result<Post, ActionError> {
    draft.validate()?;
    let resp: PostResponse = api.post("/api/posts", draft.body()).await?;
    Ok(resp.post)
}

pub async fn update_post(
    api: &ApiClient,
    post_id: &str,
    draft: &PostDraft,
) -> Result<Post, ActionError> {
    draft.validate()?;
    let resp: PostResponse = api
        .put(&format!("/api/posts/{post_id}"), Some(draft.body()))
        .await?;
    Ok(resp.post)
}
