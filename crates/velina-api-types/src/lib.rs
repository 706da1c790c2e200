//! Wire types for the Velina blogging API.
//!
//! Every response carries a `success` boolean envelope; entity ids are opaque
//! strings (the upstream store uses Mongo-style object ids, so `_id` is
//! accepted as an alias everywhere an id appears).

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Pending,
    Published,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Published => "published",
        }
    }
}

/// The authenticated actor as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Author reference embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
}

/// Parent post reference embedded in dashboard comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: AuthorRef,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: String,
    pub content: String,
    pub author: AuthorRef,
    /// Present on dashboard payloads, absent inside a post's own thread.
    #[serde(default)]
    pub post: Option<PostRef>,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub pending_posts: u64,
    pub pending_comments: u64,
}

/// Full moderation dashboard payload from `GET /admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub stats: DashboardStats,
    /// Published posts; the dashboard derives its published count from this.
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pending_posts: Vec<Post>,
    #[serde(default)]
    pub pending_comments: Vec<Comment>,
    #[serde(default)]
    pub users: Vec<User>,
}

// --- Request bodies ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Confirmation field; the server re-checks the match.
    pub password2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub content: String,
}

// --- Response envelopes ---

/// Minimal acknowledgement shared by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub success: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard: DashboardPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_mongo_id_alias() {
        let raw = r#"{"_id":"64f1","username":"ada","email":"ada@example.com","role":"admin"}"#;
        let user: User = serde_json::from_str(raw).expect("user");
        assert_eq!(user.id, "64f1");
        assert_eq!(user.role, Role::Admin);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn post_round_trips_camel_case() {
        let raw = r#"{
            "_id": "p1",
            "title": "Hello",
            "content": "Body",
            "author": {"_id": "u1", "username": "ada"},
            "status": "pending",
            "createdAt": "2026-01-02T03:04:05Z"
        }"#;
        let post: Post = serde_json::from_str(raw).expect("post");
        assert_eq!(post.status, ContentStatus::Pending);
        assert_eq!(post.author.id, "u1");
        let back = serde_json::to_value(&post).expect("value");
        assert_eq!(back["createdAt"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn dashboard_defaults_missing_lists_to_empty() {
        let raw = r#"{"stats":{"totalUsers":3,"pendingPosts":1,"pendingComments":0}}"#;
        let payload: DashboardPayload = serde_json::from_str(raw).expect("dashboard");
        assert_eq!(payload.stats.total_users, 3);
        assert!(payload.posts.is_empty());
        assert!(payload.users.is_empty());
    }
}
