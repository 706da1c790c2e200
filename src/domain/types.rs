//! Shared domain enumerations.

use serde::{Deserialize, Serialize};

/// Authorization requirement a protected view declares before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Authenticated,
    Admin,
}

/// Where a denied view sends the actor instead of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    Login,
    Home,
}

/// Outcome of consulting the authorization guard.
///
/// `Defer` means identity resolution has not finished; the view renders a
/// neutral loading state and neither shows protected content nor redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Defer,
    Redirect(RedirectTarget),
}

/// Actions a view may expose on a post or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityAction {
    Edit,
    Delete,
    Approve,
}

impl EntityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityAction::Edit => "edit",
            EntityAction::Delete => "delete",
            EntityAction::Approve => "approve",
        }
    }
}

/// The human yes/no gate required before destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Cancelled
        }
    }
}

/// Dashboard tab selection; pure UI state, orthogonal to data freshness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    PendingPosts,
    PendingComments,
    Users,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::PendingPosts => "pending-posts",
            Tab::PendingComments => "pending-comments",
            Tab::Users => "users",
        }
    }
}

impl TryFrom<&str> for Tab {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "overview" => Ok(Tab::Overview),
            "pending-posts" => Ok(Tab::PendingPosts),
            "pending-comments" => Ok(Tab::PendingComments),
            "users" => Ok(Tab::Users),
            _ => Err(()),
        }
    }
}
