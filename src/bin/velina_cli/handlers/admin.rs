#![deny(clippy::all, clippy::pedantic)]

use serde_json::json;
use velina::application::dashboard::Dashboard;
use velina::application::posts::DeleteOutcome;
use velina::domain::types::{Capability, Confirmation, Tab};

use crate::args::AdminCmd;
use crate::context::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: AdminCmd) -> Result<(), CliError> {
    ctx.require(Capability::Admin).await?;
    let mut dash = Dashboard::new(ctx.api().clone());

    match cmd {
        AdminCmd::Dashboard { tab } => {
            dash.refresh().await?;
            dash.select_tab(tab.into());
            render(&dash)
        }
        AdminCmd::ApprovePost { id } => {
            dash.approve_post(&id).await?;
            print_counts(&dash)
        }
        AdminCmd::DeletePost { id, yes } => {
            let outcome = dash.delete_post(&id, Confirmation::from(yes)).await?;
            print_moderation_delete(&dash, outcome)
        }
        AdminCmd::ApproveComment { id } => {
            dash.approve_comment(&id).await?;
            print_counts(&dash)
        }
        AdminCmd::DeleteComment { id, yes } => {
            let outcome = dash.delete_comment(&id, Confirmation::from(yes)).await?;
            print_moderation_delete(&dash, outcome)
        }
    }
}

fn render(dash: &Dashboard) -> Result<(), CliError> {
    let Some(payload) = dash.snapshot() else {
        return Err(CliError::InvalidInput("dashboard payload missing".into()));
    };

    match dash.active_tab() {
        Tab::Overview => {
            let (posts, comments) = dash.recent_pending().unwrap_or((&[], &[]));
            print_json(&json!({
                "tab": Tab::Overview.as_str(),
                "counts": counts_value(dash),
                "recentPendingPosts": posts,
                "recentPendingComments": comments,
            }))
        }
        Tab::PendingPosts => print_json(&json!({
            "tab": Tab::PendingPosts.as_str(),
            "pendingPosts": payload.pending_posts,
        })),
        Tab::PendingComments => print_json(&json!({
            "tab": Tab::PendingComments.as_str(),
            "pendingComments": payload.pending_comments,
        })),
        Tab::Users => print_json(&json!({
            "tab": Tab::Users.as_str(),
            "users": payload.users,
        })),
    }
}

fn counts_value(dash: &Dashboard) -> serde_json::Value {
    match dash.counts() {
        Some(counts) => json!({
            "totalUsers": counts.total_users,
            "pendingPosts": counts.pending_posts,
            "pendingComments": counts.pending_comments,
            "publishedPosts": counts.published_posts,
        }),
        None => serde_json::Value::Null,
    }
}

fn print_counts(dash: &Dashboard) -> Result<(), CliError> {
    print_json(&json!({ "ok": true, "counts": counts_value(dash) }))
}

fn print_moderation_delete(dash: &Dashboard, outcome: DeleteOutcome) -> Result<(), CliError> {
    print_json(&json!({
        "deleted": outcome == DeleteOutcome::Deleted,
        "cancelled": outcome == DeleteOutcome::Cancelled,
        "counts": counts_value(dash),
    }))
}
