#![deny(clippy::all, clippy::pedantic)]

use serde_json::json;
use velina::application::comments::CommentThread;
use velina::application::posts::DeleteOutcome;
use velina::domain::types::{Capability, Confirmation};

use crate::args::CommentsCmd;
use crate::context::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: CommentsCmd) -> Result<(), CliError> {
    match cmd {
        CommentsCmd::List { post_id } => list(ctx, &post_id).await,
        CommentsCmd::Add { post_id, content } => add(ctx, &post_id, &content).await,
        CommentsCmd::Delete {
            post_id,
            comment_id,
            yes,
        } => delete(ctx, &post_id, &comment_id, yes).await,
    }
}

async fn list(ctx: &Ctx, post_id: &str) -> Result<(), CliError> {
    let mut thread = CommentThread::new(ctx.api().clone(), post_id);
    thread.refresh().await?;
    print_json(&thread.comments())
}

async fn add(ctx: &Ctx, post_id: &str, content: &str) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    let mut thread = CommentThread::new(ctx.api().clone(), post_id);
    thread.submit(content).await?;
    print_json(&thread.comments())
}

async fn delete(ctx: &Ctx, post_id: &str, comment_id: &str, yes: bool) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    let mut thread = CommentThread::new(ctx.api().clone(), post_id);
    let outcome = thread.delete(comment_id, Confirmation::from(yes)).await?;
    print_json(&json!({
        "deleted": outcome == DeleteOutcome::Deleted,
        "cancelled": outcome == DeleteOutcome::Cancelled,
    }))
}
