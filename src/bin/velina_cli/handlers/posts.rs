#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use serde_json::json;
use velina::application::posts::{
    DEFAULT_PAGE_SIZE, DeleteOutcome, PostDraft, PostListView, create_post, fetch_post, update_post,
};
use velina::domain::types::{Capability, Confirmation};

use crate::args::PostsCmd;
use crate::context::{CliError, Ctx};
use crate::io::read_value;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List { page, limit } => list(ctx, page, limit).await,
        PostsCmd::Get { id } => get(ctx, &id).await,
        PostsCmd::Create {
            title,
            content,
            content_file,
        } => create(ctx, title, content, content_file).await,
        PostsCmd::Update {
            id,
            title,
            content,
            content_file,
        } => update(ctx, &id, title, content, content_file).await,
        PostsCmd::Delete { id, yes } => delete(ctx, &id, yes).await,
    }
}

async fn list(ctx: &Ctx, page: u32, limit: u32) -> Result<(), CliError> {
    let mut view = PostListView::new(ctx.api().clone(), limit);
    view.go_to_page(page).await?;
    print_json(&json!({
        "posts": view.posts(),
        "pagination": view.pagination(),
    }))
}

async fn get(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let post = fetch_post(ctx.api(), id).await?;
    print_json(&post)
}

async fn create(
    ctx: &Ctx,
    title: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    let draft = PostDraft {
        title,
        content: read_value(content, content_file)?,
    };
    let post = create_post(ctx.api(), &draft).await?;
    print_json(&post)
}

async fn update(
    ctx: &Ctx,
    id: &str,
    title: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    let draft = PostDraft {
        title,
        content: read_value(content, content_file)?,
    };
    let post = update_post(ctx.api(), id, &draft).await?;
    print_json(&post)
}

async fn delete(ctx: &Ctx, id: &str, yes: bool) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    let mut view = PostListView::new(ctx.api().clone(), DEFAULT_PAGE_SIZE);
    let outcome = view.delete(id, Confirmation::from(yes)).await?;
    print_json(&json!({
        "deleted": outcome == DeleteOutcome::Deleted,
        "cancelled": outcome == DeleteOutcome::Cancelled,
    }))
}
