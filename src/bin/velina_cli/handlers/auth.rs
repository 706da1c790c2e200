#![deny(clippy::all, clippy::pedantic)]

use serde_json::json;
use velina::domain::types::Capability;

use crate::args::AuthCmd;
use crate::context::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: AuthCmd) -> Result<(), CliError> {
    match cmd {
        AuthCmd::Login { email, password } => login(ctx, &email, &password).await,
        AuthCmd::Register {
            username,
            email,
            password,
            confirm_password,
        } => register(ctx, &username, &email, &password, &confirm_password).await,
        AuthCmd::Logout => logout(ctx).await,
        AuthCmd::Whoami => whoami(ctx).await,
    }
}

async fn login(ctx: &Ctx, email: &str, password: &str) -> Result<(), CliError> {
    let outcome = ctx.store.login(email, password).await;
    if !outcome.ok {
        return Err(CliError::Auth(
            outcome.message.unwrap_or_else(|| "Login failed".into()),
        ));
    }
    ctx.persist_session()?;
    print_json(&json!({
        "ok": true,
        "user": ctx.store.snapshot().identity,
    }))
}

async fn register(
    ctx: &Ctx,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CliError> {
    let outcome = ctx
        .store
        .register(username, email, password, confirm_password)
        .await;
    if !outcome.ok {
        return Err(CliError::Auth(
            outcome.message.unwrap_or_else(|| "Registration failed".into()),
        ));
    }
    print_json(&json!({ "ok": true, "message": outcome.message }))
}

async fn logout(ctx: &Ctx) -> Result<(), CliError> {
    let outcome = ctx.store.logout().await;
    ctx.clear_session()?;
    print_json(&json!({ "ok": outcome.ok }))
}

async fn whoami(ctx: &Ctx) -> Result<(), CliError> {
    ctx.require(Capability::Authenticated).await?;
    print_json(&ctx.store.snapshot().identity)
}
