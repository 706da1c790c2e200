//! velina-cli: command-line client for a Velina blogging platform.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod context;
mod handlers;
mod io;
mod print;

use clap::Parser;

use args::{Cli, Commands};
use context::{CliError, Ctx, build_settings};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = build_settings(&cli)?;
    velina::infra::telemetry::init(&settings.logging)?;

    let ctx = Ctx::new(&settings)?;
    match cli.command {
        Commands::Auth(cmd) => handlers::auth::handle(&ctx, cmd.action).await?,
        Commands::Posts(cmd) => handlers::posts::handle(&ctx, cmd.action).await?,
        Commands::Comments(cmd) => handlers::comments::handle(&ctx, cmd.action).await?,
        Commands::Admin(cmd) => handlers::admin::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
