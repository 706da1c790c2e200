//! Command-line surface for `velina-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use velina::domain::types::Tab;

#[derive(Parser, Debug)]
#[command(name = "velina-cli", version, about = "Velina blogging platform CLI", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <https://blog.example.com>
    #[arg(long, env = "VELINA_SITE_URL")]
    pub site: Option<String>,

    /// Where to persist the session cookie between invocations
    #[arg(long, env = "VELINA_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Optional path to a configuration file
    #[arg(long = "config-file", env = "VELINA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management (login/register/logout/whoami)
    Auth(AuthArgs),
    /// Post browsing and authoring
    Posts(PostsArgs),
    /// Comment threads under a post
    Comments(CommentsArgs),
    /// Moderation dashboard and actions
    Admin(AdminArgs),
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
    /// Sign in and persist the session cookie
    Login {
        #[arg(long)]
        email: String,
        /// Password (falls back to VELINA_PASSWORD to keep it out of shell history)
        #[arg(long, env = "VELINA_PASSWORD")]
        password: String,
    },
    /// Create a new account (does not sign in)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "VELINA_PASSWORD")]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Terminate the session and drop the persisted cookie
    Logout,
    /// Show the currently authenticated identity
    Whoami,
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Fetch a single post
    Get { id: String },
    /// Submit a new post (initial status is decided by the server)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,
    },
    /// Update a post you may modify
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,
    },
    /// Delete a post (requires --yes)
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub action: CommentsCmd,
}

#[derive(Subcommand, Debug)]
pub enum CommentsCmd {
    /// List the comments under a post
    List { post_id: String },
    /// Add a comment to a post
    Add {
        post_id: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a comment (requires --yes)
    Delete {
        post_id: String,
        comment_id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub action: AdminCmd,
}

#[derive(Subcommand, Debug)]
pub enum AdminCmd {
    /// Fetch the moderation dashboard
    Dashboard {
        #[arg(long, value_enum, default_value_t = TabArg::Overview)]
        tab: TabArg,
    },
    /// Approve a pending post
    ApprovePost { id: String },
    /// Delete any post (requires --yes)
    DeletePost {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Approve a pending comment
    ApproveComment { id: String },
    /// Delete any comment (requires --yes)
    DeleteComment {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Overview,
    PendingPosts,
    PendingComments,
    Users,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Overview => Tab::Overview,
            TabArg::PendingPosts => Tab::PendingPosts,
            TabArg::PendingComments => Tab::PendingComments,
            TabArg::Users => Tab::Users,
        }
    }
}
