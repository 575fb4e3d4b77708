use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "kbacklog", about = "Knowledge-article backlog tracker")]
pub struct Cli {
    /// SQLite database path (overrides KB_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen address (overrides KB_BIND / PORT)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Print the admin statistics report
    Stats {
        /// Start of the window (YYYY-MM-DD or RFC3339, inclusive)
        #[arg(long)]
        from: Option<String>,
        /// End of the window (YYYY-MM-DD or RFC3339, inclusive)
        #[arg(long)]
        to: Option<String>,
    },
    /// Print every article with its tags
    Articles,
    /// List tags
    Tags,
    /// Manage the authorized-user allowlist
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Delete all articles, tags and links (the allowlist is kept)
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List authorized users
    List,
    /// Authorize a user
    Add { username: String },
    /// Revoke a user
    Remove { username: String },
}
