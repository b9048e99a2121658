//! CLI command definitions.

pub mod auth;
pub mod events;
pub mod jobs;
pub mod posts;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the sheconnects API.
#[derive(Debug, Parser)]
#[command(name = "sheconnects")]
#[command(about = "Browse and manage sheconnects posts, events and jobs", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "SHECONNECTS_URL")]
    pub base_url: Option<String>,

    /// Auth server base URL (defaults to the server base URL).
    #[arg(long, env = "SHECONNECTS_AUTH_URL")]
    pub auth_url: Option<String>,

    /// File holding the session token.
    #[arg(long, env = "SHECONNECTS_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Blog posts.
    Posts(posts::PostsCommand),
    /// Events and registration.
    Events(events::EventsCommand),
    /// Job postings.
    Jobs(jobs::JobsCommand),
    /// Login, signup and session status.
    Auth(auth::AuthCommand),
}

/// Search and category options shared by list commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListFilter {
    /// Case-insensitive search term.
    #[arg(long, short)]
    pub search: Option<String>,
}
