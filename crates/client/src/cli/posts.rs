//! Post CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::ListFilter;

/// Blog post commands.
#[derive(Debug, Parser)]
pub struct PostsCommand {
    #[command(subcommand)]
    pub action: PostsAction,
}

/// Available post actions.
#[derive(Debug, Subcommand)]
pub enum PostsAction {
    /// List posts, newest first.
    List {
        #[command(flatten)]
        filter: ListFilter,
    },
    /// Publish a post (requires login).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Image file to attach (max 1 MiB).
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a post (requires login).
    Delete {
        /// Post ID.
        id: String,
    },
}
