//! Job CLI commands.

use clap::{Parser, Subcommand};
use sheconnects_core::resource::DEFAULT_EMPLOYMENT_KIND;

use super::ListFilter;

/// Job posting commands.
#[derive(Debug, Parser)]
pub struct JobsCommand {
    #[command(subcommand)]
    pub action: JobsAction,
}

/// Available job actions.
#[derive(Debug, Subcommand)]
pub enum JobsAction {
    /// List job postings.
    List {
        #[command(flatten)]
        filter: ListFilter,
        /// full-time, part-time, internship or all.
        #[arg(long, short, default_value = "all")]
        category: String,
    },
    /// Post a job.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
        /// Employment kind.
        #[arg(long, default_value = DEFAULT_EMPLOYMENT_KIND)]
        kind: String,
    },
}
