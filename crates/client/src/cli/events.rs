//! Event CLI commands.

use clap::{Parser, Subcommand};
use sheconnects_core::resource::DEFAULT_EVENT_CATEGORY;

use super::ListFilter;

/// Subject sent with registrations when none is given.
pub const DEFAULT_REGISTRANT: &str = "current-user-id";

/// Event commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events.
    List {
        #[command(flatten)]
        filter: ListFilter,
        /// workshop, seminar, conference, social or all.
        #[arg(long, short, default_value = "all")]
        category: String,
    },
    /// Create an event.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = DEFAULT_EVENT_CATEGORY)]
        category: String,
        /// Date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Time (HH:MM).
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long, default_value = "0")]
        seats: String,
    },
    /// Register for an event.
    Register {
        /// Event ID.
        id: String,
        #[arg(long, default_value = DEFAULT_REGISTRANT)]
        user_id: String,
    },
}
