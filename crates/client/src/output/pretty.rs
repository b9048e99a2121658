//! Pretty output formatting.

use sheconnects_core::resource::{Event, Job, Post, ResourceItem};

const RULE_WIDTH: usize = 40;

fn format_list<T>(heading: &str, empty: &str, items: &[T], format: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut output = format!("{} ({})\n", heading, items.len());
    output.push_str(&"-".repeat(RULE_WIDTH));
    for item in items {
        output.push_str(&format!("\n{}", format(item)));
        output.push('\n');
    }
    output
}

fn pending_marker<T: ResourceItem>(item: &T) -> &'static str {
    if item.id().is_provisional() {
        " (pending)"
    } else {
        ""
    }
}

/// Format a post for display.
pub fn format_post(post: &Post) -> String {
    let mut output = format!(
        "{}{}\n  ID: {}\n  By: {}",
        post.title,
        pending_marker(post),
        post.id,
        post.author_name()
    );
    if let Some(created_at) = post.created_at {
        output.push_str(&format!("\n  Posted: {}", created_at.format("%B %-d, %Y")));
    }
    if post.image.is_some() {
        output.push_str("\n  Image: attached");
    }
    output.push_str(&format!("\n  {}", post.content));
    output
}

/// Format posts for display.
pub fn format_posts(posts: &[Post]) -> String {
    format_list("POSTS", "No posts found.", posts, format_post)
}

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let mut output = format!(
        "{} [{}]{}\n  ID: {}",
        event.title,
        event.category,
        pending_marker(event),
        event.id
    );
    if !event.date.is_empty() {
        output.push_str(&format!("\n  When: {} {}", event.date, event.time));
    }
    if !event.location.is_empty() {
        output.push_str(&format!("\n  Where: {}", event.location));
    }
    output.push_str(&format!("\n  Seats left: {}", event.available_seats));
    if !event.description.is_empty() {
        output.push_str(&format!("\n  {}", event.description));
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[Event]) -> String {
    format_list("EVENTS", "No events found.", events, format_event)
}

/// Format a job for display.
pub fn format_job(job: &Job) -> String {
    let mut output = format!(
        "{} at {} [{}]{}\n  ID: {}",
        job.title,
        job.company,
        job.kind,
        pending_marker(job),
        job.id
    );
    if !job.location.is_empty() {
        output.push_str(&format!("\n  Location: {}", job.location));
    }
    output.push_str(&format!("\n  {}", job.description));
    output
}

/// Format jobs for display.
pub fn format_jobs(jobs: &[Job]) -> String {
    format_list("JOBS", "No jobs found.", jobs, format_job)
}
