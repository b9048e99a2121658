//! sheconnects CLI entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sheconnects_client::cli::auth::AuthAction;
use sheconnects_client::cli::events::EventsAction;
use sheconnects_client::cli::jobs::JobsAction;
use sheconnects_client::cli::posts::PostsAction;
use sheconnects_client::cli::{Cli, Commands, OutputFormat};
use sheconnects_client::output::{pretty, render, render_message};
use sheconnects_client::{
    ApiClient, AuthClient, CollectionApi, Config, FileTokenStore, FormController, RemoteCollection,
    ResourceList, SyncError,
};
use sheconnects_core::auth::{LoginRequest, SignupRequest};
use sheconnects_core::filter::CategoryFilter;
use sheconnects_core::media::mime_from_extension;
use sheconnects_core::resource::{Events, Jobs, Posts, ResourceAdapter};
use sheconnects_core::session::Session;
use sheconnects_core::ItemId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "sheconnects=warn,sheconnects_client=warn"
    } else {
        "sheconnects=info,sheconnects_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().with_overrides(
        cli.base_url.clone(),
        cli.auth_url.clone(),
        cli.session_file.clone(),
    );
    let session = Session::new(Arc::new(FileTokenStore::new(&config.session_file)));
    let api = ApiClient::new(config.base_url.as_str());
    let format = cli.format;

    match cli.command {
        Commands::Posts(cmd) => {
            let list = Arc::new(ResourceList::<Posts>::new(RemoteCollection::new(api), session));
            match cmd.action {
                PostsAction::List { filter } => {
                    load_with_interrupt(&list).await?;
                    if let Some(term) = filter.search {
                        list.set_search_term(term);
                    }
                    let posts = list.visible();
                    println!("{}", render(posts.as_slice(), format, pretty::format_posts));
                }
                PostsAction::Create {
                    title,
                    content,
                    image,
                } => {
                    let mut form = FormController::<Posts>::new();
                    form.update_field("title", title)?;
                    form.update_field("content", content)?;
                    if let Some(path) = image {
                        let bytes = std::fs::read(&path)
                            .with_context(|| format!("reading {}", path.display()))?;
                        form.attach_image(&bytes, image_mime(&path))?;
                    }
                    let post = form.submit(&list).await?;
                    let output = render(&post, format, |p| {
                        format!("Created:\n{}", pretty::format_post(p))
                    });
                    println!("{}", output);
                }
                PostsAction::Delete { id } => {
                    list.remove(&ItemId::new(id.as_str())).await?;
                    if !cli.quiet {
                        let message = format!("Deleted post {}", id);
                        println!("{}", render_message(&message, format));
                    }
                }
            }
        }
        Commands::Events(cmd) => {
            let list = Arc::new(ResourceList::<Events>::new(RemoteCollection::new(api), session));
            match cmd.action {
                EventsAction::List { filter, category } => {
                    list.set_category(category.parse::<CategoryFilter>()?)?;
                    if let Some(term) = filter.search {
                        list.set_search_term(term);
                    }
                    load_with_interrupt(&list).await?;
                    let events = list.visible();
                    println!("{}", render(events.as_slice(), format, pretty::format_events));
                }
                EventsAction::Create {
                    title,
                    description,
                    category,
                    date,
                    time,
                    location,
                    image_url,
                    seats,
                } => {
                    let mut form = FormController::<Events>::new();
                    form.update_field("title", title)?;
                    form.update_field("description", description)?;
                    form.update_field("category", category)?;
                    form.update_field("date", date)?;
                    form.update_field("time", time)?;
                    form.update_field("location", location)?;
                    form.update_field("imageUrl", image_url.unwrap_or_default())?;
                    form.update_field("availableSeats", seats)?;
                    let event = form.submit(&list).await?;
                    let output = render(&event, format, |e| {
                        format!("Created:\n{}", pretty::format_event(e))
                    });
                    println!("{}", output);
                }
                EventsAction::Register { id, user_id } => {
                    let id = ItemId::new(id);
                    list.register(&id, &user_id).await?;
                    if !cli.quiet {
                        let message = format!("Registered for event {}", id);
                        println!("{}", render_message(&message, format));
                    }
                }
            }
        }
        Commands::Jobs(cmd) => {
            let list = Arc::new(ResourceList::<Jobs>::new(RemoteCollection::new(api), session));
            match cmd.action {
                JobsAction::List { filter, category } => {
                    list.set_category(category.parse::<CategoryFilter>()?)?;
                    if let Some(term) = filter.search {
                        list.set_search_term(term);
                    }
                    load_with_interrupt(&list).await?;
                    let jobs = list.visible();
                    println!("{}", render(jobs.as_slice(), format, pretty::format_jobs));
                }
                JobsAction::Create {
                    title,
                    company,
                    location,
                    description,
                    kind,
                } => {
                    let mut form = FormController::<Jobs>::new();
                    form.update_field("title", title)?;
                    form.update_field("company", company)?;
                    form.update_field("location", location)?;
                    form.update_field("description", description)?;
                    form.update_field("type", kind)?;
                    let job = form.submit(&list).await?;
                    let output = render(&job, format, |j| {
                        format!("Created:\n{}", pretty::format_job(j))
                    });
                    println!("{}", output);
                }
            }
        }
        Commands::Auth(cmd) => {
            let auth = AuthClient::new(ApiClient::new(config.auth_url.as_str()), session);
            run_auth(&auth, cmd.action, format, cli.quiet).await?;
        }
    }

    Ok(())
}

async fn run_auth(
    auth: &AuthClient,
    action: AuthAction,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let message = match action {
        AuthAction::Login { email, password } => {
            let request = LoginRequest::new(&email, &password)?;
            let response = auth.login(&request).await?;
            response.message.unwrap_or_else(|| "Logged in".to_string())
        }
        AuthAction::Signup {
            name,
            email,
            phone,
            password,
        } => {
            let request = SignupRequest::new(&name, &email, &phone, &password)?;
            let response = auth.signup(&request).await?;
            response
                .message
                .unwrap_or_else(|| "Account created".to_string())
        }
        AuthAction::Logout => {
            auth.logout()?;
            "Logged out".to_string()
        }
        AuthAction::Status => {
            if auth.is_authenticated()? {
                "Logged in".to_string()
            } else {
                "Not logged in".to_string()
            }
        }
    };
    if !quiet || matches!(format, OutputFormat::Json) {
        println!("{}", render_message(&message, format));
    }
    Ok(())
}

/// Loads the list, abandoning the request on Ctrl-C.
async fn load_with_interrupt<A, R>(list: &Arc<ResourceList<A, R>>) -> Result<usize>
where
    A: ResourceAdapter,
    R: CollectionApi<A> + 'static,
{
    let mut handle = ResourceList::spawn_load(list);
    tokio::select! {
        result = handle.wait() => Ok(result?),
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            Err(SyncError::Cancelled.into())
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_extension)
        .unwrap_or("application/octet-stream")
}
