use anyhow::{Context, Result};
use asana_relay_core::{
    prepare, relay, validate_trigger, CommentSettings, Dispatcher, EventPayload, ProjectList,
    RelayInput, RelayOutcome, UserDirectory,
};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod workflow;

use config::Config;
use workflow::Outputs;

/// Posts GitHub pull request activity to the linked Asana tasks
#[derive(Parser, Debug)]
#[command(name = "asana-relay")]
#[command(about = "Posts GitHub pull request activity to the linked Asana tasks", long_about = None)]
struct Cli {
    /// Event that triggered the workflow (defaults to GITHUB_EVENT_NAME)
    #[arg(long)]
    event_name: Option<String>,

    /// Path to the webhook payload JSON (defaults to GITHUB_EVENT_PATH)
    #[arg(long)]
    event_path: Option<PathBuf>,

    /// JSON file mapping GitHub logins to Asana user ids, replacing the built-in directory
    #[arg(long)]
    user_directory: Option<PathBuf>,

    /// Endpoint to post the comment to (defaults to the action-url input)
    #[arg(long)]
    action_url: Option<String>,

    /// Print the request that would be sent instead of sending it
    #[arg(long)]
    dry_run: bool,
}

fn read_payload(path: &Path) -> Result<EventPayload> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event payload from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse event payload in {}", path.display()))
}

fn load_users(path: Option<&Path>) -> Result<UserDirectory> {
    let users = match path {
        Some(path) => UserDirectory::from_path(path)?,
        None => UserDirectory::builtin()?,
    };
    info!("Loaded {} user directory entries", users.len());
    Ok(users)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    let event_name = cli
        .event_name
        .or(config.event_name)
        .context("GITHUB_EVENT_NAME is not set; pass --event-name")?;
    // An unsupported trigger fails before anything else is read
    validate_trigger(&event_name)?;

    let event_path = cli
        .event_path
        .or(config.event_path)
        .context("GITHUB_EVENT_PATH is not set; pass --event-path")?;
    let payload = read_payload(&event_path)?;

    let users = load_users(cli.user_directory.or(config.user_directory).as_deref())?;

    let input = RelayInput {
        event_name,
        payload,
        allowed_projects: ProjectList::from_input(&config.allowed_projects),
        blocked_projects: ProjectList::from_input(&config.blocked_projects),
        settings: CommentSettings {
            service_login: config.service_login,
            pull_request_text: config.comment_text,
            ..Default::default()
        },
    };

    if cli.dry_run {
        match prepare(&input, &users)? {
            Some(request) => println!("{}", serde_json::to_string_pretty(&request)?),
            None => info!("Nothing to post"),
        }
        return Ok(());
    }

    let action_url = cli.action_url.unwrap_or(config.action_url);
    let dispatcher = Dispatcher::new(action_url, config.asana_secret)?;

    match relay(&input, &users, &dispatcher).await? {
        RelayOutcome::Sent(outcome) => {
            info!("Comment posted with status {}", outcome.status);
            let outputs = Outputs::new(config.output_path);
            outputs.set("status", &outcome.status.to_string())?;
            outputs.set("comment", &outcome.comment)?;
        }
        RelayOutcome::Skipped => {
            info!("Event skipped, no comment posted");
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            workflow::set_failed(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
