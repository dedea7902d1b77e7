//! Transync CLI - Prepare a translations repository and prune stale branches
//!
//! Meant to run once per CI job. All inputs come from the environment the
//! workflow provides, or from a `.env` file for local runs; flags only tune
//! behaviour.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use transync_core::{sync, ProcessRunner, RunConfig, Strictness, SyncOptions};
use transync_github::GitHubClient;

/// Clone a translations repository, set the bot identity, and delete stale sync branches
#[derive(Parser, Debug)]
#[command(name = "transync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Account used in the authenticated clone URL
    #[arg(long, env = "TRANSYNC_USERNAME")]
    username: Option<String>,

    /// Fail on git command errors instead of only logging them
    #[arg(long)]
    strict: bool,

    /// Select stale branches without deleting them
    #[arg(long)]
    dry_run: bool,

    /// Directory to clone into (defaults to current directory)
    #[arg(short = 'd', long, default_value = ".")]
    workdir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Variables already exported by the CI job take precedence over .env
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = RunConfig::from_env();

    init_tracing(cli.verbose, ansi_enabled(&config));

    match &dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "Failed to load .env"),
    }

    let result = match config {
        Ok(config) => run(&cli, config).await,
        Err(err) => Err(err.into()),
    };
    if let Err(err) = result {
        error!("Run failed: {:?}", err);
        return Err(err);
    }

    Ok(())
}

/// Colour the logs only for local runs; CI logs stay plain
fn ansi_enabled(config: &transync_core::Result<RunConfig>) -> bool {
    config.as_ref().is_ok_and(|c| c.run_local)
}

fn init_tracing(verbose: bool, ansi: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(ansi))
        .with(filter)
        .init();
}

async fn run(cli: &Cli, config: RunConfig) -> anyhow::Result<()> {
    let config = config.with_username(cli.username.clone());

    info!(
        repo = %config.repo,
        git_ref = config.git_ref.as_deref().unwrap_or("(default)"),
        bot_name = %config.bot_name,
        bot_email = %config.bot_email,
        run_local = config.run_local,
        "Configuration loaded"
    );

    let workdir = if cli.workdir.is_absolute() {
        cli.workdir.clone()
    } else {
        std::env::current_dir()?.join(&cli.workdir)
    };

    let options = SyncOptions {
        strictness: if cli.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        },
        dry_run: cli.dry_run,
    };

    let runner = ProcessRunner::for_config(&config);
    let github = GitHubClient::for_repo(&config.repo, &config.token)?;

    let report = sync::run(&config, &workdir, &runner, &github, &options).await?;

    let failed = report
        .cleanup
        .deletions
        .iter()
        .filter(|d| !d.remote_deleted())
        .count();
    info!(
        clone_dir = %report.clone_dir.display(),
        candidates = report.cleanup.candidates.len(),
        deleted = report.cleanup.deletions.len() - failed,
        failed,
        "Sync complete"
    );

    Ok(())
}
