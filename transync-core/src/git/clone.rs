//! Checking out the translations repository

use std::path::{Path, PathBuf};

use tracing::info;

use super::repo::{RepoSlug, GITHUB_HOST};
use crate::command::{CommandOutput, CommandRunner, Strictness};
use crate::config::RunConfig;
use crate::secrets::Token;
use crate::Result;

/// Authenticated HTTPS clone URL
pub fn clone_url(username: &str, token: &Token, repo: &RepoSlug) -> String {
    format!(
        "https://{}:{}@{}/{}.git",
        username,
        token.expose(),
        GITHUB_HOST,
        repo.full_name()
    )
}

/// `git clone [-b <ref>] <url>`
pub fn clone_args(config: &RunConfig) -> Vec<String> {
    let url = clone_url(&config.username, &config.token, &config.repo);
    match config.git_ref.as_deref() {
        Some(git_ref) => crate::args!["git", "clone", "-b", git_ref, url],
        None => crate::args!["git", "clone", url],
    }
}

/// `git config user.name "<name>"` and `git config user.email "<email>"`
///
/// The values carry literal quotes; existing pipelines expect this shape.
pub fn identity_args(config: &RunConfig) -> [Vec<String>; 2] {
    [
        crate::args!["git", "config", "user.name", format!("\"{}\"", config.bot_name)],
        crate::args!["git", "config", "user.email", format!("\"{}\"", config.bot_email)],
    ]
}

/// Clone the translations repository into `base_dir` and set the bot identity
///
/// Returns the path of the new working tree. In lenient mode the clone's exit
/// code is not inspected; a failed clone shows up when the identity commands
/// cannot start inside the missing directory.
pub async fn prepare_repository<R>(
    runner: &R,
    config: &RunConfig,
    base_dir: &Path,
    strictness: Strictness,
) -> Result<PathBuf>
where
    R: CommandRunner + ?Sized,
{
    let clone_dir = base_dir.join(config.repo.clone_dir_name());

    info!(
        base_path = %base_dir.display(),
        clone_path = %clone_dir.display(),
        git_ref = config.git_ref.as_deref().unwrap_or("(default)"),
        "Configuring git and checking out translations repository"
    );

    let args = clone_args(config);
    let output = runner.run(&args, Some(base_dir)).await?;
    if strictness == Strictness::Strict {
        ensure_success(output, &args, &config.token)?;
    }

    for args in identity_args(config) {
        let output = runner.run(&args, Some(&clone_dir)).await?;
        if strictness == Strictness::Strict {
            ensure_success(output, &args, &config.token)?;
        }
    }

    Ok(clone_dir)
}

fn ensure_success(output: CommandOutput, args: &[String], token: &Token) -> Result<()> {
    let output = CommandOutput {
        stderr: token.redact(&output.stderr),
        ..output
    };
    output.check(&token.redact(&args.join(" ")))?;
    Ok(())
}
