//! External command execution
//!
//! Every git invocation goes through a [`CommandRunner`]. The production
//! [`ProcessRunner`] spawns real processes and logs a full diagnostic trace for
//! each one, success or not, so CI logs show exactly what happened.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::config::RunConfig;
use crate::secrets::Token;
use crate::{Error, Result};

/// How non-zero exits from git are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Log failures and carry on
    #[default]
    Lenient,
    /// Turn failures into errors
    Strict,
}

/// Captured result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `-1` when the process was terminated by a signal
    pub code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Turn a non-zero exit into [`Error::CommandFailed`]
    ///
    /// `command` is the display form of the command line, already redacted.
    pub fn check(self, command: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(Error::CommandFailed {
            command: command.to_string(),
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `args[0]` with the remaining arguments, optionally inside `cwd`
    ///
    /// The exit code is reported, not interpreted.
    async fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Default)]
pub struct ProcessRunner {
    /// Extra environment for every child
    envs: Vec<(String, String)>,
    /// Values masked in the diagnostic trace
    secrets: Vec<Token>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner for a sync run: children see `GITHUB_TOKEN`, never prompt for
    /// credentials, and the token is masked in logs
    pub fn for_config(config: &RunConfig) -> Self {
        Self::new()
            .with_env("GITHUB_TOKEN", config.token.expose())
            .with_env("GIT_TERMINAL_PROMPT", "0")
            .with_secret(config.token.clone())
    }

    /// Set an environment variable for every spawned process
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Mask `token` wherever it shows up in the trace
    pub fn with_secret(mut self, token: Token) -> Self {
        self.secrets.push(token);
        self
    }

    fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| secret.redact(&acc))
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_keys: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("ProcessRunner")
            .field("envs", &env_keys)
            .field("secrets", &self.secrets)
            .finish()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| Error::Config("Empty command".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| Error::Spawn {
            command: self.redact(&args.join(" ")),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(-1),
        };

        let cwd = match cwd {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        info!(
            cmd = %self.redact(&args.join(" ")),
            cwd = %cwd.display(),
            stdout = %self.redact(&result.stdout),
            stderr = %self.redact(&result.stderr),
            code = result.code,
            "Ran command"
        );

        Ok(result)
    }
}

/// Owned argument vector from string literals and values
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$(::std::string::String::from($arg)),*]
    };
}
