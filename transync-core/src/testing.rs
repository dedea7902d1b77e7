//! Recording fakes shared by the unit tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::command::{CommandOutput, CommandRunner};
use crate::config::RunConfig;
use crate::git::{BranchSource, RepoSlug};
use crate::secrets::Token;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Command { args: Vec<String>, cwd: Option<PathBuf> },
    ListBranches,
}

impl Event {
    pub(crate) fn cwd(&self) -> Option<&Path> {
        match self {
            Event::Command { cwd, .. } => cwd.as_deref(),
            Event::ListBranches => None,
        }
    }
}

/// Ordered record of everything the fakes were asked to do
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

/// Argument vectors of the recorded commands
pub(crate) fn commands(log: &EventLog) -> Vec<Vec<String>> {
    log.events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Command { args, .. } => Some(args),
            Event::ListBranches => None,
        })
        .collect()
}

type ExitCodeFn = Box<dyn Fn(&[String]) -> i32 + Send + Sync>;

/// Records commands instead of running them
pub(crate) struct RecordingRunner {
    log: EventLog,
    exit_code: ExitCodeFn,
}

impl RecordingRunner {
    pub(crate) fn new(log: EventLog) -> Self {
        Self {
            log,
            exit_code: Box::new(|_| 0),
        }
    }

    /// Report exit code 1 for commands matching `predicate`
    pub(crate) fn failing_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.exit_code = Box::new(move |args| i32::from(predicate(args)));
        self
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput> {
        self.log.push(Event::Command {
            args: args.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
        });
        let code = (self.exit_code)(args);
        let stderr = if code == 0 {
            String::new()
        } else {
            "error: simulated failure\n".to_string()
        };
        Ok(CommandOutput {
            stdout: String::new(),
            stderr,
            code,
        })
    }
}

/// Branch source with a fixed listing
pub(crate) struct StaticBranches {
    log: EventLog,
    branches: Option<Vec<String>>,
}

impl StaticBranches {
    pub(crate) fn new(log: EventLog, branches: &[&str]) -> Self {
        Self {
            log,
            branches: Some(branches.iter().map(|b| b.to_string()).collect()),
        }
    }

    /// Source whose listing always fails
    pub(crate) fn failing(log: EventLog) -> Self {
        Self { log, branches: None }
    }
}

#[async_trait]
impl BranchSource for StaticBranches {
    async fn branch_names(&self) -> Result<Vec<String>> {
        self.log.push(Event::ListBranches);
        self.branches
            .clone()
            .ok_or_else(|| Error::RemoteListing("Bad credentials".into()))
    }
}

/// Configuration for `Org/translations` with a `Bot <b@x.com>` identity
pub(crate) fn test_config() -> RunConfig {
    RunConfig {
        username: "bot-user".to_string(),
        token: Token::new("T0KEN"),
        repo: RepoSlug::parse("Org/translations").unwrap(),
        git_ref: None,
        bot_name: "Bot".to_string(),
        bot_email: "b@x.com".to_string(),
        run_local: false,
    }
}
