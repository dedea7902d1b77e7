//! Run configuration
//!
//! Everything a run needs is read once from the environment the CI job
//! provides. The resulting [`RunConfig`] is immutable for the rest of the run.
//!
//! Variables:
//! - `TOKEN`: access token (required, non-empty)
//! - `INPUT_TRANSLATIONS-REPO`: `owner/name` of the translations repository (required, non-empty)
//! - `INPUT_TRANSLATIONS-REF`: ref to check out (required, may be empty)
//! - `GPG_NAME` / `GPG_EMAIL`: bot commit identity (required)
//! - `RUN_LOCAL`: `true` (any case) for a local run, otherwise false

use crate::git::RepoSlug;
use crate::secrets::Token;
use crate::{Error, Result};

pub const TOKEN_VAR: &str = "TOKEN";
pub const REPO_VAR: &str = "INPUT_TRANSLATIONS-REPO";
pub const REF_VAR: &str = "INPUT_TRANSLATIONS-REF";
pub const NAME_VAR: &str = "GPG_NAME";
pub const EMAIL_VAR: &str = "GPG_EMAIL";
pub const RUN_LOCAL_VAR: &str = "RUN_LOCAL";

/// Variables that must be set for a run to start
pub const REQUIRED_VARS: [&str; 5] = [TOKEN_VAR, REPO_VAR, REF_VAR, NAME_VAR, EMAIL_VAR];

/// Account the clone URL authenticates as unless overridden
pub const DEFAULT_USERNAME: &str = "Scientific-Python-Translations";

/// Configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Account embedded in the clone URL
    pub username: String,
    /// Access token for the clone URL and the GitHub API
    pub token: Token,
    /// Translations repository
    pub repo: RepoSlug,
    /// Ref to check out; `None` clones the default branch
    pub git_ref: Option<String>,
    /// Bot commit author name
    pub bot_name: String,
    /// Bot commit author email
    pub bot_email: String,
    /// Whether the run happens outside CI
    pub run_local: bool,
}

impl RunConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| Error::MissingConfiguration(key.to_string()))
        };

        let token = Token::new(require(TOKEN_VAR)?);
        let repo = require(REPO_VAR)?;
        let git_ref = require(REF_VAR)?;
        let bot_name = require(NAME_VAR)?;
        let bot_email = require(EMAIL_VAR)?;

        if token.is_empty() {
            return Err(Error::Config(format!("{} is empty", TOKEN_VAR)));
        }
        if repo.trim().is_empty() {
            return Err(Error::Config(format!("{} is empty", REPO_VAR)));
        }

        Ok(Self {
            username: DEFAULT_USERNAME.to_string(),
            token,
            repo: RepoSlug::parse(&repo)?,
            git_ref: (!git_ref.is_empty()).then_some(git_ref),
            bot_name,
            bot_email,
            run_local: parse_run_local(lookup(RUN_LOCAL_VAR).as_deref()),
        })
    }

    /// Override the clone username
    pub fn with_username(mut self, username: Option<String>) -> Self {
        if let Some(username) = username.filter(|u| !u.trim().is_empty()) {
            self.username = username;
        }
        self
    }
}

/// Interpret the `RUN_LOCAL` flag
pub fn parse_run_local(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
