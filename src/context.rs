use crate::error::{ReleaseError, Result};
use crate::git::CommitMessage;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Trigger inputs read from the CI environment, collected once at process
/// entry. No other component reads ambient environment variables.
#[derive(Debug, Clone)]
pub struct CiContext {
    /// Branch name derived from the trigger ref
    pub branch: String,
    /// Workspace root the repository is checked out into
    pub workspace: PathBuf,
    /// Commit hash the CI run was triggered for
    pub trigger_sha: String,
    /// Parsed trigger event payload, when one was provided
    pub event: Option<CiEvent>,
    /// Registry auth token for publishing
    pub npm_token: Option<String>,
    /// Registry base URL override
    pub registry_url: Option<String>,
    /// Token used to rewrite the docs push remote
    pub github_token: Option<String>,
    /// "owner/repo" slug of the repository
    pub github_repository: Option<String>,
    /// Commit authorship email
    pub git_user_email: String,
}

/// CI trigger event payload; only the commit list matters here
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CiEvent {
    #[serde(default)]
    pub commits: Vec<EventCommit>,
}

/// One commit as reported by the trigger event
#[derive(Debug, Clone, Deserialize)]
pub struct EventCommit {
    pub message: String,
    #[serde(default)]
    pub body: String,
}

impl CiEvent {
    /// Event commits as subject/body pairs, the same shape the git history
    /// query produces, so classification treats both sources identically
    pub fn commit_messages(&self) -> Vec<CommitMessage> {
        self.commits
            .iter()
            .map(|commit| {
                let mut lines = commit.message.splitn(2, '\n');
                let subject = lines.next().unwrap_or_default().to_string();
                let rest = lines.next().unwrap_or_default();
                let body = if commit.body.is_empty() {
                    rest.to_string()
                } else if rest.is_empty() {
                    commit.body.clone()
                } else {
                    format!("{}\n{}", rest, commit.body)
                };
                CommitMessage { subject, body }
            })
            .collect()
    }
}

impl CiContext {
    /// Build the context from the CI environment.
    ///
    /// `GITHUB_REF`, `GITHUB_WORKSPACE` and `GITHUB_SHA` are required; the
    /// rest are optional. A missing or unparsable event payload degrades to
    /// `None` with a warning, matching the best-effort role it plays.
    pub fn from_env() -> Result<Self> {
        let git_ref = required_env("GITHUB_REF")?;
        let workspace = PathBuf::from(required_env("GITHUB_WORKSPACE")?);
        let trigger_sha = required_env("GITHUB_SHA")?;

        let event = env::var("GITHUB_EVENT_PATH")
            .ok()
            .and_then(|path| match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<CiEvent>(&contents) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        crate::ui::display_warning(&format!(
                            "Cannot parse event payload {}: {}",
                            path, e
                        ));
                        None
                    }
                },
                Err(e) => {
                    crate::ui::display_warning(&format!("Cannot read event payload {}: {}", path, e));
                    None
                }
            });

        Ok(CiContext {
            branch: branch_from_ref(&git_ref),
            workspace,
            trigger_sha,
            event,
            npm_token: env::var("NPM_AUTH_TOKEN").ok(),
            registry_url: env::var("NPM_REGISTRY_URL").ok(),
            github_token: env::var("GITHUB_TOKEN").ok(),
            github_repository: env::var("GITHUB_REPOSITORY").ok(),
            git_user_email: env::var("BUMP_GIT_USER_EMAIL")
                .unwrap_or_else(|_| "bump-and-release@users.noreply.github.com".to_string()),
        })
    }

    /// Commit messages from the trigger event, empty when no event was given
    pub fn event_commit_messages(&self) -> Vec<CommitMessage> {
        self.event
            .as_ref()
            .map(|event| event.commit_messages())
            .unwrap_or_default()
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        ReleaseError::config(format!("Required environment variable {} is not set", name))
    })
}

/// Extract the branch name from a fully qualified ref.
///
/// "refs/heads/feature/x" becomes "feature/x": everything past the first two
/// path segments belongs to the branch name.
pub fn branch_from_ref(git_ref: &str) -> String {
    git_ref.split('/').skip(2).collect::<Vec<_>>().join("/")
}
