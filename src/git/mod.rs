//! Git operations abstraction layer
//!
//! The [GitClient] trait covers every version-control operation the release
//! flow performs. Concrete implementations:
//!
//! - [repository::Git2Client]: real implementation using the `git2` crate
//! - [mock::MockGit]: in-memory implementation for testing
//!
//! Decision logic depends on the trait rather than a concrete type, so the
//! classifier and orchestrator can be exercised without a real repository.

pub mod mock;
pub mod repository;

pub use mock::MockGit;
pub use repository::Git2Client;

use crate::error::Result;

/// Subject and body of one commit, the unit the classifier consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

impl CommitMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        CommitMessage {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject and body joined, the corpus the breaking-change scan runs over
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n{}", self.subject, self.body)
        }
    }
}

/// Version-control operations the release flow needs.
///
/// All implementors must be `Send + Sync`. Methods return
/// [crate::error::Result] so git2 errors and application errors surface
/// uniformly.
pub trait GitClient: Send + Sync {
    /// Set commit authorship for subsequent commits
    fn set_identity(&self, name: &str, email: &str) -> Result<()>;

    /// Full hash of the current HEAD commit
    fn head_commit(&self) -> Result<String>;

    /// Commit a tag points at, `None` when the tag does not exist
    fn tag_commit(&self, tag_name: &str) -> Result<Option<String>>;

    /// The repository's root commit (the commit with no parents), `None`
    /// when history is empty or unborn
    fn root_commit(&self) -> Result<Option<String>>;

    /// Commit messages in the range `from` (exclusive) to `to` (inclusive),
    /// oldest first
    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitMessage>>;

    /// Stage every change in the working tree
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged change-set
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a branch to a remote
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push all tags to a remote
    fn push_tags(&self, remote: &str) -> Result<()>;

    /// Point a remote at a different URL
    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()>;

    /// Hard-reset the working tree to HEAD, discarding uncommitted changes
    fn hard_reset(&self) -> Result<()>;
}
