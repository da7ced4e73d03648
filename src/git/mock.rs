use crate::error::{ReleaseError, Result};
use crate::git::{CommitMessage, GitClient};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [GitClient] for testing without a real repository.
///
/// Read operations answer from configured fixture data; write operations
/// append to an operation log so tests can assert which side effects ran and
/// in what order.
pub struct MockGit {
    head: String,
    tags: HashMap<String, String>,
    root: Option<String>,
    range: Vec<CommitMessage>,
    fail_history_query: bool,
    operations: Mutex<Vec<String>>,
}

impl MockGit {
    /// Create a mock whose HEAD is the given hash
    pub fn new(head: impl Into<String>) -> Self {
        MockGit {
            head: head.into(),
            tags: HashMap::new(),
            root: None,
            range: Vec::new(),
            fail_history_query: false,
            operations: Mutex::new(Vec::new()),
        }
    }

    /// Map a tag name to the commit it points at
    pub fn with_tag(mut self, name: impl Into<String>, commit: impl Into<String>) -> Self {
        self.tags.insert(name.into(), commit.into());
        self
    }

    /// Set the root commit
    pub fn with_root(mut self, commit: impl Into<String>) -> Self {
        self.root = Some(commit.into());
        self
    }

    /// Set the commit messages every range query returns
    pub fn with_range(mut self, range: Vec<CommitMessage>) -> Self {
        self.range = range;
        self
    }

    /// Make history queries fail, exercising the degraded empty-range path
    pub fn with_failing_history(mut self) -> Self {
        self.fail_history_query = true;
        self
    }

    /// Every mutating operation performed, in order
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, op: String) {
        self.operations.lock().unwrap().push(op);
    }
}

impl GitClient for MockGit {
    fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        self.record(format!("identity {} <{}>", name, email));
        Ok(())
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn tag_commit(&self, tag_name: &str) -> Result<Option<String>> {
        Ok(self.tags.get(tag_name).cloned())
    }

    fn root_commit(&self) -> Result<Option<String>> {
        Ok(self.root.clone())
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitMessage>> {
        if self.fail_history_query {
            return Err(ReleaseError::command(format!(
                "no history between {} and {}",
                from, to
            )));
        }
        Ok(self.range.clone())
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage-all".to_string());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(format!("tag {} ({})", name, message));
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push-branch {} {}", remote, branch));
        Ok(())
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        self.record(format!("push-tags {}", remote));
        Ok(())
    }

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.record(format!("set-remote-url {} {}", remote, url));
        Ok(())
    }

    fn hard_reset(&self) -> Result<()> {
        self.record("hard-reset".to_string());
        Ok(())
    }
}
