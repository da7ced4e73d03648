use crate::error::{ReleaseError, Result};
use crate::git::{CommitMessage, GitClient};
use git2::{IndexAddOption, ObjectType, Oid, Repository, ResetType};
use std::path::Path;

/// Real [GitClient] implementation backed by the `git2` crate
pub struct Git2Client {
    repo: Repository,
}

impl Git2Client {
    /// Open the repository at (or above) the given path
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| ReleaseError::config(format!("Not in a git repository: {}", e)))?;
        Ok(Git2Client { repo })
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        head.target()
            .ok_or_else(|| ReleaseError::config("HEAD is detached or invalid".to_string()))
    }

    /// Credentials callback shared by push operations.
    ///
    /// Tries SSH keys from ~/.ssh/, then the SSH agent, then default
    /// credentials. Token-authenticated HTTPS remotes carry the token in the
    /// URL and fall through to the default path.
    fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }
}

impl GitClient for Git2Client {
    fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self.repo.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.head_oid()?.to_string())
    }

    fn tag_commit(&self, tag_name: &str) -> Result<Option<String>> {
        let reference = match self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
        {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };
        // Peel through annotated tag objects to the underlying commit
        let commit = reference.peel_to_commit()?;
        Ok(Some(commit.id().to_string()))
    }

    fn root_commit(&self) -> Result<Option<String>> {
        let head_oid = match self.repo.head().ok().and_then(|h| h.target()) {
            Some(oid) => oid,
            None => return Ok(None),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        for oid in revwalk {
            let oid = match oid {
                Ok(oid) => oid,
                Err(_) => continue,
            };
            if let Ok(commit) = self.repo.find_commit(oid) {
                if commit.parent_count() == 0 {
                    return Ok(Some(oid.to_string()));
                }
            }
        }

        Ok(None)
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitMessage>> {
        let from_oid = Oid::from_str(from)?;
        let to_oid = Oid::from_str(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Ok(commit) = self.repo.find_commit(oid) {
                messages.push(CommitMessage {
                    subject: commit.summary().unwrap_or_default().to_string(),
                    body: commit.body().unwrap_or_default().to_string(),
                });
            }
        }

        // Reverse to get chronological order (oldest first)
        messages.reverse();
        Ok(messages)
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.find_commit(self.head_oid()?)?;
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::config(format!("No remote named '{}' found", remote)))?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(Self::remote_callbacks());

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| map_push_error(e, &format!("branch '{}'", branch)))?;
        Ok(())
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        let tag_names: Vec<String> = self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(|name| format!("refs/tags/{0}:refs/tags/{0}", name))
            .collect();

        if tag_names.is_empty() {
            return Ok(());
        }

        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::config(format!("No remote named '{}' found", remote)))?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(Self::remote_callbacks());

        let refspecs: Vec<&str> = tag_names.iter().map(|s| s.as_str()).collect();
        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| map_push_error(e, "tags"))?;
        Ok(())
    }

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.repo.remote_set_url(remote, url)?;
        Ok(())
    }

    fn hard_reset(&self) -> Result<()> {
        let head = self.repo.head()?.peel(ObjectType::Commit)?;
        self.repo.reset(&head, ResetType::Hard, None)?;
        Ok(())
    }
}

// SAFETY: git2::Repository is Send but not Sync because libgit2 objects must
// not be mutated from two threads at once. The release flow is strictly
// sequential; Git2Client is never shared across threads.
unsafe impl Sync for Git2Client {}

fn map_push_error(e: git2::Error, what: &str) -> ReleaseError {
    if e.class() == git2::ErrorClass::Net {
        ReleaseError::command(format!("Network error while pushing {}: {}", what, e))
    } else if e.class() == git2::ErrorClass::Reference {
        ReleaseError::command(format!("Reference error while pushing {}: {}", what, e))
    } else {
        ReleaseError::command(format!("Failed to push {}: {}", what, e))
    }
}
