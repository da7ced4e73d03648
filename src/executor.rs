use crate::bump;
use crate::commands::CommandRunner;
use crate::config::{BranchPolicy, BundleConfig, BundleKind};
use crate::error::Result;
use crate::git::GitClient;
use crate::ui;
use semver::Version;
use std::path::Path;

/// Executes the effectful release pipeline: bump files, changelog, commit
/// and tag, publish bundles, push. Each step delegates to a collaborator;
/// the first failing step aborts the remainder.
pub struct ReleaseExecutor<'a> {
    pub workspace: &'a Path,
    pub git: &'a dyn GitClient,
    pub runner: &'a dyn CommandRunner,
}

impl ReleaseExecutor<'_> {
    /// Run the release pipeline for a planned version.
    ///
    /// A tag or commit created before a later step fails is not un-created;
    /// the caller's hard reset only discards uncommitted changes.
    pub fn execute(
        &self,
        version: &Version,
        policy: &BranchPolicy,
        bump_files: &[String],
        branch: &str,
    ) -> Result<()> {
        let changed = bump::rewrite_version_files(self.workspace, bump_files, version)?;
        ui::display_status(&format!("Bumped version in {} files", changed.len()));

        if !policy.skip_changelog {
            let changelog = self.workspace.join("CHANGELOG.md");
            self.runner.run(
                &format!("npx standard-changelog -i {} -s", changelog.display()),
                self.workspace,
            )?;
            ui::display_status("Change log generated");
        }

        ui::display_status("Committing...");
        self.git.stage_all()?;
        self.git.commit(&format!("chore(release): {}", version))?;
        ui::display_status("Tagging...");
        self.git
            .create_annotated_tag(&format!("v{}", version), "Version release")?;

        self.publish_bundles(policy)?;

        ui::display_status("Pushing changes...");
        self.git.push_branch("origin", branch)?;
        ui::display_status("Pushing tags...");
        self.git.push_tags("origin")?;

        Ok(())
    }

    /// Publish each bundle in order, tagging prereleases with the channel
    /// label instead of "latest"
    fn publish_bundles(&self, policy: &BranchPolicy) -> Result<()> {
        let dist_tag = policy.prerelease.as_deref().unwrap_or("latest");

        for bundle in &policy.bundles {
            if let Some(command) = &bundle.prepublish {
                ui::display_status(&format!("Running prepublish command: {}...", command));
                self.runner.run(command, self.workspace)?;
            }
            match &bundle.kind {
                BundleKind::Npm => {
                    ui::display_status(&format!("Publishing {}...", bundle.folder));
                    self.runner.run(
                        &format!(
                            "npm publish {} --access public --tag {}",
                            bundle.folder, dist_tag
                        ),
                        self.workspace,
                    )?;
                }
                BundleKind::Other(kind) => {
                    ui::display_warning(&format!(
                        "Bundle type: {} is not currently supported",
                        kind
                    ));
                }
            }
        }

        Ok(())
    }

    /// When the bump is skipped, prepublish commands still run so dependent
    /// build artifacts stay fresh
    pub fn run_prepublish_only(&self, bundles: &[BundleConfig]) -> Result<()> {
        for bundle in bundles {
            if let Some(command) = &bundle.prepublish {
                ui::display_status(&format!(
                    "Still running prepublish command: {}...",
                    command
                ));
                self.runner.run(command, self.workspace)?;
            }
        }
        Ok(())
    }
}
