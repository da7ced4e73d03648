//! Top-level release workflow
//!
//! Wires the decision components (branch policy, version resolution,
//! classification, planning) to the effectful executor. This is the only
//! error boundary: any step failure triggers a hard reset of the working
//! tree and surfaces the error as the run's failure reason.

use crate::classifier;
use crate::commands::CommandRunner;
use crate::config::ReleaseConfig;
use crate::context::CiContext;
use crate::docs::{self, PagesPublisher, PAGES_USER_NAME};
use crate::domain::ReleaseOutcome;
use crate::error::Result;
use crate::executor::ReleaseExecutor;
use crate::git::GitClient;
use crate::manifest::PackageManifest;
use crate::planner;
use crate::registry::{self, Registry};
use crate::ui;
use semver::Version;

/// One release run's inputs
pub struct ReleaseRequest<'a> {
    pub ctx: &'a CiContext,
    pub config: &'a ReleaseConfig,
    pub manifest: &'a PackageManifest,
    /// Skip bump/changelog/commit/publish/push, but keep running bundle
    /// prepublish commands
    pub skip_bump: bool,
    /// Skip the docs/demo deployment
    pub skip_docs: bool,
}

/// How a release run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseReport {
    /// The branch has no policy; nothing was attempted
    NotConfigured,
    /// The trigger commit already is the latest release; nothing was done
    AlreadyReleased,
    /// The bump was skipped; only prepublish commands (and possibly docs) ran
    PrepublishOnly,
    /// A release was cut at this version
    Released { version: Version },
}

/// Run the release flow, hard-resetting the working tree on any failure.
///
/// Partial effects before the failing step (a commit or tag already created)
/// are not un-created; only uncommitted changes are discarded.
pub fn run_release(
    request: &ReleaseRequest<'_>,
    git: &dyn GitClient,
    registry: &dyn Registry,
    runner: &dyn CommandRunner,
    pages: &dyn PagesPublisher,
) -> Result<ReleaseReport> {
    match release_flow(request, git, registry, runner, pages) {
        Ok(report) => Ok(report),
        Err(e) => {
            if let Err(reset_err) = git.hard_reset() {
                ui::display_warning(&format!("Working tree reset failed: {}", reset_err));
            }
            Err(e)
        }
    }
}

fn release_flow(
    request: &ReleaseRequest<'_>,
    git: &dyn GitClient,
    registry: &dyn Registry,
    runner: &dyn CommandRunner,
    pages: &dyn PagesPublisher,
) -> Result<ReleaseReport> {
    let ctx = request.ctx;

    git.set_identity(PAGES_USER_NAME, &ctx.git_user_email)?;
    if let Some(token) = &ctx.npm_token {
        runner.run(
            &format!("npm config set //registry.npmjs.org/:_authToken {}", token),
            &ctx.workspace,
        )?;
    }

    let policy = match request.config.resolve_branch_policy(&ctx.branch) {
        Some(policy) => policy,
        None => {
            ui::display_status("Skipped bump and release: branch not configured!");
            return Ok(ReleaseReport::NotConfigured);
        }
    };

    let latest = registry::resolve_latest(registry, request.manifest, "latest")?;
    ui::display_status(&format!("Latest version from registry: {}", latest.version));

    let outcome = classifier::classify(
        &policy,
        &latest,
        &ctx.trigger_sha,
        git,
        &ctx.event_commit_messages(),
    );
    let release_type = match outcome {
        ReleaseOutcome::Skip => return Ok(ReleaseReport::AlreadyReleased),
        ReleaseOutcome::Proceed(release_type) => release_type,
    };
    ui::display_status(&format!("Determined release type: {}", release_type));

    let local = request.manifest.semver()?;
    let version = planner::next_version(
        &latest,
        &local,
        release_type,
        policy.prerelease.as_deref(),
    )?;
    ui::display_status(&format!("Next version is: {}", version));

    let executor = ReleaseExecutor {
        workspace: &ctx.workspace,
        git,
        runner,
    };

    if request.skip_bump {
        ui::display_status("Skipping bump and publish");
        executor.run_prepublish_only(&request.config.bundles)?;
    } else {
        executor.execute(&version, &policy, &request.config.bump_files, &ctx.branch)?;
        ui::display_success("Published bundles");
    }

    if request.skip_docs {
        ui::display_status("Skipping docs/demo deploy");
    } else if let Some(docs_config) = &policy.docs {
        let remote_url = match (&ctx.github_token, &ctx.github_repository) {
            (Some(token), Some(repo)) => {
                Some(format!("https://git:{}@github.com/{}.git", token, repo))
            }
            _ => None,
        };
        docs::deploy_docs(
            &ctx.workspace,
            docs_config,
            &version,
            &request.manifest.name,
            &ctx.git_user_email,
            remote_url.as_deref(),
            git,
            runner,
            pages,
        )?;
        ui::display_success("Docs deployed");
    }

    if request.skip_bump {
        Ok(ReleaseReport::PrepublishOnly)
    } else {
        Ok(ReleaseReport::Released { version })
    }
}
