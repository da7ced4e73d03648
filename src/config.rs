use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default name of the configuration document at the workspace root
pub const CONFIG_FILE_NAME: &str = "bump.json";

/// The global release configuration document (`bump.json`).
///
/// Maps branch names to release policies and carries shared defaults for
/// docs deployment, version-bump file globs, and publishable bundles.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseConfig {
    #[serde(default)]
    pub branches: Vec<BranchEntry>,

    /// Shared docs defaults, merged under each branch's own docs settings
    #[serde(default)]
    pub docs: Option<DocsConfig>,

    /// Glob patterns of files whose `"version": "..."` line gets rewritten
    #[serde(default)]
    pub bump_files: Vec<String>,

    /// Shared bundle list, used when a branch declares none of its own
    #[serde(default)]
    pub bundles: Vec<BundleConfig>,
}

/// One branch's policy fragment as written in the configuration document
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BranchEntry {
    pub name: String,

    /// Prerelease channel label (e.g. "beta"), used both as the version
    /// suffix and the registry distribution tag
    #[serde(default)]
    pub prerelease: Option<String>,

    #[serde(default)]
    pub skip_change_log: bool,

    #[serde(default)]
    pub docs: Option<DocsConfig>,

    #[serde(default)]
    pub bundles: Option<Vec<BundleConfig>>,
}

/// Kind of publishable bundle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BundleKind {
    Npm,
    Other(String),
}

impl From<String> for BundleKind {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("npm") {
            BundleKind::Npm
        } else {
            BundleKind::Other(s)
        }
    }
}

impl From<BundleKind> for String {
    fn from(kind: BundleKind) -> String {
        match kind {
            BundleKind::Npm => "npm".to_string(),
            BundleKind::Other(s) => s,
        }
    }
}

/// One independently publishable artifact
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BundleConfig {
    #[serde(rename = "type")]
    pub kind: BundleKind,

    pub folder: String,

    /// Command to run before publishing this bundle
    #[serde(default)]
    pub prepublish: Option<String>,
}

/// Kind of docs/demo deployment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum DocsKind {
    GhPages,
    Other(String),
}

impl From<String> for DocsKind {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("ghpages") {
            DocsKind::GhPages
        } else {
            DocsKind::Other(s)
        }
    }
}

impl From<DocsKind> for String {
    fn from(kind: DocsKind) -> String {
        match kind {
            DocsKind::GhPages => "ghpages".to_string(),
            DocsKind::Other(s) => s,
        }
    }
}

/// A docs build step: either a raw shell command or a named preset that
/// expands to a fixed build-tool invocation
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum DocsBuildStep {
    Command(String),
    Preset {
        preset: String,
        #[serde(default)]
        app: Option<String>,
    },
}

/// `prepublish` accepts a single step or a list of steps
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum DocsBuild {
    Single(DocsBuildStep),
    Multiple(Vec<DocsBuildStep>),
}

impl DocsBuild {
    pub fn steps(&self) -> Vec<DocsBuildStep> {
        match self {
            DocsBuild::Single(step) => vec![step.clone()],
            DocsBuild::Multiple(steps) => steps.clone(),
        }
    }
}

/// Docs/demo deployment settings.
///
/// Every field is optional in the document so that the shared default and a
/// branch-local fragment can each fill in part of the picture.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocsConfig {
    #[serde(rename = "type", default)]
    pub kind: Option<DocsKind>,

    /// Directory to publish
    #[serde(default)]
    pub dir: Option<String>,

    /// Destination path under the pages branch
    #[serde(default)]
    pub dest: Option<String>,

    /// Build steps run before publishing
    #[serde(default)]
    pub prepublish: Option<DocsBuild>,

    /// Extra options forwarded to the pages publisher
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Resolved policy for one branch, with shared defaults already merged in
#[derive(Debug, Clone, PartialEq)]
pub struct BranchPolicy {
    pub name: String,
    pub prerelease: Option<String>,
    pub skip_changelog: bool,
    pub docs: Option<DocsConfig>,
    pub bundles: Vec<BundleConfig>,
}

impl ReleaseConfig {
    /// Load the configuration document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!(
                "Cannot read configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: ReleaseConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the policy for the current branch.
    ///
    /// The match is exact and case-sensitive. `None` means the branch is not
    /// configured for releases, which is a normal skip outcome rather than an
    /// error. Shared `docs` defaults are merged under the branch's own docs
    /// settings; branch-local bundles take precedence over the shared list.
    pub fn resolve_branch_policy(&self, branch: &str) -> Option<BranchPolicy> {
        let entry = self.branches.iter().find(|it| it.name == branch)?;

        Some(BranchPolicy {
            name: entry.name.clone(),
            prerelease: entry.prerelease.clone(),
            skip_changelog: entry.skip_change_log,
            docs: merge_docs(self.docs.as_ref(), entry.docs.as_ref()),
            bundles: entry
                .bundles
                .clone()
                .unwrap_or_else(|| self.bundles.clone()),
        })
    }
}

/// Merge shared docs defaults with a branch-local override.
///
/// Precedence is field-by-field: a field set in the branch fragment wins,
/// otherwise the shared default applies. No docs on either side means docs
/// are disabled for the branch.
pub fn merge_docs(shared: Option<&DocsConfig>, local: Option<&DocsConfig>) -> Option<DocsConfig> {
    match (shared, local) {
        (None, None) => None,
        (Some(shared), None) => Some(shared.clone()),
        (None, Some(local)) => Some(local.clone()),
        (Some(shared), Some(local)) => Some(DocsConfig {
            kind: local.kind.clone().or_else(|| shared.kind.clone()),
            dir: local.dir.clone().or_else(|| shared.dir.clone()),
            dest: local.dest.clone().or_else(|| shared.dest.clone()),
            prepublish: local
                .prepublish
                .clone()
                .or_else(|| shared.prepublish.clone()),
            options: if local.options.is_empty() {
                shared.options.clone()
            } else {
                local.options.clone()
            },
        }),
    }
}
