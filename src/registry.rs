use crate::domain::VersionInfo;
use crate::error::{ReleaseError, Result};
use crate::manifest::PackageManifest;
use crate::ui;
use semver::Version;
use serde::Deserialize;
use std::time::Duration;

/// Default public registry queried when no override is configured
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Package registry lookup for the currently published version
pub trait Registry: Send + Sync {
    /// Fetch the version a distribution tag points at, with its source
    /// commit when the registry reports one
    fn fetch_version_info(&self, package: &str, dist_tag: &str) -> Result<VersionInfo>;
}

/// Version document returned by the registry for a dist-tag lookup
#[derive(Debug, Deserialize)]
struct PackumentVersion {
    version: String,
    #[serde(rename = "gitHead", default)]
    git_head: Option<String>,
}

/// npm-compatible registry over HTTP
pub struct NpmRegistry {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl NpmRegistry {
    /// Create a registry client, using the default public endpoint unless an
    /// override is given
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ReleaseError::registry(format!("Cannot build HTTP client: {}", e)))?;
        Ok(NpmRegistry { base_url, client })
    }
}

impl Registry for NpmRegistry {
    fn fetch_version_info(&self, package: &str, dist_tag: &str) -> Result<VersionInfo> {
        let url = format!("{}/{}/{}", self.base_url, package, dist_tag);
        let response = self.client.get(&url).send()?.error_for_status()?;
        let doc: PackumentVersion = response.json()?;
        let version = Version::parse(&doc.version).map_err(|e| {
            ReleaseError::registry(format!(
                "Registry returned unparsable version '{}': {}",
                doc.version, e
            ))
        })?;
        Ok(VersionInfo::new(version, doc.git_head))
    }
}

/// Resolve the latest published version, falling back to the local manifest.
///
/// Registry failures of any kind (network, HTTP status, parse) degrade to
/// the manifest version with a warning; registry unavailability never fails
/// the release on its own.
pub fn resolve_latest(
    registry: &dyn Registry,
    manifest: &PackageManifest,
    dist_tag: &str,
) -> Result<VersionInfo> {
    match registry.fetch_version_info(&manifest.name, dist_tag) {
        Ok(info) => Ok(info),
        Err(e) => {
            ui::display_warning(&format!(
                "Unable to find latest info in registry, using package manifest as fallback: {}",
                e
            ));
            Ok(VersionInfo::from_version(manifest.semver()?))
        }
    }
}
