use semver::Version;

/// The latest known published version of the package.
///
/// Sourced from the package registry when reachable, or from the local
/// package manifest as a fallback (in which case `git_head` is unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// The published version
    pub version: Version,
    /// Commit the version was cut from, when the registry reports it
    pub git_head: Option<String>,
}

impl VersionInfo {
    pub fn new(version: Version, git_head: Option<String>) -> Self {
        VersionInfo { version, git_head }
    }

    /// A version with no known source commit (the manifest fallback path)
    pub fn from_version(version: Version) -> Self {
        VersionInfo {
            version,
            git_head: None,
        }
    }
}
