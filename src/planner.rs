use crate::domain::{ReleaseType, VersionInfo};
use crate::error::{ReleaseError, Result};
use semver::{Prerelease, Version};

/// Compute the next version from the latest published version and a
/// classified release type.
///
/// Stable increments follow standard semantic-version rules: major resets
/// minor and patch, minor resets patch, and every stable increment strips any
/// prerelease identifier. Prerelease increments are based off the latest
/// published version, except when the local manifest version is already at or
/// past the suggestion: then the local version's prerelease counter is
/// incremented instead, so repeated CI runs on the same commit do not
/// double-increment while the registry catches up.
pub fn next_version(
    latest: &VersionInfo,
    local: &Version,
    release_type: ReleaseType,
    channel: Option<&str>,
) -> Result<Version> {
    let base = &latest.version;

    let next = match release_type {
        ReleaseType::Major => Version::new(base.major + 1, 0, 0),
        ReleaseType::Minor => Version::new(base.major, base.minor + 1, 0),
        ReleaseType::Patch => Version::new(base.major, base.minor, base.patch + 1),
        ReleaseType::PreMajor | ReleaseType::PreMinor | ReleaseType::PrePatch => {
            let channel = channel.ok_or_else(|| {
                ReleaseError::version("Prerelease increment requires a channel label")
            })?;

            let mut suggested = match release_type {
                ReleaseType::PreMajor => Version::new(base.major + 1, 0, 0),
                ReleaseType::PreMinor => Version::new(base.major, base.minor + 1, 0),
                _ => Version::new(base.major, base.minor, base.patch + 1),
            };
            suggested.pre = parse_prerelease(&format!("{}.0", channel))?;

            if local >= &suggested {
                increment_prerelease(local, channel)?
            } else {
                suggested
            }
        }
    };

    Ok(next)
}

/// Increment a version's prerelease counter for a channel.
///
/// A version already on the channel bumps its numeric counter; a version on
/// another channel (or a stable version, after a patch bump) restarts at
/// `<channel>.0`.
pub fn increment_prerelease(version: &Version, channel: &str) -> Result<Version> {
    let mut next = version.clone();

    if version.pre.is_empty() {
        next.patch += 1;
        next.pre = parse_prerelease(&format!("{}.0", channel))?;
        return Ok(next);
    }

    let identifiers: Vec<&str> = version.pre.as_str().split('.').collect();
    if identifiers[0] == channel {
        let counter = identifiers
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);
        next.pre = parse_prerelease(&format!("{}.{}", channel, counter + 1))?;
    } else {
        next.pre = parse_prerelease(&format!("{}.0", channel))?;
    }

    Ok(next)
}

fn parse_prerelease(label: &str) -> Result<Prerelease> {
    Prerelease::new(label).map_err(|e| {
        ReleaseError::version(format!("Invalid prerelease identifier '{}': {}", label, e))
    })
}
