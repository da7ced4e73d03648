use crate::error::{ReleaseError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Local package manifest (`package.json`).
///
/// Read once at startup for the package name (registry lookups) and the
/// declared version (fallback when the registry is unreachable).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
}

impl PackageManifest {
    /// Load the manifest from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!("Cannot read manifest {}: {}", path.display(), e))
        })?;
        let manifest: PackageManifest = serde_json::from_str(&contents)?;
        Ok(manifest)
    }

    /// Parse the declared version as a semantic version
    pub fn semver(&self) -> Result<Version> {
        Version::parse(&self.version).map_err(|e| {
            ReleaseError::version(format!(
                "Manifest version '{}' is not a valid semver: {}",
                self.version, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "my-pkg", "version": "1.2.3"}"#).unwrap();

        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.name, "my-pkg");
        assert_eq!(manifest.version, "1.2.3");
        assert_eq!(manifest.semver().unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_load_manifest_extra_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name": "my-pkg", "version": "0.1.0", "scripts": {"build": "tsc"}}"#,
        )
        .unwrap();

        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.name, "my-pkg");
    }

    #[test]
    fn test_missing_manifest_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PackageManifest::load(&dir.path().join("package.json"));
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }

    #[test]
    fn test_invalid_semver_in_manifest() {
        let manifest = PackageManifest {
            name: "x".to_string(),
            version: "not-a-version".to_string(),
        };
        assert!(manifest.semver().is_err());
    }
}
