// Configuration loading and branch policy resolution from real files
use std::fs;

use bump_and_release::config::{BundleKind, DocsKind, ReleaseConfig};
use bump_and_release::error::ReleaseError;

const FULL_CONFIG: &str = r#"{
    "branches": [
        {"name": "main", "docs": {"dest": "stable"}},
        {
            "name": "next",
            "prerelease": "beta",
            "skipChangeLog": true,
            "bundles": [{"type": "npm", "folder": "dist/next"}]
        }
    ],
    "docs": {
        "type": "ghpages",
        "dir": "dist/demo",
        "dest": "latest",
        "prepublish": {"preset": "angular", "app": "showcase"}
    },
    "bumpFiles": ["package.json", "projects/*/package.json"],
    "bundles": [{"type": "npm", "folder": "dist", "prepublish": "npm run build"}]
}"#;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bump.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_full_config_from_file() {
    let (_dir, path) = write_config(FULL_CONFIG);
    let config = ReleaseConfig::load(&path).unwrap();

    assert_eq!(config.branches.len(), 2);
    assert_eq!(config.bump_files.len(), 2);
    assert_eq!(config.bundles.len(), 1);
    assert_eq!(config.bundles[0].kind, BundleKind::Npm);
    assert_eq!(
        config.bundles[0].prepublish.as_deref(),
        Some("npm run build")
    );

    let docs = config.docs.as_ref().unwrap();
    assert_eq!(docs.kind, Some(DocsKind::GhPages));
    assert_eq!(docs.dir.as_deref(), Some("dist/demo"));
}

#[test]
fn test_main_policy_merges_shared_docs_with_local_override() {
    let (_dir, path) = write_config(FULL_CONFIG);
    let config = ReleaseConfig::load(&path).unwrap();

    let policy = config.resolve_branch_policy("main").unwrap();
    assert!(policy.prerelease.is_none());
    assert!(!policy.skip_changelog);
    // Shared bundles apply when the branch declares none
    assert_eq!(policy.bundles.len(), 1);
    assert_eq!(policy.bundles[0].folder, "dist");

    // dest comes from the branch, everything else from the shared docs block
    let docs = policy.docs.unwrap();
    assert_eq!(docs.dest.as_deref(), Some("stable"));
    assert_eq!(docs.kind, Some(DocsKind::GhPages));
    assert_eq!(docs.dir.as_deref(), Some("dist/demo"));
    assert!(docs.prepublish.is_some());
}

#[test]
fn test_prerelease_policy_overrides_bundles() {
    let (_dir, path) = write_config(FULL_CONFIG);
    let config = ReleaseConfig::load(&path).unwrap();

    let policy = config.resolve_branch_policy("next").unwrap();
    assert_eq!(policy.prerelease.as_deref(), Some("beta"));
    assert!(policy.skip_changelog);
    // The branch's own bundle list replaces the shared one
    assert_eq!(policy.bundles.len(), 1);
    assert_eq!(policy.bundles[0].folder, "dist/next");
}

#[test]
fn test_branch_match_is_exact_and_case_sensitive() {
    let (_dir, path) = write_config(FULL_CONFIG);
    let config = ReleaseConfig::load(&path).unwrap();

    assert!(config.resolve_branch_policy("Main").is_none());
    assert!(config.resolve_branch_policy("main2").is_none());
    assert!(config.resolve_branch_policy("develop").is_none());
}

#[test]
fn test_minimal_config() {
    let (_dir, path) = write_config(r#"{"branches": [{"name": "main"}]}"#);
    let config = ReleaseConfig::load(&path).unwrap();

    assert!(config.docs.is_none());
    assert!(config.bump_files.is_empty());
    assert!(config.bundles.is_empty());

    let policy = config.resolve_branch_policy("main").unwrap();
    assert!(policy.docs.is_none());
    assert!(policy.bundles.is_empty());
}

#[test]
fn test_missing_config_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReleaseConfig::load(&dir.path().join("bump.json"));
    assert!(matches!(result, Err(ReleaseError::Config(_))));
}

#[test]
fn test_malformed_config_is_rejected() {
    let (_dir, path) = write_config("{not json");
    assert!(ReleaseConfig::load(&path).is_err());
}

#[test]
fn test_unknown_bundle_kind_is_preserved() {
    let (_dir, path) = write_config(
        r#"{
            "branches": [{"name": "main"}],
            "bundles": [{"type": "crates", "folder": "."}]
        }"#,
    );
    let config = ReleaseConfig::load(&path).unwrap();
    assert_eq!(
        config.bundles[0].kind,
        BundleKind::Other("crates".to_string())
    );
}
