// Classification scenarios across the base-commit fallback chain
use semver::Version;

use bump_and_release::classifier::classify;
use bump_and_release::config::BranchPolicy;
use bump_and_release::domain::{ReleaseOutcome, ReleaseType, VersionInfo};
use bump_and_release::git::{CommitMessage, MockGit};

fn policy(prerelease: Option<&str>) -> BranchPolicy {
    BranchPolicy {
        name: "main".to_string(),
        prerelease: prerelease.map(|s| s.to_string()),
        skip_changelog: false,
        docs: None,
        bundles: Vec::new(),
    }
}

#[test]
fn test_mixed_history_takes_strongest_marker() {
    let git = MockGit::new("trigger").with_range(vec![
        CommitMessage::new("docs: update readme", ""),
        CommitMessage::new("feat: add widget", ""),
        CommitMessage::new("fix: rename config key", "BREAKING CHANGE: key renamed"),
    ]);
    let latest = VersionInfo::new(Version::new(1, 0, 0), Some("base".to_string()));

    let outcome = classify(&policy(None), &latest, "trigger", &git, &[]);
    assert_eq!(outcome, ReleaseOutcome::Proceed(ReleaseType::Major));
}

#[test]
fn test_base_resolved_through_tag_when_registry_has_no_hash() {
    // Registry fallback left git_head empty; the release tag still marks the
    // base, and the trigger sitting on that commit means nothing to release
    let git = MockGit::new("trigger").with_tag("v1.4.0", "trigger");
    let latest = VersionInfo::from_version(Version::new(1, 4, 0));

    let outcome = classify(&policy(None), &latest, "trigger", &git, &[]);
    assert_eq!(outcome, ReleaseOutcome::Skip);
}

#[test]
fn test_first_release_ranges_from_root_commit() {
    let git = MockGit::new("trigger")
        .with_root("root")
        .with_range(vec![CommitMessage::new("feat: initial feature set", "")]);
    let latest = VersionInfo::from_version(Version::new(0, 1, 0));

    let outcome = classify(&policy(None), &latest, "trigger", &git, &[]);
    assert_eq!(outcome, ReleaseOutcome::Proceed(ReleaseType::Minor));
}

#[test]
fn test_event_commits_only_substitute_for_an_empty_range() {
    // A resolvable history wins over the event payload
    let git = MockGit::new("trigger")
        .with_range(vec![CommitMessage::new("fix: one thing", "")]);
    let latest = VersionInfo::new(Version::new(1, 0, 0), Some("base".to_string()));
    let event = vec![CommitMessage::new("feat!: would be major", "")];

    let outcome = classify(&policy(None), &latest, "trigger", &git, &event);
    assert_eq!(outcome, ReleaseOutcome::Proceed(ReleaseType::Patch));
}

#[test]
fn test_prerelease_policy_never_skips() {
    // Even with the trigger equal to the released commit, a prerelease
    // branch always proceeds on its channel
    let git = MockGit::new("trigger");
    let latest = VersionInfo::new(Version::new(1, 0, 0), Some("trigger".to_string()));

    let outcome = classify(&policy(Some("beta")), &latest, "trigger", &git, &[]);
    assert_eq!(outcome, ReleaseOutcome::Proceed(ReleaseType::PrePatch));
}
