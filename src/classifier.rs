use crate::config::BranchPolicy;
use crate::domain::{ReleaseOutcome, ReleaseType, VersionInfo};
use crate::git::{CommitMessage, GitClient};
use crate::hash;
use crate::ui;

/// Classify the release type from the commit history since the last release.
///
/// Three possible outcomes:
/// - a prerelease channel on the policy short-circuits to a prerelease type
///   without any commit inspection
/// - a base commit equal to the trigger commit means the working tree already
///   is the latest release: `Skip`, and the caller must abort the whole flow
/// - otherwise the message corpus between base and trigger decides the type,
///   with the trigger event's commit list as a substitute when no history is
///   resolvable
pub fn classify(
    policy: &BranchPolicy,
    latest: &VersionInfo,
    trigger_sha: &str,
    git: &dyn GitClient,
    event_commits: &[CommitMessage],
) -> ReleaseOutcome {
    if policy.prerelease.is_some() {
        return ReleaseOutcome::Proceed(ReleaseType::PrePatch);
    }

    let mut messages: Vec<CommitMessage> = Vec::new();

    if let Some(base) = hash::resolve_base_commit(git, latest) {
        if base == trigger_sha {
            ui::display_status("Commit matches latest release, skipping.");
            return ReleaseOutcome::Skip;
        }

        match git.commits_between(&base, trigger_sha) {
            Ok(range) => messages = range,
            Err(e) => {
                // Unresolvable history is a degraded path, not a failure
                ui::display_warning(&format!("No logs found: {}", e));
            }
        }
    }

    if messages.is_empty() && !event_commits.is_empty() {
        messages = event_commits.to_vec();
    }

    ReleaseOutcome::Proceed(classify_messages(&messages))
}

/// Decide the release type from a message corpus.
///
/// Any message carrying the literal `BREAKING CHANGE` marker or the `!:`
/// token (case-sensitive, subject or body) means major; otherwise any subject
/// starting with `feat` (case-insensitive) means minor; otherwise patch. The
/// scan is any-match, so message ordering never affects the outcome.
pub fn classify_messages(messages: &[CommitMessage]) -> ReleaseType {
    let has_breaking = messages.iter().any(|msg| {
        let text = msg.full_text();
        text.contains("BREAKING CHANGE") || text.contains("!:")
    });
    if has_breaking {
        return ReleaseType::Major;
    }

    let has_feature = messages.iter().any(|msg| {
        msg.subject
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("feat"))
    });
    if has_feature {
        return ReleaseType::Minor;
    }

    ReleaseType::Patch
}
