use crate::domain::VersionInfo;
use crate::git::GitClient;
use crate::ui;

/// Map the latest published version to the commit it was cut from.
///
/// Resolution order: the registry-reported `gitHead` when present, then the
/// commit tag `v<version>` points at, then the repository's root commit as a
/// synthetic baseline for first releases. `None` means the hash is unknown
/// and callers cannot compute a commit range.
pub fn resolve_base_commit(git: &dyn GitClient, latest: &VersionInfo) -> Option<String> {
    if let Some(head) = &latest.git_head {
        return Some(head.clone());
    }

    let tag_name = format!("v{}", latest.version);
    match git.tag_commit(&tag_name) {
        Ok(Some(hash)) => return Some(hash),
        Ok(None) => {
            ui::display_warning(&format!(
                "Tag {} not found, falling back to root commit",
                tag_name
            ));
        }
        Err(e) => {
            ui::display_warning(&format!("Tag lookup for {} failed: {}", tag_name, e));
        }
    }

    match git.root_commit() {
        Ok(Some(hash)) => Some(hash),
        Ok(None) => {
            ui::display_warning("Cannot find a commit for the latest version");
            None
        }
        Err(e) => {
            ui::display_warning(&format!("Root commit lookup failed: {}", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGit;
    use semver::Version;

    #[test]
    fn test_git_head_is_trusted_directly() {
        // No tags configured: gitHead short-circuits before any git lookup
        let git = MockGit::new("head");
        let latest = VersionInfo::new(Version::new(1, 0, 0), Some("abc123".to_string()));
        assert_eq!(resolve_base_commit(&git, &latest).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_tag_lookup_when_no_git_head() {
        let git = MockGit::new("head").with_tag("v1.2.0", "tagged-commit");
        let latest = VersionInfo::from_version(Version::new(1, 2, 0));
        assert_eq!(
            resolve_base_commit(&git, &latest).as_deref(),
            Some("tagged-commit")
        );
    }

    #[test]
    fn test_missing_tag_falls_back_to_root_commit() {
        let git = MockGit::new("head").with_root("root-commit");
        let latest = VersionInfo::from_version(Version::new(1, 0, 0));
        assert_eq!(
            resolve_base_commit(&git, &latest).as_deref(),
            Some("root-commit")
        );
    }

    #[test]
    fn test_unknown_when_nothing_resolves() {
        let git = MockGit::new("head");
        let latest = VersionInfo::from_version(Version::new(1, 0, 0));
        assert_eq!(resolve_base_commit(&git, &latest), None);
    }
}
