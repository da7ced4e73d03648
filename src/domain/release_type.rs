use std::fmt;

/// The granularity of semantic version increment to apply.
///
/// Prerelease variants append or increment a channel-labelled prerelease
/// identifier instead of producing a stable version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
}

impl ReleaseType {
    /// Whether this release type produces a prerelease version
    pub fn is_prerelease(&self) -> bool {
        matches!(
            self,
            ReleaseType::PreMajor | ReleaseType::PreMinor | ReleaseType::PrePatch
        )
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::PreMajor => "premajor",
            ReleaseType::PreMinor => "preminor",
            ReleaseType::PrePatch => "prepatch",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of release type classification.
///
/// `Skip` means the working tree already is the latest release and the whole
/// flow must end without side effects. The orchestrator checks this variant
/// explicitly before continuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Skip,
    Proceed(ReleaseType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_display() {
        assert_eq!(ReleaseType::Major.to_string(), "major");
        assert_eq!(ReleaseType::Minor.to_string(), "minor");
        assert_eq!(ReleaseType::Patch.to_string(), "patch");
        assert_eq!(ReleaseType::PrePatch.to_string(), "prepatch");
    }

    #[test]
    fn test_is_prerelease() {
        assert!(!ReleaseType::Major.is_prerelease());
        assert!(!ReleaseType::Minor.is_prerelease());
        assert!(!ReleaseType::Patch.is_prerelease());
        assert!(ReleaseType::PreMajor.is_prerelease());
        assert!(ReleaseType::PreMinor.is_prerelease());
        assert!(ReleaseType::PrePatch.is_prerelease());
    }

    #[test]
    fn test_outcome_equality() {
        assert_eq!(ReleaseOutcome::Skip, ReleaseOutcome::Skip);
        assert_eq!(
            ReleaseOutcome::Proceed(ReleaseType::Minor),
            ReleaseOutcome::Proceed(ReleaseType::Minor)
        );
        assert_ne!(
            ReleaseOutcome::Skip,
            ReleaseOutcome::Proceed(ReleaseType::Patch)
        );
    }
}
