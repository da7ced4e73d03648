use crate::error::{ReleaseError, Result};
use glob::{glob_with, MatchOptions};
use regex::Regex;
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrite the version string in every file matched by the configured globs.
///
/// The rewrite is a single-line textual substitution of the JSON-style
/// `"version": "..."` pair, not a structural edit. Patterns are resolved
/// relative to the workspace root; dotfiles are matched. Returns the matched
/// files so they can be added to the release change-set.
pub fn rewrite_version_files(
    workspace: &Path,
    patterns: &[String],
    version: &Version,
) -> Result<Vec<PathBuf>> {
    let re = Regex::new(r#""version":\s*"[^"]+""#)
        .map_err(|e| ReleaseError::config(format!("Invalid version pattern: {}", e)))?;
    let replacement = format!(r#""version": "{}""#, version);

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut changed = Vec::new();
    for pattern in patterns {
        let full_pattern = workspace.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let paths = glob_with(&full_pattern, options)
            .map_err(|e| ReleaseError::config(format!("Invalid glob '{}': {}", pattern, e)))?;

        for entry in paths {
            let path = entry
                .map_err(|e| ReleaseError::config(format!("Glob '{}' failed: {}", pattern, e)))?;
            if !path.is_file() {
                continue;
            }

            let contents = fs::read_to_string(&path)?;
            let rewritten = re.replace_all(&contents, replacement.as_str());
            if rewritten != contents {
                fs::write(&path, rewritten.as_bytes())?;
            }
            changed.push(path);
        }
    }

    Ok(changed)
}
