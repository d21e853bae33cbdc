//! Changelog guard.
//!
//! A version may only be released once the changelog mentions it. The check
//! is a plain substring test on the whole changelog.

use crate::error::{BumpError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of checking the changelog for a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The version appears somewhere in the changelog.
    Present,
    /// The changelog never mentions the version.
    Missing,
}

impl GuardOutcome {
    /// Converts `Missing` into [`BumpError::MissingChangelogEntry`].
    pub fn into_result(self, version: &str, changelog: &Path) -> Result<()> {
        match self {
            GuardOutcome::Present => Ok(()),
            GuardOutcome::Missing => Err(BumpError::MissingChangelogEntry {
                version: version.to_string(),
                changelog: changelog.to_path_buf(),
            }),
        }
    }
}

/// Checks whether `version` is mentioned in the changelog at `changelog`.
///
/// # Errors
///
/// Only I/O errors reading the changelog are returned as `Err`; a missing
/// entry is reported as [`GuardOutcome::Missing`].
pub fn check_changelog(changelog: &Path, version: &str) -> Result<GuardOutcome> {
    let content = fs::read_to_string(changelog).map_err(|e| {
        BumpError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read changelog {}: {}", changelog.display(), e),
        ))
    })?;

    Ok(if content.contains(version) {
        GuardOutcome::Present
    } else {
        log::debug!("{} not found in {}", version, changelog.display());
        GuardOutcome::Missing
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn changelog(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn test_version_present() {
        let (_temp, path) = changelog("# CHANGELOG\n\n## `jupyter-lsp 2.0.1`\n");
        assert_eq!(
            check_changelog(&path, "2.0.1").unwrap(),
            GuardOutcome::Present
        );
    }

    #[test]
    fn test_version_missing() {
        let (_temp, path) = changelog("# CHANGELOG\n\n## `jupyter-lsp 2.0.0`\n");
        let outcome = check_changelog(&path, "2.0.1").unwrap();
        assert_eq!(outcome, GuardOutcome::Missing);

        let err = outcome.into_result("2.0.1", &path).unwrap_err();
        assert!(err.to_string().contains("2.0.1 is absent in"));
        assert!(err.to_string().contains("CHANGELOG.md"));
    }

    #[test]
    fn test_substring_match_is_enough() {
        // A range mentioned anywhere counts, even inside prose
        let (_temp, path) = changelog("requires jupyterlab >=4.1.0,<5.0.0a0 now\n");
        assert_eq!(
            check_changelog(&path, ">=4.1.0,<5.0.0a0").unwrap(),
            GuardOutcome::Present
        );
    }

    #[test]
    fn test_missing_changelog_file() {
        let temp = TempDir::new().unwrap();
        let err = check_changelog(&temp.path().join("CHANGELOG.md"), "1.0.0").unwrap_err();
        assert!(matches!(err, BumpError::Io(_)));
        assert!(err.to_string().contains("Failed to read changelog"));
    }
}
