//! Error types for bump-versions.
//!
//! All operations return `Result<T>` which aliases `Result<T, BumpError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from version bump operations.
#[derive(Debug, Error)]
pub enum BumpError {
    /// Package key not present in the registry.
    #[error("Package '{0}' not found")]
    PackageNotFound(String),

    /// New version was empty after trimming.
    #[error("New version for '{0}' cannot be empty")]
    EmptyVersion(String),

    /// The changelog does not mention the new version yet.
    #[error(
        "{version} is absent in {}. Please update the changelog first.",
        changelog.display()
    )]
    MissingChangelogEntry { version: String, changelog: PathBuf },

    /// One of a pair of required arguments was given without the other.
    #[error("{given} requires {missing}")]
    MissingArgument {
        given: &'static str,
        missing: &'static str,
    },

    /// Current version could not be read from its source file.
    #[error("Could not find {what} in {}", path.display())]
    VersionNotFound { what: String, path: PathBuf },

    /// Config file has a value of the wrong shape.
    #[error("Invalid config '{0}': {1}")]
    InvalidConfig(String, String),

    /// Strict mode: a location did not match exactly once.
    #[error("Expected exactly one match of '{template}' in {}, found {count}", path.display())]
    UnexpectedMatches {
        template: String,
        path: PathBuf,
        count: usize,
    },

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML parse error in the config file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bump-versions operations.
pub type Result<T> = std::result::Result<T, BumpError>;
