//! Version bumps for registered packages.
//!
//! A bump runs in two steps. [`Bumper::stage`] checks the changelog and
//! computes every substitution into a [`Changeset`] without touching the
//! disk; [`Bumper::change_version`] then commits it (or prints diffs when
//! dry) and prints a summary.

pub mod guard;
pub mod interactive;
pub mod substitute;

pub use guard::{GuardOutcome, check_changelog};
pub use interactive::update_interactively;
pub use substitute::{Substitution, replace_version};

use crate::config::VersionSource;
use crate::error::{BumpError, Result};
use crate::fs::{Changeset, display_path};
use crate::registry::PackageVersionInfo;
use std::io::Write;
use std::path::Path;

/// Flags shared by every bump in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Print diffs instead of writing.
    pub dry_run: bool,
    /// Fail unless every location matches exactly once.
    pub strict: bool,
}

/// Applies version changes within one project.
#[derive(Debug, Clone, Copy)]
pub struct Bumper<'a> {
    root: &'a Path,
    changelog: &'a Path,
    options: BumpOptions,
}

impl<'a> Bumper<'a> {
    pub fn new(source: &'a VersionSource, options: BumpOptions) -> Self {
        Self {
            root: &source.root,
            changelog: &source.changelog,
            options,
        }
    }

    /// Computes the edits for bumping `package` to `new_version`.
    ///
    /// # Errors
    ///
    /// - `EmptyVersion`: `new_version` is blank
    /// - `MissingChangelogEntry`: the changelog does not mention `new_version`
    /// - `UnexpectedMatches`: strict mode and a location matched zero or
    ///   several times
    /// - `Io`: the changelog or a location file cannot be read
    pub fn stage(&self, package: &PackageVersionInfo, new_version: &str) -> Result<Changeset> {
        if new_version.trim().is_empty() {
            return Err(BumpError::EmptyVersion(package.name.clone()));
        }

        check_changelog(self.changelog, new_version)?
            .into_result(new_version, self.changelog)?;

        if new_version == package.current_version {
            log::info!("{} is already at {}", package.name, new_version);
        }

        let mut changes = Changeset::new(self.root, self.options.dry_run);

        for location in &package.locations {
            let content = changes.read(&location.path)?;
            let sub = replace_version(&content, location, &package.current_version, new_version);

            if self.options.strict && sub.matches != 1 {
                return Err(BumpError::UnexpectedMatches {
                    template: sub.old_text,
                    path: location.path.clone(),
                    count: sub.matches,
                });
            }

            if sub.matches == 0 {
                log::warn!(
                    "No match for '{}' in {}",
                    sub.old_text,
                    display_path(&location.path, self.root)
                );
                changes.note_unmatched(&location.path, sub.old_text);
                continue;
            }

            log::debug!(
                "{} → {} ({} match{}) in {}",
                sub.old_text,
                sub.new_text,
                sub.matches,
                if sub.matches == 1 { "" } else { "es" },
                location.path.display()
            );
            changes.update_file(&location.path, sub.content)?;
        }

        Ok(changes)
    }

    /// Bumps `package` to `new_version`, writing files or printing diffs to
    /// `out`.
    ///
    /// Nothing is written unless every check in [`stage`](Self::stage)
    /// passes. Files are then written one by one without rollback.
    pub fn change_version<W: Write>(
        &self,
        package: &PackageVersionInfo,
        new_version: &str,
        out: &mut W,
    ) -> Result<Changeset> {
        let changes = self.stage(package, new_version)?;

        changes.commit(out)?;
        changes.print_summary(&package.name, &package.current_version, new_version, out)?;

        Ok(changes)
    }
}
