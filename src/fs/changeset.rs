//! Staged file edits for one package update.
//!
//! Edits are collected per file before anything touches the disk, so several
//! locations in the same file chain onto each other and every check can run
//! before the first write.
//!
//! ## Phases
//!
//! 1. **Stage**: read a file once via [`Changeset::read`], stage new content
//!    via [`Changeset::update_file`]
//! 2. **Commit**: write changed files, or print a unified diff per file in
//!    dry-run mode
//!
//! There is no rollback. A write failure halfway through leaves earlier
//! files updated.
//!
//! ## Example
//!
//! ```no_run
//! # use bump_versions::fs::Changeset;
//! # use std::path::Path;
//! # fn example() -> bump_versions::error::Result<()> {
//! let mut changes = Changeset::new(Path::new("."), false);
//!
//! let path = Path::new("README.md");
//! let content = changes.read(path)?;
//! changes.update_file(path, content.replace("1.0.0", "1.0.1"))?;
//!
//! changes.commit(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

use crate::error::{BumpError, Result};

use colored::Colorize;
use similar::TextDiff;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Lines of context around each hunk in dry-run diffs.
const DIFF_CONTEXT: usize = 4;

#[derive(Debug, Clone)]
struct FileChange {
    path: PathBuf,
    original: String,
    current: String,
}

impl FileChange {
    fn is_changed(&self) -> bool {
        self.original != self.current
    }
}

/// A location whose old text was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    pub path: PathBuf,
    pub text: String,
}

/// Per-file edits staged in first-touched order.
#[derive(Debug)]
pub struct Changeset {
    root: PathBuf,
    dry_run: bool,
    files: Vec<FileChange>,
    unmatched: Vec<Unmatched>,
}

impl Changeset {
    /// Creates an empty changeset. `root` is only used to shorten paths in
    /// output.
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
            files: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the staged content of `path`, reading it from disk on first
    /// access.
    pub fn read(&mut self, path: &Path) -> Result<String> {
        if let Some(change) = self.files.iter().find(|c| c.path == path) {
            return Ok(change.current.clone());
        }

        log::debug!("Reading: {}", path.display());
        let original = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            BumpError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        self.files.push(FileChange {
            path: path.to_path_buf(),
            current: original.clone(),
            original,
        });

        Ok(self.files[self.files.len() - 1].current.clone())
    }

    /// Stages new content for `path`.
    ///
    /// Files not yet read are read first so the original can be diffed.
    pub fn update_file(&mut self, path: &Path, new_content: String) -> Result<()> {
        if !self.files.iter().any(|c| c.path == path) {
            self.read(path)?;
        }

        if let Some(change) = self.files.iter_mut().find(|c| c.path == path) {
            log::debug!("Staging update for: {}", path.display());
            change.current = new_content;
        }

        Ok(())
    }

    /// Records a location that matched nothing.
    pub fn note_unmatched(&mut self, path: &Path, text: String) {
        self.unmatched.push(Unmatched {
            path: path.to_path_buf(),
            text,
        });
    }

    pub fn unmatched(&self) -> &[Unmatched] {
        &self.unmatched
    }

    /// Files whose staged content differs from disk.
    pub fn changed_files(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|c| c.is_changed())
            .map(|c| c.path.as_path())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.files.iter().any(FileChange::is_changed)
    }

    /// Writes every changed file, or prints its diff to `out` when dry.
    pub fn commit<W: Write>(&self, out: &mut W) -> Result<()> {
        for change in self.files.iter().filter(|c| c.is_changed()) {
            if self.dry_run {
                log::info!("Would update: {}", change.path.display());
                writeln!(
                    out,
                    "\n## Summary of changes proposed to {}",
                    display_path(&change.path, &self.root)
                )?;
                writeln!(out, "{}", unified_diff(&change.original, &change.current))?;
                continue;
            }

            fs::write(&change.path, &change.current).map_err(|e| {
                BumpError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to write {}: {}", change.path.display(), e),
                ))
            })?;
            log::debug!("Updated: {}", change.path.display());
        }

        Ok(())
    }

    /// Prints what was (or would be) changed for `name`.
    pub fn print_summary<W: Write>(
        &self,
        name: &str,
        old_version: &str,
        new_version: &str,
        out: &mut W,
    ) -> Result<()> {
        writeln!(
            out,
            "\n{} {} → {}",
            name.bold(),
            old_version.yellow(),
            new_version.green().bold()
        )?;

        let changed = self.changed_files();
        if changed.is_empty() {
            writeln!(out, "   {}", "No changes needed".yellow())?;
        }

        for path in changed {
            let display = display_path(path, &self.root);
            if self.dry_run {
                writeln!(out, "   • {}", display.dimmed())?;
            } else {
                writeln!(out, "   {} {}", "✓".green(), display.dimmed())?;
            }
        }

        for unmatched in &self.unmatched {
            writeln!(
                out,
                "   {} {}: no match for {}",
                "!".yellow().bold(),
                display_path(&unmatched.path, &self.root),
                unmatched.text.yellow()
            )?;
        }

        Ok(())
    }
}

/// Unified diff between the on-disk and proposed content.
pub fn unified_diff(current: &str, proposed: &str) -> String {
    let diff = TextDiff::from_lines(current, proposed);
    diff.unified_diff()
        .context_radius(DIFF_CONTEXT)
        .header("current", "new (proposed update)")
        .to_string()
}

/// Path of `path` relative to `root`, with forward slashes.
pub fn display_path(path: &Path, root: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}
