use crate::bump::{BumpOptions, Bumper, update_interactively};
use crate::config::VersionSource;
use crate::error::{BumpError, Result};
use crate::fs::display_path;
use crate::registry::{Registry, validate_key};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, Default)]
pub struct BumpArgs {
    /// Do not perform the update, only show the changes
    #[arg(long, visible_alias = "dry-run")]
    pub dry: bool,

    /// Which package should have the version bumped? If not given,
    /// interactive mode will ask for versions for all packages
    #[arg(long, value_name = "KEY")]
    pub package: Option<String>,

    /// New version for --package
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Fail unless every location matches exactly once
    #[arg(long)]
    pub strict: bool,

    /// List registered packages and their current versions
    #[arg(long, conflicts_with_all = ["package", "version"])]
    pub list: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (defaults to bump-versions.toml in the project root)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What a run should do, resolved from [`BumpArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    List,
    Single { package: String, version: String },
    Interactive,
}

impl BumpArgs {
    /// Resolves and validates the selection without touching the disk.
    ///
    /// `--package` and `--version` must be given together, and the package
    /// key must be registered.
    pub fn selection(&self) -> Result<Selection> {
        if self.list {
            return Ok(Selection::List);
        }

        match (&self.package, &self.version) {
            (Some(package), Some(version)) => {
                validate_key(package)?;
                if version.trim().is_empty() {
                    return Err(BumpError::EmptyVersion(package.clone()));
                }
                Ok(Selection::Single {
                    package: package.clone(),
                    version: version.clone(),
                })
            }
            (Some(_), None) => Err(BumpError::MissingArgument {
                given: "--package",
                missing: "--version",
            }),
            (None, Some(_)) => Err(BumpError::MissingArgument {
                given: "--version",
                missing: "--package",
            }),
            (None, None) => Ok(Selection::Interactive),
        }
    }

    pub fn options(&self) -> BumpOptions {
        BumpOptions {
            dry_run: self.dry,
            strict: self.strict,
        }
    }
}

/// Executes a bump run.
///
/// ## Phases
///
/// 1. Resolve the selection (pairing and key checks, no I/O)
/// 2. Load the version source and build the registry
/// 3. List, bump one package, or prompt for each package
pub fn execute(args: BumpArgs) -> Result<()> {
    let selection = args.selection()?;

    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    log::debug!("Project root: {}", root.display());

    let source = VersionSource::load(&root, args.config.as_deref())?;
    let registry = Registry::from_source(&source);
    let bumper = Bumper::new(&source, args.options());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dry && selection != Selection::List {
        writeln!(out, "{}", "DRY RUN - No changes will be made".yellow().bold())?;
    }

    match selection {
        Selection::List => print_registry(&registry, &source.root, &mut out),
        Selection::Single { package, version } => {
            let info = registry.get(&package)?;
            bumper.change_version(info, &version, &mut out)?;
            Ok(())
        }
        Selection::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let bumped = update_interactively(&registry, &bumper, &mut input, &mut out)?;
            if bumped == 0 {
                writeln!(out, "\n{}", "No packages bumped.".yellow())?;
            }
            Ok(())
        }
    }
}

/// Prints every package with its current version and locations.
pub fn print_registry<W: Write>(registry: &Registry, root: &Path, out: &mut W) -> Result<()> {
    for (key, package) in registry.iter() {
        writeln!(
            out,
            "{} {} {}",
            key.bold().cyan(),
            package.current_version.green(),
            format!("({})", package.name).dimmed()
        )?;
        for location in &package.locations {
            writeln!(
                out,
                "    • {}: {}",
                display_path(&location.path, root),
                location.template
            )?;
        }
    }

    Ok(())
}
