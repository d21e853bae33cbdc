//! Version-source configuration.
//!
//! A [`VersionSource`] records where the project lives, which changelog and
//! pipeline files to use, and the current version of every registered
//! package. It is built once per run, either by reading the versions out of
//! the project files themselves or from an optional `bump-versions.toml`:
//!
//! ```toml
//! changelog = "CHANGELOG.md"
//! pipeline = "azure-pipelines.yml"
//!
//! [versions]
//! "jupyterlab:range" = ">=4.1.0,<5.0.0a0"
//! ```
//!
//! Entries in `[versions]` take precedence over discovery.

use crate::error::{BumpError, Result};
use crate::registry::{JUPYTER_LSP, JUPYTERLAB_EXACT, JUPYTERLAB_LSP, JUPYTERLAB_RANGE, KEYS};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "bump-versions.toml";

pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";
pub const DEFAULT_PIPELINE: &str = "azure-pipelines.yml";

pub const BACKEND_VERSION_FILE: &str = "python_packages/jupyter_lsp/jupyter_lsp/_version.py";
pub const FRONTEND_PACKAGE: &str = "packages/jupyterlab-lsp/package.json";
pub const META_PACKAGE: &str = "packages/metapackage/package.json";
pub const BINDER_ENVIRONMENT: &str = "binder/environment.yml";
pub const README: &str = "README.md";

/// Current version of each registered package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersions {
    pub jupyter_lsp: String,
    pub jupyterlab_lsp: String,
    pub jupyterlab: String,
    pub required_jupyterlab: String,
}

/// Everything the registry needs to know about the project on disk.
#[derive(Debug, Clone)]
pub struct VersionSource {
    pub root: PathBuf,
    pub changelog: PathBuf,
    pub pipeline: PathBuf,
    pub versions: CurrentVersions,
}

impl VersionSource {
    /// Creates a source with default changelog and pipeline locations.
    pub fn new(root: impl Into<PathBuf>, versions: CurrentVersions) -> Self {
        let root = root.into();
        Self {
            changelog: root.join(DEFAULT_CHANGELOG),
            pipeline: root.join(DEFAULT_PIPELINE),
            root,
            versions,
        }
    }

    /// Reads the current versions from the project files under `root`.
    pub fn discover(root: &Path) -> Result<Self> {
        Self::from_config(root, ConfigFile::default())
    }

    /// Loads the config file (explicit path, or `bump-versions.toml` in
    /// `root` if present) and discovers whatever it does not override.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigFile::read(path)?,
            None => {
                let default = root.join(CONFIG_FILE);
                if default.is_file() {
                    ConfigFile::read(&default)?
                } else {
                    log::debug!("No {} in {}", CONFIG_FILE, root.display());
                    ConfigFile::default()
                }
            }
        };

        Self::from_config(root, config)
    }

    fn from_config(root: &Path, mut config: ConfigFile) -> Result<Self> {
        let frontend = root.join(FRONTEND_PACKAGE);
        let versions = CurrentVersions {
            jupyter_lsp: config.version_or(JUPYTER_LSP, || {
                capture(
                    &root.join(BACKEND_VERSION_FILE),
                    r#"__version__ = "([^"]+)""#,
                    "__version__",
                )
            })?,
            jupyterlab_lsp: config.version_or(JUPYTERLAB_LSP, || {
                capture(&frontend, r#""version": "([^"]+)""#, "\"version\"")
            })?,
            jupyterlab: config.version_or(JUPYTERLAB_EXACT, || {
                capture(
                    &frontend,
                    r#""@jupyterlab/application": "~([^"]+)""#,
                    "\"@jupyterlab/application\"",
                )
            })?,
            required_jupyterlab: config.version_or(JUPYTERLAB_RANGE, || {
                capture(
                    &root.join(BINDER_ENVIRONMENT),
                    r"jupyterlab (\S+)",
                    "jupyterlab requirement",
                )
            })?,
        };

        let mut source = Self::new(root, versions);
        if let Some(changelog) = config.changelog {
            source.changelog = root.join(changelog);
        }
        if let Some(pipeline) = config.pipeline {
            source.pipeline = root.join(pipeline);
        }

        Ok(source)
    }
}

/// Parsed contents of a `bump-versions.toml`.
#[derive(Debug, Default)]
struct ConfigFile {
    changelog: Option<PathBuf>,
    pipeline: Option<PathBuf>,
    versions: HashMap<String, String>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self> {
        log::debug!("Reading config: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            BumpError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        Self::parse(&content)
    }

    /// Takes the configured version for `key`, or runs `discover`.
    fn version_or(
        &mut self,
        key: &str,
        discover: impl FnOnce() -> Result<String>,
    ) -> Result<String> {
        match self.versions.remove(key) {
            Some(version) => {
                log::debug!("Using configured version {} for {}", version, key);
                Ok(version)
            }
            None => discover(),
        }
    }

    fn parse(content: &str) -> Result<Self> {
        let doc: DocumentMut = content.parse()?;

        let mut versions = HashMap::new();
        if let Some(item) = doc.get("versions") {
            let table = item.as_table_like().ok_or_else(|| {
                BumpError::InvalidConfig("versions".to_string(), "expected a table".to_string())
            })?;

            for (key, value) in table.iter() {
                if !KEYS.contains(&key) {
                    return Err(BumpError::PackageNotFound(key.to_string()));
                }
                let version = value.as_str().ok_or_else(|| {
                    BumpError::InvalidConfig(
                        format!("versions.{key}"),
                        "expected a string".to_string(),
                    )
                })?;
                versions.insert(key.to_string(), version.to_string());
            }
        }

        Ok(Self {
            changelog: string_value(&doc, "changelog")?.map(PathBuf::from),
            pipeline: string_value(&doc, "pipeline")?.map(PathBuf::from),
            versions,
        })
    }
}

fn string_value(doc: &DocumentMut, key: &str) -> Result<Option<String>> {
    match doc.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| BumpError::InvalidConfig(key.to_string(), "expected a string".into())),
    }
}

/// Returns the first capture group of `pattern` in the file at `path`.
fn capture(path: &Path, pattern: &str, what: &str) -> Result<String> {
    let not_found = || BumpError::VersionNotFound {
        what: what.to_string(),
        path: path.to_path_buf(),
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };

    let re = Regex::new(pattern)?;
    re.captures(&content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(not_found)
}
