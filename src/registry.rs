//! Registry of independently versioned packages.
//!
//! Each package knows its current version and every [`Location`] where that
//! version is written down. The registry is rebuilt from a
//! [`VersionSource`] on every run; nothing is persisted back.

use crate::config::{
    BACKEND_VERSION_FILE, BINDER_ENVIRONMENT, FRONTEND_PACKAGE, META_PACKAGE, README,
    VersionSource,
};
use crate::error::{BumpError, Result};
use std::path::PathBuf;

pub const JUPYTER_LSP: &str = "jupyter-lsp";
pub const JUPYTERLAB_LSP: &str = "jupyterlab-lsp";
pub const JUPYTERLAB_EXACT: &str = "jupyterlab:exact";
pub const JUPYTERLAB_RANGE: &str = "jupyterlab:range";

/// Registry keys in prompt order.
pub const KEYS: &[&str] = &[JUPYTER_LSP, JUPYTERLAB_LSP, JUPYTERLAB_EXACT, JUPYTERLAB_RANGE];

/// Placeholder substituted with a version in every template.
pub const VERSION_SLOT: &str = "{version}";

const NPM_PACKAGE_VERSION_TEMPLATE: &str = r#""version": "{version}""#;

/// One place where a package version is written down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub template: String,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
        }
    }

    /// Renders the template with `version` in its slot.
    ///
    /// ```
    /// # use bump_versions::registry::Location;
    /// let loc = Location::new("_version.py", "__version__ = \"{version}\"");
    /// assert_eq!(loc.render("2.0.1"), "__version__ = \"2.0.1\"");
    /// ```
    pub fn render(&self, version: &str) -> String {
        self.template.replace(VERSION_SLOT, version)
    }
}

/// An independently versioned artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionInfo {
    /// Display name shown in prompts.
    pub name: String,
    pub current_version: String,
    pub locations: Vec<Location>,
}

/// Ordered mapping from package key to its version info.
#[derive(Debug, Clone)]
pub struct Registry {
    packages: Vec<(String, PackageVersionInfo)>,
}

impl Registry {
    /// Builds the registry for a project.
    pub fn from_source(source: &VersionSource) -> Self {
        let root = source.root.as_path();
        let versions = &source.versions;
        let at = |rel: &str| root.join(rel);

        let packages = vec![
            (
                JUPYTER_LSP.to_string(),
                PackageVersionInfo {
                    name: "jupyter-lsp (Python backend)".to_string(),
                    current_version: versions.jupyter_lsp.clone(),
                    locations: vec![
                        Location::new(at(BACKEND_VERSION_FILE), r#"__version__ = "{version}""#),
                        Location::new(source.pipeline.clone(), "PY_JLSP_VERSION: {version}"),
                    ],
                },
            ),
            (
                JUPYTERLAB_LSP.to_string(),
                PackageVersionInfo {
                    name: "jupyterlab-lsp (frontend package)".to_string(),
                    current_version: versions.jupyterlab_lsp.clone(),
                    locations: vec![
                        Location::new(at(FRONTEND_PACKAGE), NPM_PACKAGE_VERSION_TEMPLATE),
                        Location::new(source.pipeline.clone(), "JS_JLLSP_VERSION: {version}"),
                        Location::new(at(META_PACKAGE), NPM_PACKAGE_VERSION_TEMPLATE),
                    ],
                },
            ),
            (
                JUPYTERLAB_EXACT.to_string(),
                PackageVersionInfo {
                    name: "JupyterLab - exact".to_string(),
                    current_version: versions.jupyterlab.clone(),
                    locations: vec![Location::new(
                        at(FRONTEND_PACKAGE),
                        r#""@jupyterlab/application": "~{version}""#,
                    )],
                },
            ),
            (
                JUPYTERLAB_RANGE.to_string(),
                PackageVersionInfo {
                    name: "JupyterLab - range".to_string(),
                    current_version: versions.required_jupyterlab.clone(),
                    locations: vec![
                        Location::new(at(BINDER_ENVIRONMENT), "jupyterlab {version}"),
                        Location::new(at(README), "jupyterlab {version}"),
                        Location::new(at(README), "JupyterLab {version}"),
                    ],
                },
            ),
        ];

        Self { packages }
    }

    /// Looks up a package by key.
    pub fn get(&self, key: &str) -> Result<&PackageVersionInfo> {
        self.packages
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, info)| info)
            .ok_or_else(|| BumpError::PackageNotFound(key.to_string()))
    }

    /// Iterates packages in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PackageVersionInfo)> {
        self.packages.iter().map(|(k, info)| (k.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Returns `Err(PackageNotFound)` unless `key` is a registry key.
pub fn validate_key(key: &str) -> Result<()> {
    if KEYS.contains(&key) {
        Ok(())
    } else {
        Err(BumpError::PackageNotFound(key.to_string()))
    }
}
