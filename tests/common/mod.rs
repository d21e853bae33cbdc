//! Shared fixtures for bump-versions integration tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const BACKEND_VERSION_FILE: &str = "python_packages/jupyter_lsp/jupyter_lsp/_version.py";
pub const FRONTEND_PACKAGE: &str = "packages/jupyterlab-lsp/package.json";
pub const META_PACKAGE: &str = "packages/metapackage/package.json";

pub const CHANGELOG: &str = r#"# CHANGELOG

## `@jupyter-lsp/jupyterlab-lsp 5.0.1`

- bug fixes

## `jupyter-lsp 2.0.1`

- maintenance: requires jupyterlab >=4.2.0,<5.0.0a0

## `jupyter-lsp 2.0.0`
"#;

pub const BACKEND: &str = r#"""" single source of truth for jupyter_lsp version
"""
__version__ = "2.0.0"
"#;

pub const FRONTEND: &str = r#"{
  "name": "@jupyter-lsp/jupyterlab-lsp",
  "version": "5.0.0",
  "dependencies": {
    "@jupyterlab/application": "~4.1.0",
    "lodash.mergewith": "^4.6.1"
  }
}
"#;

pub const META: &str = r#"{
  "name": "@jupyter-lsp/jupyterlab-lsp-metapackage",
  "version": "5.0.0"
}
"#;

pub const PIPELINE: &str = r#"variables:
  PYTHONUNBUFFERED: 1
  PY_JLSP_VERSION: 2.0.0
  JS_JLLSP_VERSION: 5.0.0
"#;

pub const ENVIRONMENT: &str = r#"name: jupyterlab-lsp-binder
dependencies:
  - python >=3.8,<3.12.0a0
  - jupyterlab >=4.1.0,<5.0.0a0
"#;

pub const README: &str = r#"# Language Server Protocol integration for Jupyter(Lab)

Requires JupyterLab >=4.1.0,<5.0.0a0

    conda install -c conda-forge 'jupyterlab >=4.1.0,<5.0.0a0'
"#;

/// Creates a project with every file the registry touches.
pub fn create_test_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "CHANGELOG.md", CHANGELOG);
    write(root, BACKEND_VERSION_FILE, BACKEND);
    write(root, FRONTEND_PACKAGE, FRONTEND);
    write(root, META_PACKAGE, META);
    write(root, "azure-pipelines.yml", PIPELINE);
    write(root, "binder/environment.yml", ENVIRONMENT);
    write(root, "README.md", README);

    temp
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Snapshot of every fixture file, for asserting nothing changed.
pub fn snapshot(root: &Path) -> Vec<String> {
    [
        "CHANGELOG.md",
        BACKEND_VERSION_FILE,
        FRONTEND_PACKAGE,
        META_PACKAGE,
        "azure-pipelines.yml",
        "binder/environment.yml",
        "README.md",
    ]
    .iter()
    .map(|rel| read(root, rel))
    .collect()
}

/// Runs bump-versions in `root` with colors disabled.
pub fn run_bump(root: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    bump_command(root, args).assert()
}

/// Runs bump-versions in `root`, feeding `stdin` to the prompts.
pub fn run_interactive(root: &Path, args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
    bump_command(root, args).write_stdin(stdin).assert()
}

fn bump_command(root: &Path, args: &[&str]) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bump-versions");
    cmd.args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(root);
    cmd
}
