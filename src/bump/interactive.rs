//! Interactive mode: ask for a new version of every registered package.

use crate::bump::Bumper;
use crate::error::Result;
use crate::registry::Registry;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Prompts for each package in registry order and bumps those given a
/// version. An empty answer (or end of input) skips the package.
///
/// Returns the number of packages bumped. The first failing bump stops the
/// loop; packages bumped before it stay bumped.
pub fn update_interactively<R: BufRead, W: Write>(
    registry: &Registry,
    bumper: &Bumper<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<usize> {
    let mut bumped = 0;

    for (key, package) in registry.iter() {
        writeln!(
            out,
            "Current {} version is: {}",
            package.name.bold(),
            package.current_version.yellow()
        )?;
        write!(out, "Change it to [default=skip]: ")?;
        out.flush()?;

        let mut response = String::new();
        if input.read_line(&mut response)? == 0 {
            log::debug!("End of input while prompting for {}", key);
            writeln!(out)?;
        }

        let version = response.trim();
        if version.is_empty() {
            log::info!("Skipping {}", key);
            continue;
        }

        bumper.change_version(package, version, out)?;
        bumped += 1;
    }

    Ok(bumped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bump::BumpOptions;
    use crate::config::{BACKEND_VERSION_FILE, CurrentVersions, FRONTEND_PACKAGE, VersionSource};
    use crate::error::BumpError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn project() -> (TempDir, VersionSource) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let backend = root.join(BACKEND_VERSION_FILE);
        fs::create_dir_all(backend.parent().unwrap()).unwrap();
        fs::write(&backend, "__version__ = \"2.0.0\"\n").unwrap();
        fs::write(root.join("azure-pipelines.yml"), "PY_JLSP_VERSION: 2.0.0\n").unwrap();
        fs::write(root.join("CHANGELOG.md"), "## 2.0.1\n## 5.0.1\n").unwrap();

        let frontend = root.join(FRONTEND_PACKAGE);
        fs::create_dir_all(frontend.parent().unwrap()).unwrap();
        fs::write(&frontend, "{\n  \"version\": \"5.0.0\"\n}\n").unwrap();

        let source = VersionSource::new(
            root,
            CurrentVersions {
                jupyter_lsp: "2.0.0".to_string(),
                jupyterlab_lsp: "5.0.0".to_string(),
                jupyterlab: "4.1.0".to_string(),
                required_jupyterlab: ">=4.1.0,<5.0.0a0".to_string(),
            },
        );
        (temp, source)
    }

    #[test]
    fn test_prompts_for_every_package_and_skips_empty() {
        colored::control::set_override(false);

        let (_temp, source) = project();
        let registry = Registry::from_source(&source);
        let bumper = Bumper::new(&source, BumpOptions::default());

        let mut input = Cursor::new("\n\n\n\n");
        let mut out = Vec::new();
        let bumped = update_interactively(&registry, &bumper, &mut input, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(bumped, 0);
        assert!(printed.contains("Current jupyter-lsp (Python backend) version is: 2.0.0"));
        assert!(printed.contains("Current JupyterLab - range version is: >=4.1.0,<5.0.0a0"));
        assert_eq!(printed.matches("Change it to [default=skip]: ").count(), 4);
    }

    #[test]
    fn test_bumps_only_answered_packages() {
        let (_temp, source) = project();
        let registry = Registry::from_source(&source);
        let bumper = Bumper::new(&source, BumpOptions::default());

        // Answer only the first prompt; EOF skips the rest
        let mut input = Cursor::new(" 2.0.1 \n");
        let bumped =
            update_interactively(&registry, &bumper, &mut input, &mut Vec::new()).unwrap();

        assert_eq!(bumped, 1);
        assert_eq!(
            fs::read_to_string(source.root.join(BACKEND_VERSION_FILE)).unwrap(),
            "__version__ = \"2.0.1\"\n"
        );
        assert_eq!(
            fs::read_to_string(source.root.join(FRONTEND_PACKAGE)).unwrap(),
            "{\n  \"version\": \"5.0.0\"\n}\n"
        );
    }

    #[test]
    fn test_guard_failure_stops_the_loop() {
        let (_temp, source) = project();
        let registry = Registry::from_source(&source);
        let bumper = Bumper::new(&source, BumpOptions::default());

        let mut input = Cursor::new("9.9.9\n5.0.1\n");
        let err =
            update_interactively(&registry, &bumper, &mut input, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, BumpError::MissingChangelogEntry { .. }));
        assert_eq!(
            fs::read_to_string(source.root.join(FRONTEND_PACKAGE)).unwrap(),
            "{\n  \"version\": \"5.0.0\"\n}\n"
        );
    }
}
