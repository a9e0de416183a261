use std::path::Path;
use std::process::Command;

use deckbuild_project::BasePath;

use crate::Result;
use crate::error::OperationError;

const NPX: &str = if cfg!(windows) { "npx.cmd" } else { "npx" };
const NPM: &str = if cfg!(windows) { "npm.cmd" } else { "npm" };

/// Invokes the slide build tool for one deck.
///
/// Implementations block until the tool exits and inherit the parent's
/// standard streams, so build output lands directly on the console.
pub trait BuildTool {
    /// # Errors
    ///
    /// Returns an error when the tool cannot be started or exits non-zero.
    fn build(&self, package_dir: &Path, base: &BasePath, out_dir: &Path) -> Result<()>;
}

/// Runs `slidev build` through npx inside the package directory.
pub struct SlidevCli;

impl BuildTool for SlidevCli {
    fn build(&self, package_dir: &Path, base: &BasePath, out_dir: &Path) -> Result<()> {
        let package = package_label(package_dir);
        let status = Command::new(NPX)
            .args(["slidev", "build", "--base", base.as_str(), "--out"])
            .arg(out_dir)
            .current_dir(package_dir)
            .status()
            .map_err(|source| OperationError::BuildToolSpawn {
                package: package.clone(),
                source,
            })?;

        if !status.success() {
            return Err(OperationError::BuildToolFailed { package, status });
        }
        Ok(())
    }
}

/// Runs a package's `build` script through the package manager.
pub trait ScriptRunner {
    /// # Errors
    ///
    /// Returns an error when the runner cannot be started or the script
    /// exits non-zero.
    fn run_build(&self, package_dir: &Path) -> Result<()>;
}

/// Runs `npm run build` inside the package directory.
pub struct NpmRunner;

impl ScriptRunner for NpmRunner {
    fn run_build(&self, package_dir: &Path) -> Result<()> {
        let status = Command::new(NPM)
            .args(["run", "build"])
            .current_dir(package_dir)
            .status()
            .map_err(|source| OperationError::ScriptSpawn {
                dir: package_dir.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(OperationError::ScriptFailed {
                dir: package_dir.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}

fn package_label(dir: &Path) -> String {
    dir.file_name().map_or_else(
        || dir.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
