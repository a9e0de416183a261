use std::fs;
use std::io;
use std::path::Path;

use deckbuild_project::{BasePath, MANIFEST_FILE, ProjectError, read_manifest};

use crate::Result;
use crate::error::OperationError;
use crate::runner::BuildTool;

/// How a target's output was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The build tool ran.
    Built,
    /// Cached output was copied into place without building.
    Restored,
}

/// Builds deck packages, restoring cached output when available.
///
/// The cache under `dist-stale/` is consulted, never written. Producing it
/// is the deployment pipeline's job.
pub struct Executor<'a, T: BuildTool> {
    workspace_root: &'a Path,
    tool: &'a T,
    no_cache: bool,
}

impl<'a, T: BuildTool> Executor<'a, T> {
    pub fn new(workspace_root: &'a Path, tool: &'a T, no_cache: bool) -> Self {
        Self {
            workspace_root,
            tool,
            no_cache,
        }
    }

    /// Builds one deck package directory, or restores it from the cache.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the manifest cannot be read or
    /// lacks a usable `customFields.base`, and a build or filesystem error
    /// when producing the output fails.
    pub fn build_target(&self, package_dir: &Path) -> Result<BuildOutcome> {
        let manifest_path = package_dir.join(MANIFEST_FILE);
        let manifest = read_manifest(&manifest_path)?;
        let Some(raw_base) = manifest.base() else {
            return Err(ProjectError::MissingBase {
                path: manifest_path,
            }
            .into());
        };
        let base = BasePath::parse(raw_base)?;

        let out_dir = base.dist_dir(self.workspace_root);
        let cache_dir = base.stale_dir(self.workspace_root);

        if !self.no_cache && cache_dir.exists() {
            tracing::info!("Restoring cached output for {base}");
            restore(&cache_dir, &out_dir)?;
            return Ok(BuildOutcome::Restored);
        }

        tracing::info!("Building {base}");
        self.tool.build(package_dir, &base, &out_dir)?;
        Ok(BuildOutcome::Built)
    }
}

/// Replaces `out_dir` with the contents of `cache_dir`. A full overwrite,
/// never a merge.
fn restore(cache_dir: &Path, out_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(out_dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(OperationError::CacheRestore {
                path: out_dir.to_path_buf(),
                source,
            });
        }
    }

    copy_tree(cache_dir, out_dir).map_err(|source| OperationError::CacheRestore {
        path: out_dir.to_path_buf(),
        source,
    })
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in walkdir::WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
