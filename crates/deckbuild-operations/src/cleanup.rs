use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use deckbuild_git::Repository;
use deckbuild_project::{BasePath, DeckManifest};

use crate::Result;
use crate::diff::DiffResult;
use crate::error::OperationError;
use crate::paths::package_name;

/// Resolves the dist directories of decks deleted in the diff.
///
/// Each deleted manifest is read back from git history at the diff's base
/// commit to recover its base path. Cleanup is best-effort: any failure to
/// recover or parse a historical manifest is logged and that deck skipped,
/// never failing the build.
#[must_use]
pub fn plan_cleanup(repo: &Repository, diff: &DiffResult, workspace_root: &Path) -> Vec<PathBuf> {
    let mut dist_paths = Vec::new();

    for manifest_path in &diff.deleted_manifests {
        let Some(package) = package_name(manifest_path) else {
            continue;
        };

        let content = match repo.show(&diff.base_sha, manifest_path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    "Could not read {manifest_path} from git history; skipping cleanup. ({err})"
                );
                continue;
            }
        };

        let manifest: DeckManifest = match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!("Failed to parse historical package.json for {package}: {err}");
                continue;
            }
        };

        let Some(raw_base) = manifest.base() else {
            tracing::warn!(
                "customFields.base missing in historical package.json for {package}; skipping cleanup."
            );
            continue;
        };

        match BasePath::parse(raw_base) {
            Ok(base) => dist_paths.push(base.dist_dir(workspace_root)),
            Err(err) => {
                tracing::warn!("Invalid historical base for {package}: {err}; skipping cleanup.");
            }
        }
    }

    dist_paths
}

/// Removes one scheduled output directory. Missing directories are fine.
///
/// # Errors
///
/// Returns [`OperationError::CleanupRemove`] when the directory exists but
/// cannot be deleted.
pub fn remove_output_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(OperationError::CleanupRemove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
