use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use deckbuild_project::{MANIFEST_FILE, read_manifest};
use globset::GlobBuilder;

use crate::error::{CliError, Result};

/// Finds the workspace root by walking up from `start_dir` until a manifest
/// declaring a `workspaces` field is found.
///
/// # Errors
///
/// Returns `CliError::WorkspaceNotFound` if no ancestor declares workspaces,
/// or a project error if a manifest on the way up cannot be parsed.
pub(crate) fn find_workspace_root(start_dir: &Path) -> Result<PathBuf> {
    let start_dir = dunce::canonicalize(start_dir).map_err(|source| CliError::StartDir {
        path: start_dir.to_path_buf(),
        source,
    })?;

    let mut current = start_dir.clone();
    loop {
        let manifest_path = current.join(MANIFEST_FILE);

        if manifest_path.exists() {
            let manifest = read_manifest(&manifest_path)?;
            if manifest.workspaces.is_some() {
                return Ok(current);
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(CliError::WorkspaceNotFound { start_dir }),
        }
    }
}

/// Resolves a build target argument to a deck package directory.
///
/// A target may name the package directory itself or its `package.json`
/// manifest. The resolved directory must live inside the workspace root.
///
/// # Errors
///
/// Returns an error if the target does not exist, is a file other than
/// `package.json`, or resolves outside the workspace root.
pub(crate) fn resolve_target(
    workspace_root: &Path,
    start_dir: &Path,
    target: &Path,
) -> Result<PathBuf> {
    // join() discards start_dir when target is absolute
    let candidate = start_dir.join(target);
    let resolved = dunce::canonicalize(&candidate).map_err(|source| CliError::TargetNotFound {
        path: target.to_path_buf(),
        source,
    })?;

    let dir = if resolved.is_file() {
        if resolved.file_name() != Some(OsStr::new(MANIFEST_FILE)) {
            return Err(CliError::NotAManifestTarget { path: resolved });
        }
        match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return Err(CliError::NotAManifestTarget { path: resolved }),
        }
    } else {
        resolved
    };

    if !dir.starts_with(workspace_root) {
        return Err(CliError::OutsideWorkspace {
            path: dir,
            root: workspace_root.to_path_buf(),
        });
    }

    Ok(dir)
}

/// Path as shown to the user, relative to the workspace root when possible.
pub(crate) fn display_relative(workspace_root: &Path, path: &Path) -> String {
    path.strip_prefix(workspace_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Expands one `workspaces` pattern into the matching member directories.
///
/// Patterns match directories relative to the workspace root. A trailing
/// `/package.json` is accepted and ignored, since npm tooling writes
/// patterns both ways.
///
/// # Errors
///
/// Returns `CliError::WorkspacePattern` if the pattern is not a valid glob,
/// or an IO error if the directory walk fails.
pub(crate) fn expand_member_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir_pattern = pattern.strip_suffix("/package.json").unwrap_or(pattern);

    let glob = GlobBuilder::new(dir_pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| CliError::WorkspacePattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let mut dirs = Vec::new();
    collect_matching_dirs(root, root, &glob, &mut dirs)?;

    Ok(dirs)
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    glob: &globset::GlobMatcher,
    results: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = std::fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        // npm never resolves workspace members inside node_modules or
        // hidden directories.
        let name = entry.file_name();
        if name == "node_modules" || name.to_string_lossy().starts_with('.') {
            continue;
        }

        let relative = path.strip_prefix(base).unwrap_or(&path);

        if glob.is_match(relative) {
            results.push(path.clone());
        }

        collect_matching_dirs(base, &path, glob, results)?;
    }

    Ok(())
}
