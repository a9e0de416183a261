use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ProjectError;
use crate::manifest::read_manifest;
use crate::{MANIFEST_FILE, Result};

/// A deck package found below the workspace's `packages/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageInfo {
    /// Directory name of the package, which doubles as its identity in
    /// change detection.
    pub name: String,
    /// Path of the package directory.
    pub dir: PathBuf,
    /// Whether the package manifest declares a `customFields.base`.
    pub has_base: bool,
}

/// Enumerates deck packages below `packages_root`.
///
/// Every child directory counts as a package. A package whose manifest is
/// missing, unreadable, or malformed is still listed with `has_base` set to
/// `false`, so callers can report it as skipped instead of failing the whole
/// run. A missing `packages_root` yields an empty list.
///
/// # Errors
///
/// Returns [`ProjectError::PackagesScan`] when the directory exists but
/// cannot be enumerated.
pub fn discover_packages(packages_root: &Path) -> Result<Vec<PackageInfo>> {
    let entries = match fs::read_dir(packages_root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ProjectError::PackagesScan {
                path: packages_root.to_path_buf(),
                source,
            });
        }
    };

    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ProjectError::PackagesScan {
            path: packages_root.to_path_buf(),
            source,
        })?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let has_base = read_manifest(&dir.join(MANIFEST_FILE))
            .is_ok_and(|manifest| manifest.base().is_some());
        packages.push(PackageInfo {
            name,
            dir,
            has_base,
        });
    }
    packages.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(packages)
}
