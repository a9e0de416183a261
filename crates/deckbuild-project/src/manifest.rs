use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::Result;
use crate::error::ProjectError;

/// The subset of a `package.json` manifest the build pipeline cares about.
///
/// Unknown fields are ignored so manifests can carry arbitrary tool
/// configuration without breaking discovery.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckManifest {
    pub name: Option<String>,
    pub scripts: Option<HashMap<String, String>>,
    #[serde(rename = "customFields")]
    pub custom_fields: Option<CustomFields>,
    pub workspaces: Option<Workspaces>,
}

/// Free-form extension block used by deck packages to declare build metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFields {
    pub base: Option<String>,
}

/// The `workspaces` field of a root manifest.
///
/// npm accepts either a bare pattern list or an object wrapping one under
/// `packages`; both shapes normalize to the same pattern list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    Patterns(Vec<String>),
    Packages {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    #[must_use]
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            Self::Patterns(patterns) => patterns,
            Self::Packages { packages } => packages,
        }
    }
}

impl DeckManifest {
    /// The deck's public base path, if the manifest declares one.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.custom_fields.as_ref()?.base.as_deref()
    }

    #[must_use]
    pub fn has_build_script(&self) -> bool {
        self.scripts
            .as_ref()
            .is_some_and(|scripts| scripts.contains_key("build"))
    }
}

/// Reads and parses the manifest file at `path`.
///
/// # Errors
///
/// Returns [`ProjectError::ManifestRead`] when the file cannot be read and
/// [`ProjectError::ManifestParse`] when it is not valid manifest JSON.
pub fn read_manifest(path: &Path) -> Result<DeckManifest> {
    let raw = fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = serde_json::from_str(&raw).map_err(|source| ProjectError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(manifest)
}
