mod base;
mod discovery;
mod error;
mod manifest;

/// Directory under the workspace root that holds one deck package per child.
pub const PACKAGES_DIR: &str = "packages";

/// Per-package metadata file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Root of the published build output.
pub const DIST_DIR: &str = "dist";

/// Root of the pre-populated build cache consulted before rebuilding.
pub const STALE_DIR: &str = "dist-stale";

pub use base::BasePath;
pub use discovery::{PackageInfo, discover_packages};
pub use error::ProjectError;
pub use manifest::{DeckManifest, Workspaces, read_manifest};

pub type Result<T> = std::result::Result<T, ProjectError>;
