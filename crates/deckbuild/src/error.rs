use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("project error")]
    Project(#[from] deckbuild_project::ProjectError),

    #[error("operation error")]
    Operation(#[from] deckbuild_operations::OperationError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to resolve start path '{path}'")]
    StartDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no package.json with a 'workspaces' field found at or above '{start_dir}'")]
    WorkspaceNotFound { start_dir: PathBuf },

    #[error("build target '{path}' not found")]
    TargetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build target '{path}' is not a package directory or package.json manifest")]
    NotAManifestTarget { path: PathBuf },

    #[error("build target '{path}' is outside the workspace root '{root}'")]
    OutsideWorkspace { path: PathBuf, root: PathBuf },

    #[error("no workspaces defined in '{path}'")]
    NoWorkspaces { path: PathBuf },

    #[error("no workspace package.json found for patterns: {patterns}")]
    NoWorkspaceMembers { patterns: String },

    #[error("invalid workspace pattern '{pattern}'")]
    WorkspacePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
