use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] deckbuild_git::GitError),

    #[error(transparent)]
    Project(#[from] deckbuild_project::ProjectError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to start the slide build tool for '{package}'")]
    BuildToolSpawn {
        package: String,
        #[source]
        source: std::io::Error,
    },

    #[error("building '{package}' failed with {status}")]
    BuildToolFailed { package: String, status: ExitStatus },

    #[error("failed to start the build script in '{dir}'")]
    ScriptSpawn {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build script in '{dir}' failed with {status}")]
    ScriptFailed { dir: PathBuf, status: ExitStatus },

    #[error("failed to restore cached output into '{path}'")]
    CacheRestore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove output directory '{path}'")]
    CleanupRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
