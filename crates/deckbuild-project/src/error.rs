use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest at '{path}' has no 'customFields.base'")]
    MissingBase { path: PathBuf },

    #[error("invalid 'customFields.base' value '{value}': {reason}")]
    InvalidBase { value: String, reason: &'static str },

    #[error("failed to scan packages directory '{path}'")]
    PackagesScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
