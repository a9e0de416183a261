use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to execute 'git {args}'")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'git {args}' failed with {status}: {stderr}")]
    CommandFailed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
}
