mod cleanup;
mod diff;
mod environment;
mod error;
mod executor;
mod paths;
mod runner;
mod select;

pub use cleanup::{plan_cleanup, remove_output_dir};
pub use diff::{DiffResult, collect_diff};
pub use environment::{BuildEnv, is_all_zero_sha};
pub use error::OperationError;
pub use executor::{BuildOutcome, Executor};
pub use paths::{is_shared_resource, package_name};
pub use runner::{BuildTool, NpmRunner, ScriptRunner, SlidevCli};
pub use select::{Selection, SelectionReason, select_targets};

pub type Result<T> = std::result::Result<T, OperationError>;
