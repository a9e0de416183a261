use std::path::{Path, PathBuf};

use deckbuild_operations::{Executor, SlidevCli};

use crate::error::Result;
use crate::workspace::{display_relative, find_workspace_root, resolve_target};

pub(super) fn run(start_dir: &Path, targets: &[PathBuf], no_cache: bool) -> Result<()> {
    let root = find_workspace_root(start_dir)?;

    let mut dirs = Vec::with_capacity(targets.len());
    for target in targets {
        dirs.push(resolve_target(&root, start_dir, target)?);
    }

    println!("Building {} slide package(s):", dirs.len());
    for dir in &dirs {
        println!("  - {}", display_relative(&root, dir));
    }

    let tool = SlidevCli;
    let executor = Executor::new(&root, &tool, no_cache);
    for dir in &dirs {
        executor.build_target(dir)?;
    }

    Ok(())
}
