use std::path::Path;

use deckbuild_git::Repository;
use deckbuild_operations::{
    BuildEnv, Executor, SlidevCli, collect_diff, plan_cleanup, remove_output_dir, select_targets,
};
use deckbuild_project::{PACKAGES_DIR, discover_packages};

use crate::error::Result;
use crate::workspace::{display_relative, find_workspace_root};

pub(super) fn run(start_dir: &Path) -> Result<()> {
    let root = find_workspace_root(start_dir)?;
    let env = BuildEnv::from_env();

    let packages = discover_packages(&root.join(PACKAGES_DIR))?;
    let repo = Repository::new(&root);

    // Change detection only applies in CI; local runs rebuild everything.
    let diff = if env.ci { collect_diff(&repo, &env) } else { None };

    let selection = select_targets(&packages, diff.as_ref(), env.ci);

    if !selection.skipped.is_empty() {
        println!(
            "Skipped {} package(s) without customFields.base: {}",
            selection.skipped.len(),
            selection.skipped.join(", ")
        );
    }

    if selection.targets.is_empty() {
        println!("No slide packages require rebuilding. Skipping build step.");
    } else {
        println!("Building {} slide package(s):", selection.targets.len());
        for target in &selection.targets {
            println!("  - {}", display_relative(&root, &target.dir));
        }

        let tool = SlidevCli;
        let executor = Executor::new(&root, &tool, false);
        for target in &selection.targets {
            executor.build_target(&target.dir)?;
        }
    }

    if let Some(diff) = diff.as_ref() {
        let cleanups = plan_cleanup(&repo, diff, &root);
        if !cleanups.is_empty() {
            println!("Cleaning up dist directories for removed slides:");
            for path in &cleanups {
                println!("  - {}", display_relative(&root, path));
                remove_output_dir(path)?;
            }
        }
    }

    Ok(())
}
