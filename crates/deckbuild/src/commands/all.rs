use std::path::{Path, PathBuf};

use deckbuild_operations::{NpmRunner, ScriptRunner};
use deckbuild_project::{MANIFEST_FILE, Workspaces, read_manifest};

use crate::error::{CliError, Result};
use crate::workspace::{expand_member_pattern, find_workspace_root};

pub(super) fn run(start_dir: &Path) -> Result<()> {
    let root = find_workspace_root(start_dir)?;
    let manifest_path = root.join(MANIFEST_FILE);

    let manifest = read_manifest(&manifest_path)?;
    let patterns = manifest
        .workspaces
        .map(Workspaces::into_patterns)
        .unwrap_or_default();
    if patterns.is_empty() {
        return Err(CliError::NoWorkspaces {
            path: manifest_path,
        });
    }

    let members = collect_members(&root, &patterns)?;
    if members.is_empty() {
        return Err(CliError::NoWorkspaceMembers {
            patterns: patterns.join(", "),
        });
    }

    let runner = NpmRunner;
    for dir in &members {
        let manifest = read_manifest(&dir.join(MANIFEST_FILE))?;
        let dir_display = dir.display();
        let name = manifest
            .name
            .clone()
            .unwrap_or_else(|| dir_display.to_string());

        if !manifest.has_build_script() {
            println!("\n- {name} ({dir_display}) : skip (scripts.build not found)");
            continue;
        }

        println!("\n- {name} ({dir_display}) : npm run build");
        runner.run_build(dir)?;
    }

    println!("\nDone.");
    Ok(())
}

/// Member directories matching the workspace patterns, deduplicated in
/// pattern order. Directories without a manifest are not members.
fn collect_members(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut members = Vec::new();

    for pattern in patterns {
        for dir in expand_member_pattern(root, pattern)? {
            if !dir.join(MANIFEST_FILE).is_file() {
                continue;
            }
            if !members.contains(&dir) {
                members.push(dir);
            }
        }
    }

    Ok(members)
}
