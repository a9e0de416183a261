use deckbuild_project::PackageInfo;
use indexmap::IndexSet;

use crate::diff::DiffResult;
use crate::paths::{is_shared_resource, package_name};

/// Why the selector chose the targets it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Not running in CI; change detection does not apply.
    LocalRun,
    /// The diff range could not be resolved, so everything rebuilds.
    DiffUnavailable,
    /// A shared resource changed, so everything rebuilds.
    SharedResourceChanged,
    /// Targets narrowed to the decks the diff touched.
    Narrowed,
}

/// Build targets chosen for one invocation.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Decks to build, in the order the diff touched them.
    pub targets: Vec<PackageInfo>,
    /// Touched packages without a base. They are never build targets.
    pub skipped: Vec<String>,
    pub reason: SelectionReason,
}

/// Combines discovered packages with the diff into the set of decks to
/// build.
///
/// Outside CI, or when the diff is unavailable, every deck with a base is
/// selected. A shared-resource change also selects every deck with a base.
/// Otherwise only decks whose files changed are selected; touched decks
/// without a base are reported as skipped instead.
#[must_use]
pub fn select_targets(
    packages: &[PackageInfo],
    diff: Option<&DiffResult>,
    ci: bool,
) -> Selection {
    let full_set = |reason: SelectionReason| Selection {
        targets: packages.iter().filter(|p| p.has_base).cloned().collect(),
        skipped: Vec::new(),
        reason,
    };

    if !ci {
        return full_set(SelectionReason::LocalRun);
    }
    let Some(diff) = diff else {
        return full_set(SelectionReason::DiffUnavailable);
    };
    if diff
        .changed_files
        .iter()
        .any(|path| is_shared_resource(path))
    {
        return full_set(SelectionReason::SharedResourceChanged);
    }

    let mut touched: IndexSet<&PackageInfo> = IndexSet::new();
    let mut skipped: IndexSet<&str> = IndexSet::new();
    for file in &diff.changed_files {
        let Some(name) = package_name(file) else {
            continue;
        };
        let Some(info) = packages.iter().find(|p| p.name == name) else {
            continue;
        };
        if info.has_base {
            touched.insert(info);
        } else {
            skipped.insert(info.name.as_str());
        }
    }

    Selection {
        targets: touched.into_iter().cloned().collect(),
        skipped: skipped.into_iter().map(ToString::to_string).collect(),
        reason: SelectionReason::Narrowed,
    }
}
