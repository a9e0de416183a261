use deckbuild_git::Repository;
use deckbuild_project::{MANIFEST_FILE, PACKAGES_DIR};

use crate::environment::{BuildEnv, is_all_zero_sha};
use crate::paths::package_name;

/// Outcome of comparing the head commit against the resolved base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Base commit the comparison ran against.
    pub base_sha: String,
    /// Head commit the comparison ran against.
    pub head_sha: String,
    /// Paths changed between base and head, repository-relative.
    pub changed_files: Vec<String>,
    /// Deleted manifest paths below the packages directory.
    pub deleted_manifests: Vec<String>,
}

/// Resolves the diff range from `env` and lists changed and deleted paths.
///
/// The head commit comes from the explicit override, then the CI-provided
/// SHA, then the repository's current HEAD. The base comes from the
/// explicit override unless it is the all-zero placeholder, falling back
/// to the tip of the default branch (remote-qualified first).
///
/// Returns `None` when the range cannot be resolved or diffing fails, which
/// callers treat as "rebuild everything".
#[must_use]
pub fn collect_diff(repo: &Repository, env: &BuildEnv) -> Option<DiffResult> {
    let head = resolve_head(repo, env);
    let base = resolve_base(repo, env);
    let (Some(head), Some(base)) = (head, base) else {
        tracing::warn!(
            "Unable to resolve git diff range. Falling back to rebuilding all slide packages."
        );
        return None;
    };

    if head == base {
        tracing::info!("Base SHA and head SHA are identical. Skipping diff-based filtering.");
        return Some(DiffResult {
            base_sha: base,
            head_sha: head,
            changed_files: Vec::new(),
            deleted_manifests: Vec::new(),
        });
    }

    let changed_files = match repo.changed_files(&base, &head) {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!("Failed to compute diff ({err}).");
            return None;
        }
    };

    // A failed deletion listing only disables cleanup, not the build.
    let deleted_manifests = match repo.deleted_files(&base, &head, PACKAGES_DIR) {
        Ok(files) => files
            .into_iter()
            .filter(|path| path.ends_with(MANIFEST_FILE) && package_name(path).is_some())
            .collect(),
        Err(err) => {
            tracing::debug!("Deletion listing failed ({err}).");
            Vec::new()
        }
    };

    Some(DiffResult {
        base_sha: base,
        head_sha: head,
        changed_files,
        deleted_manifests,
    })
}

fn resolve_head(repo: &Repository, env: &BuildEnv) -> Option<String> {
    env.head_override
        .clone()
        .or_else(|| env.ci_sha.clone())
        .or_else(|| repo.rev_parse("HEAD").ok())
}

fn resolve_base(repo: &Repository, env: &BuildEnv) -> Option<String> {
    match &env.base_override {
        Some(sha) if !is_all_zero_sha(sha) => Some(sha.clone()),
        _ => default_branch_sha(repo, &env.default_branch),
    }
}

/// Tip of the default branch, preferring the remote-tracking ref.
fn default_branch_sha(repo: &Repository, branch: &str) -> Option<String> {
    let remote = format!("origin/{branch}");
    repo.rev_parse(&remote)
        .or_else(|_| repo.rev_parse(branch))
        .ok()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::process::Command;

    use deckbuild_git::Repository;
    use tempfile::TempDir;

    use super::collect_diff;
    use crate::environment::BuildEnv;

    fn git(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
        let output = Command::new("git").args(args).current_dir(dir).output()?;
        anyhow::ensure!(output.status.success(), "git {args:?} failed");
        Ok(())
    }

    fn commit_all(dir: &Path, message: &str) -> anyhow::Result<()> {
        git(dir, &["add", "-A"])?;
        git(dir, &["commit", "-m", message])
    }

    fn setup_repo() -> anyhow::Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        git(dir.path(), &["init", "--initial-branch=main"])?;
        git(dir.path(), &["config", "user.email", "test@example.com"])?;
        git(dir.path(), &["config", "user.name", "Test"])?;
        git(dir.path(), &["commit", "--allow-empty", "-m", "initial"])?;
        let repo = Repository::new(dir.path());
        Ok((dir, repo))
    }

    fn env_with(head: Option<&str>, base: Option<&str>, default_branch: &str) -> BuildEnv {
        BuildEnv {
            ci: true,
            head_override: head.map(ToString::to_string),
            ci_sha: None,
            base_override: base.map(ToString::to_string),
            default_branch: default_branch.to_string(),
        }
    }

    #[test]
    fn explicit_overrides_define_the_range() -> anyhow::Result<()> {
        let (dir, repo) = setup_repo()?;
        let base = repo.rev_parse("HEAD")?;

        fs::create_dir_all(dir.path().join("packages/alpha"))?;
        fs::write(dir.path().join("packages/alpha/slides.md"), "# Alpha")?;
        commit_all(dir.path(), "Add alpha")?;
        let head = repo.rev_parse("HEAD")?;

        let diff = collect_diff(&repo, &env_with(Some(&head), Some(&base), "main"))
            .expect("diff should resolve");

        assert_eq!(diff.base_sha, base);
        assert_eq!(diff.head_sha, head);
        assert_eq!(diff.changed_files, vec!["packages/alpha/slides.md"]);
        assert!(diff.deleted_manifests.is_empty());
        Ok(())
    }

    #[test]
    fn all_zero_base_falls_back_to_default_branch() -> anyhow::Result<()> {
        let (dir, repo) = setup_repo()?;
        let main_sha = repo.rev_parse("HEAD")?;

        git(dir.path(), &["checkout", "-b", "feature"])?;
        fs::write(dir.path().join("notes.txt"), "notes")?;
        commit_all(dir.path(), "Add notes")?;
        let head = repo.rev_parse("HEAD")?;

        let zeros = "0".repeat(40);
        let diff = collect_diff(&repo, &env_with(Some(&head), Some(&zeros), "main"))
            .expect("diff should resolve");

        assert_eq!(diff.base_sha, main_sha);
        assert_eq!(diff.changed_files, vec!["notes.txt"]);
        Ok(())
    }

    #[test]
    fn missing_head_resolves_from_repository() -> anyhow::Result<()> {
        let (dir, repo) = setup_repo()?;
        let base = repo.rev_parse("HEAD")?;

        fs::write(dir.path().join("notes.txt"), "notes")?;
        commit_all(dir.path(), "Add notes")?;

        let diff = collect_diff(&repo, &env_with(None, Some(&base), "main"))
            .expect("diff should resolve");

        assert_eq!(diff.head_sha, repo.rev_parse("HEAD")?);
        assert_eq!(diff.changed_files, vec!["notes.txt"]);
        Ok(())
    }

    #[test]
    fn identical_shas_yield_an_empty_diff_without_diffing() -> anyhow::Result<()> {
        let (_dir, repo) = setup_repo()?;

        // Not a real commit. Diffing it would fail, so a successful empty
        // result proves no diff command ran.
        let sha = "deadbeef";
        let diff = collect_diff(&repo, &env_with(Some(sha), Some(sha), "main"))
            .expect("identical range short-circuits");

        assert!(diff.changed_files.is_empty());
        assert!(diff.deleted_manifests.is_empty());
        Ok(())
    }

    #[test]
    fn unresolvable_base_returns_none() -> anyhow::Result<()> {
        let (_dir, repo) = setup_repo()?;

        let diff = collect_diff(&repo, &env_with(None, None, "no-such-branch"));

        assert!(diff.is_none());
        Ok(())
    }

    #[test]
    fn bogus_range_returns_none() -> anyhow::Result<()> {
        let (_dir, repo) = setup_repo()?;
        let head = repo.rev_parse("HEAD")?;

        let diff = collect_diff(&repo, &env_with(Some(&head), Some("deadbeef"), "main"));

        assert!(diff.is_none());
        Ok(())
    }

    #[test]
    fn deleted_manifests_are_filtered_to_packages() -> anyhow::Result<()> {
        let (dir, repo) = setup_repo()?;

        fs::create_dir_all(dir.path().join("packages/old"))?;
        fs::write(dir.path().join("packages/old/package.json"), "{}")?;
        fs::write(dir.path().join("packages/old/slides.md"), "# Old")?;
        fs::create_dir_all(dir.path().join("scripts"))?;
        fs::write(dir.path().join("scripts/package.json"), "{}")?;
        commit_all(dir.path(), "Add old deck")?;
        let base = repo.rev_parse("HEAD")?;

        fs::remove_dir_all(dir.path().join("packages/old"))?;
        fs::remove_dir_all(dir.path().join("scripts"))?;
        commit_all(dir.path(), "Remove old deck")?;
        let head = repo.rev_parse("HEAD")?;

        let diff = collect_diff(&repo, &env_with(Some(&head), Some(&base), "main"))
            .expect("diff should resolve");

        assert_eq!(diff.deleted_manifests, vec!["packages/old/package.json"]);
        Ok(())
    }
}
