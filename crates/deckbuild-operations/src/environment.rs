/// Snapshot of the environment variables driving change detection.
///
/// Read once at startup and passed through the pipeline, so no other code
/// consults the process environment.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    /// Whether the run is change-aware. Only set by GitHub Actions.
    pub ci: bool,
    /// Explicit head commit override.
    pub head_override: Option<String>,
    /// Commit the CI run was triggered for.
    pub ci_sha: Option<String>,
    /// Explicit base commit override. May be an all-zero placeholder for
    /// branches without prior history.
    pub base_override: Option<String>,
    /// Branch diffed against when no usable base override exists.
    pub default_branch: String,
}

impl BuildEnv {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            ci: std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true"),
            head_override: non_empty_var("HEAD_SHA"),
            ci_sha: non_empty_var("GITHUB_SHA"),
            base_override: non_empty_var("BASE_SHA"),
            default_branch: std::env::var("DEFAULT_BRANCH").unwrap_or_else(|_| "main".to_string()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Whether `sha` is the all-zero placeholder CI sends for refs that did not
/// exist before the push.
#[must_use]
pub fn is_all_zero_sha(sha: &str) -> bool {
    !sha.is_empty() && sha.bytes().all(|b| b == b'0')
}
