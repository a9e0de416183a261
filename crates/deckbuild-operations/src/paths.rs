use deckbuild_project::PACKAGES_DIR;

/// Path prefixes whose changes affect every deck.
const SHARED_PREFIXES: &[&str] = &["scripts/", "dist/"];

/// Root-level files whose changes affect every deck.
const SHARED_FILES: &[&str] = &[
    "package.json",
    "bun.lock",
    "tsconfig.json",
    "prettier.config.js",
];

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Whether a changed path belongs to the shared build infrastructure.
///
/// A hit forces a rebuild of every deck, since shared scripts and root
/// configuration feed into all of them.
#[must_use]
pub fn is_shared_resource(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let normalized = normalize(path);
    SHARED_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
        || SHARED_FILES.contains(&normalized.as_str())
}

/// Extracts the deck package name from a path below the packages
/// directory. The first path segment after `packages/` is the name.
#[must_use]
pub fn package_name(path: &str) -> Option<String> {
    let normalized = normalize(path);
    let rest = normalized.strip_prefix(PACKAGES_DIR)?.strip_prefix('/')?;
    let name = rest.split('/').next().filter(|name| !name.is_empty())?;
    Some(name.to_string())
}
