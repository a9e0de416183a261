use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ProjectError;
use crate::{DIST_DIR, Result, STALE_DIR};

/// Validated public base path of a deck, as declared in `customFields.base`.
///
/// A base path always starts and ends with `/` and contains at least one
/// non-empty segment; segments never navigate upwards. The segments double
/// as the deck's directory below `dist/` and `dist-stale/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
    raw: String,
}

impl BasePath {
    /// Parses and validates a raw `customFields.base` value.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::InvalidBase`] when the value does not have
    /// the required `/segment/.../` shape.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &'static str| ProjectError::InvalidBase {
            value: raw.to_string(),
            reason,
        };

        if !raw.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if !raw.ends_with('/') {
            return Err(invalid("must end with '/'"));
        }
        if raw == "/" {
            return Err(invalid("must contain at least one path segment"));
        }
        for segment in raw[1..raw.len() - 1].split('/') {
            if segment.is_empty() {
                return Err(invalid("must not contain empty path segments"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("must not contain '.' or '..' segments"));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments between the wrapping slashes.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw[1..self.raw.len() - 1].split('/')
    }

    /// Published output directory for this deck below the workspace root.
    #[must_use]
    pub fn dist_dir(&self, workspace_root: &Path) -> PathBuf {
        self.join_under(workspace_root, DIST_DIR)
    }

    /// Cached output directory for this deck below the workspace root.
    #[must_use]
    pub fn stale_dir(&self, workspace_root: &Path) -> PathBuf {
        self.join_under(workspace_root, STALE_DIR)
    }

    fn join_under(&self, workspace_root: &Path, output_root: &str) -> PathBuf {
        let mut dir = workspace_root.join(output_root);
        for segment in self.segments() {
            dir.push(segment);
        }
        dir
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::BasePath;
    use crate::error::ProjectError;

    fn reason(raw: &str) -> &'static str {
        match BasePath::parse(raw) {
            Err(ProjectError::InvalidBase { reason, .. }) => reason,
            other => panic!("expected InvalidBase for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn single_segment_base_parses() {
        let base = BasePath::parse("/alpha/").expect("should parse");

        assert_eq!(base.as_str(), "/alpha/");
        assert_eq!(base.segments().collect::<Vec<_>>(), vec!["alpha"]);
    }

    #[test]
    fn nested_base_parses() {
        let base = BasePath::parse("/talks/2024/intro/").expect("should parse");

        assert_eq!(
            base.segments().collect::<Vec<_>>(),
            vec!["talks", "2024", "intro"]
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(reason("alpha/"), "must start with '/'");
        assert_eq!(reason("/alpha"), "must end with '/'");
        assert_eq!(reason(""), "must start with '/'");
        assert_eq!(reason("/"), "must contain at least one path segment");
        assert_eq!(reason("//"), "must not contain empty path segments");
        assert_eq!(reason("/foo//bar/"), "must not contain empty path segments");
        assert_eq!(reason("/./"), "must not contain '.' or '..' segments");
        assert_eq!(reason("/foo/../"), "must not contain '.' or '..' segments");
    }

    #[test]
    fn dist_dir_nests_segments_below_dist() {
        let base = BasePath::parse("/talks/intro/").expect("should parse");
        let root = Path::new("/ws");

        assert_eq!(base.dist_dir(root), Path::new("/ws/dist/talks/intro"));
        assert_eq!(
            base.stale_dir(root),
            Path::new("/ws/dist-stale/talks/intro")
        );
    }

    #[test]
    fn display_round_trips_the_raw_value() {
        let base = BasePath::parse("/alpha/").expect("should parse");

        assert_eq!(base.to_string(), "/alpha/");
    }
}
