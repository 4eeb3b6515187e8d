use crate::domain::Version;
use crate::error::{AutoSemverError, Result};
use regex::Regex;

/// A tag together with the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    /// Full hex id of the tagged commit (annotated tags already peeled).
    pub target: String,
    /// Commit time of `target`, seconds since the Unix epoch.
    pub time: i64,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, target: impl Into<String>, time: i64) -> Self {
        TagInfo {
            name: name.into(),
            target: target.into(),
            time,
        }
    }
}

/// Recognises version tags (e.g. `v1.2.3`) among all tags of a repository.
#[derive(Debug, Clone)]
pub struct VersionTagMatcher {
    regex: Regex,
}

impl VersionTagMatcher {
    /// Build a matcher for tags named `<prefix>MAJOR.MINOR.PATCH`, prefix case-insensitive.
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r"(?i)^{}(\d+\.\d+\.\d+)$", regex::escape(prefix));
        let regex = Regex::new(&pattern)
            .map_err(|e| AutoSemverError::configuration(format!("invalid tag prefix: {}", e)))?;
        Ok(VersionTagMatcher { regex })
    }

    pub fn matches(&self, tag_name: &str) -> bool {
        self.regex.is_match(tag_name)
    }

    /// Extract the version from a tag name, e.g. `v1.2.3` -> 1.2.3
    pub fn parse(&self, tag_name: &str) -> Result<Version> {
        let captures = self.regex.captures(tag_name).ok_or_else(|| {
            AutoSemverError::version(format!("'{}' is not a version tag", tag_name))
        })?;
        Version::parse(&captures[1])
    }
}
