use std::fmt;

use crate::config::{BranchKeywords, Conventions};
use crate::domain::{BranchKind, CommitInfo, TagInfo, Version, VersionBump, VersionTagMatcher};
use crate::error::Result;
use crate::git::Repository;

/// Why no version tag is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The latest commit is not a merge
    NotAMerge,
    /// The latest version tag already points at the latest commit
    AlreadyTagged { tag: String },
    /// A merge, but of a branch that is neither a fix nor a feature
    UnrecognizedBranch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAMerge => write!(f, "latest commit is not a merge"),
            SkipReason::AlreadyTagged { tag } => {
                write!(f, "latest commit is already tagged as {}", tag)
            }
            SkipReason::UnrecognizedBranch => {
                write!(f, "merged branch is neither a fix nor a feature")
            }
        }
    }
}

/// A decided version change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersion {
    /// Baseline version, `None` when the repository has no version tags yet
    pub previous: Option<Version>,
    pub next: Version,
    /// Applied bump, `None` for the initial version
    pub bump: Option<VersionBump>,
}

impl NextVersion {
    /// Baseline as text, `"None"` when there is none
    pub fn previous_label(&self) -> String {
        self.previous
            .map(|version| version.to_string())
            .unwrap_or_else(|| "None".to_string())
    }
}

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Skip(SkipReason),
    Bump(NextVersion),
}

/// Decides the next version from the latest commit and the tag history
pub struct VersionPredictor {
    merge_marker: String,
    keywords: BranchKeywords,
    matcher: VersionTagMatcher,
    initial_version: Version,
}

impl VersionPredictor {
    /// Create a new version predictor
    pub fn new(conventions: &Conventions) -> Result<Self> {
        Ok(VersionPredictor {
            merge_marker: conventions.merge_marker.clone(),
            keywords: conventions.branches.clone(),
            matcher: VersionTagMatcher::new(&conventions.tag_prefix)?,
            initial_version: conventions.initial_version()?,
        })
    }

    /// Read HEAD and the ordered tags from `repo` and predict
    pub fn predict_for<R: Repository + ?Sized>(&self, repo: &R) -> Result<Prediction> {
        let head = repo.head_commit()?;
        tracing::debug!("Latest commit {}: {}", head.id, head.summary());

        if !head.is_merge(&self.merge_marker) {
            return Ok(Prediction::Skip(SkipReason::NotAMerge));
        }

        let tags = repo.ordered_tags()?;
        self.predict(&head, &tags)
    }

    /// Predict from `head` and `tags`, which must be ordered oldest first
    ///
    /// Tags that are not version tags are ignored.
    pub fn predict(&self, head: &CommitInfo, tags: &[TagInfo]) -> Result<Prediction> {
        if !head.is_merge(&self.merge_marker) {
            return Ok(Prediction::Skip(SkipReason::NotAMerge));
        }

        let last = match tags.iter().rev().find(|tag| self.matcher.matches(&tag.name)) {
            Some(tag) => tag,
            None => {
                tracing::debug!("No version tags yet, starting at {}", self.initial_version);
                return Ok(Prediction::Bump(NextVersion {
                    previous: None,
                    next: self.initial_version,
                    bump: None,
                }));
            }
        };

        if last.target == head.id {
            return Ok(Prediction::Skip(SkipReason::AlreadyTagged {
                tag: last.name.clone(),
            }));
        }

        let previous = self.matcher.parse(&last.name)?;
        let kind = BranchKind::classify(&head.message, &self.keywords);
        tracing::debug!("Baseline {} from {}, merged branch kind {:?}", previous, last.name, kind);

        match kind.bump() {
            Some(bump) => Ok(Prediction::Bump(NextVersion {
                previous: Some(previous),
                next: previous.bump(bump),
                bump: Some(bump),
            })),
            None => Ok(Prediction::Skip(SkipReason::UnrecognizedBranch)),
        }
    }
}
