use crate::config::BranchKeywords;
use crate::domain::VersionBump;

/// Kind of branch a merge commit brought in, read from its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `bugfix/` or `hotfix/` branch
    Fix,
    /// `feature/` branch
    Feature,
    /// A merge that names none of the known branch types
    Unrecognized,
}

impl BranchKind {
    /// Classify a commit message, case-insensitively. Fix keywords are checked first.
    pub fn classify(message: &str, keywords: &BranchKeywords) -> Self {
        let message = message.to_lowercase();
        let table = [
            (BranchKind::Fix, &keywords.patch),
            (BranchKind::Feature, &keywords.minor),
        ];

        table
            .iter()
            .find(|(_, words)| {
                words
                    .iter()
                    .any(|word| !word.is_empty() && message.contains(&word.to_lowercase()))
            })
            .map(|(kind, _)| *kind)
            .unwrap_or(BranchKind::Unrecognized)
    }

    pub fn bump(self) -> Option<VersionBump> {
        match self {
            BranchKind::Fix => Some(VersionBump::Patch),
            BranchKind::Feature => Some(VersionBump::Minor),
            BranchKind::Unrecognized => None,
        }
    }
}
