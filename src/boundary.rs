use std::fmt;

/// Non-fatal conditions worth telling the pipeline log about.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The action token is neither `version` nor `mark`; nothing was done
    UnknownAction { action: String },
    /// There was no protection tag to replace, so one was created fresh
    ProtectionTagMissing { tag: String },
    /// Dry-run mode; the listed change was not applied
    DryRun { change: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnknownAction { action } => {
                write!(
                    f,
                    "Unknown action '{}' (expected 'version' or 'mark'), no action taken",
                    action
                )
            }
            BoundaryWarning::ProtectionTagMissing { tag } => {
                write!(f, "There was no {} tag to replace, creating it", tag)
            }
            BoundaryWarning::DryRun { change } => {
                write!(f, "Dry run, not applied: {}", change)
            }
        }
    }
}
