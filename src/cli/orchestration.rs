//! Main workflow orchestration logic
//!
//! Maps the single action token of the command line onto the version and
//! protection workflows. Argument parsing stays in `main.rs`; everything here
//! can be called programmatically against any [Repository].

use std::fmt;

use crate::analyzer::{NextVersion, Prediction, SkipReason, VersionPredictor};
use crate::config::{Conventions, Settings};
use crate::error::Result;
use crate::git::{prepare_authenticated_remote, Repository};
use crate::protect::{ProtectionOutcome, TagProtector};

/// Recognized action tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Predict the next version and tag HEAD with it
    Version,
    /// Replace the environment's protection tag
    Mark,
}

impl Action {
    /// Exact, case-sensitive match; anything else is `None`
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "version" => Some(Action::Version),
            "mark" => Some(Action::Mark),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Version => write!(f, "version"),
            Action::Mark => write!(f, "mark"),
        }
    }
}

/// Options for the workflows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowOptions {
    /// Preview mode - don't create, delete or push tags
    pub dry_run: bool,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// A version tag was created (or would be, in dry-run mode)
    Tagged {
        version: NextVersion,
        tag: String,
        commit: String,
        pushed: bool,
    },
    /// The predictor decided no tag is warranted
    Skipped(SkipReason),
    /// The protection tag was replaced (or would be, in dry-run mode)
    Protected {
        outcome: ProtectionOutcome,
        pushed: bool,
    },
}

/// Run the workflow behind `action`
pub fn run_action<R: Repository + ?Sized>(
    action: Action,
    repo: &mut R,
    settings: &Settings,
    conventions: &Conventions,
    options: &WorkflowOptions,
) -> Result<WorkflowResult> {
    tracing::debug!("Running action '{}' (dry run: {})", action, options.dry_run);
    match action {
        Action::Version => run_version(repo, settings, conventions, options),
        Action::Mark => run_mark(repo, settings, conventions, options),
    }
}

/// Automatic versioning
///
/// 1. Predict the next version from HEAD and the tag history
/// 2. On a bump, build the authenticated remote
/// 3. Create `<tag-prefix><next>` on HEAD and push it
pub fn run_version<R: Repository + ?Sized>(
    repo: &mut R,
    settings: &Settings,
    conventions: &Conventions,
    options: &WorkflowOptions,
) -> Result<WorkflowResult> {
    let predictor = VersionPredictor::new(conventions)?;

    let version = match predictor.predict_for(&*repo)? {
        Prediction::Skip(reason) => {
            tracing::info!("Skipping automatic versioning: {}", reason);
            return Ok(WorkflowResult::Skipped(reason));
        }
        Prediction::Bump(version) => version,
    };

    let tag = conventions.version_tag(&version.next);

    if options.dry_run {
        let commit = repo.head_commit()?.id;
        return Ok(WorkflowResult::Tagged {
            version,
            tag,
            commit,
            pushed: false,
        });
    }

    let remote = prepare_authenticated_remote(
        &*repo,
        &conventions.remote,
        &settings.credentials,
        &conventions.remote_port_marker,
    )?;
    let commit = repo.create_tag(&tag, None, &remote)?;

    Ok(WorkflowResult::Tagged {
        version,
        tag,
        commit,
        pushed: true,
    })
}

/// Release marking
///
/// Replaces `<release-prefix><environment>` so it points at the configured
/// commit reference.
pub fn run_mark<R: Repository + ?Sized>(
    repo: &mut R,
    settings: &Settings,
    conventions: &Conventions,
    options: &WorkflowOptions,
) -> Result<WorkflowResult> {
    let protector = TagProtector::new(conventions);

    if options.dry_run {
        let tag = protector.protection_name(&settings.environment);
        let commit = repo.resolve_commit(&settings.commit_ref)?.id;
        let replaced = repo.tags()?.iter().any(|existing| existing.name == tag);
        return Ok(WorkflowResult::Protected {
            outcome: ProtectionOutcome {
                tag,
                target: settings.commit_ref.clone(),
                commit,
                replaced,
            },
            pushed: false,
        });
    }

    let remote = prepare_authenticated_remote(
        &*repo,
        &conventions.remote,
        &settings.credentials,
        &conventions.remote_port_marker,
    )?;
    let outcome =
        protector.protect_release(repo, &remote, &settings.environment, &settings.commit_ref)?;

    Ok(WorkflowResult::Protected {
        outcome,
        pushed: true,
    })
}
