//! Environment protection tags (`release-<environment>`).
//!
//! A protection tag marks the commit currently deployed to an environment.
//! It is replaced on every release rather than moved in place. With the
//! default [ProtectStrategy::DeleteThenCreate] the tag does not exist for the
//! moment between the deletion push and the creation push; readers asking
//! for the current release in that window see no tag at all.
//! [ProtectStrategy::ForceMove] avoids the gap with a single forced ref update.

use crate::config::{Conventions, ProtectStrategy};
use crate::error::Result;
use crate::git::{AuthenticatedRemote, Repository};

/// What a protection run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionOutcome {
    /// Full protection tag name
    pub tag: String,
    /// Reference the tag was asked to point at
    pub target: String,
    /// Commit id the tag now points at
    pub commit: String,
    /// Whether a previous tag of that name was replaced
    pub replaced: bool,
}

/// Replaces an environment's protection tag
pub struct TagProtector {
    release_prefix: String,
    strategy: ProtectStrategy,
}

impl TagProtector {
    pub fn new(conventions: &Conventions) -> Self {
        TagProtector {
            release_prefix: conventions.release_prefix.clone(),
            strategy: conventions.protection.strategy,
        }
    }

    /// Protection tag name for `environment`
    pub fn protection_name(&self, environment: &str) -> String {
        format!("{}{}", self.release_prefix, environment)
    }

    /// Point `<release-prefix><environment>` at `target_ref` and push it.
    ///
    /// A missing previous tag is not an error; every other failure is.
    pub fn protect_release<R: Repository + ?Sized>(
        &self,
        repo: &mut R,
        remote: &AuthenticatedRemote,
        environment: &str,
        target_ref: &str,
    ) -> Result<ProtectionOutcome> {
        let tag = self.protection_name(environment);

        let (commit, replaced) = match self.strategy {
            ProtectStrategy::DeleteThenCreate => {
                let replaced = match repo.delete_tag(&tag, remote) {
                    Ok(()) => true,
                    Err(e) if e.is_tag_not_found() => {
                        tracing::warn!("No existing {} tag to replace", tag);
                        false
                    }
                    Err(e) => return Err(e),
                };
                (repo.create_tag(&tag, Some(target_ref), remote)?, replaced)
            }
            ProtectStrategy::ForceMove => {
                let replaced = repo.tags()?.iter().any(|existing| existing.name == tag);
                (repo.move_tag(&tag, target_ref, remote)?, replaced)
            }
        };

        tracing::info!("Protection tag {} now points at {}", tag, commit);
        Ok(ProtectionOutcome {
            tag,
            target: target_ref.to_string(),
            commit,
            replaced,
        })
    }
}
