use crate::domain::{CommitInfo, TagInfo};
use crate::error::{AutoSemverError, Result};
use crate::git::AuthenticatedRemote;
use git2::{Commit, ErrorCode, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            AutoSemverError::repository(format!(
                "not a git repository ({}): {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn find_commit(&self, reference: &str) -> Result<Commit<'_>> {
        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| {
                AutoSemverError::repository(format!(
                    "cannot resolve '{}' to a commit: {}",
                    reference,
                    e.message()
                ))
            })
    }

    fn tag_at(&self, name: &str, reference: &str, force: bool) -> Result<String> {
        let commit = self.find_commit(reference)?;

        self.repo
            .tag_lightweight(name, commit.as_object(), force)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => {
                    AutoSemverError::repository(format!("tag '{}' already exists", name))
                }
                _ => AutoSemverError::repository(format!(
                    "cannot create tag '{}': {}",
                    name,
                    e.message()
                )),
            })?;

        Ok(commit.id().to_string())
    }

    fn push(&self, remote: &AuthenticatedRemote, refspec: &str) -> Result<()> {
        let mut git_remote = self.repo.remote_anonymous(remote.url())?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, _username_from_url, _allowed_types| {
            git2::Cred::userpass_plaintext(
                remote.credentials().user(),
                remote.credentials().token(),
            )
        });

        // The server may accept the connection but reject a single ref
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        tracing::debug!("Pushing {} to {}", refspec, remote.redacted_url());
        git_remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                let message = redact(e.message(), remote.credentials().token());
                match e.class() {
                    git2::ErrorClass::Net => {
                        AutoSemverError::repository(format!("network error during push: {}", message))
                    }
                    git2::ErrorClass::Reference => AutoSemverError::repository(format!(
                        "reference error during push: {}",
                        message
                    )),
                    _ => AutoSemverError::repository(format!(
                        "failed to push '{}': {}",
                        refspec, message
                    )),
                }
            })
    }
}

fn redact(message: &str, secret: &str) -> String {
    if secret.is_empty() {
        message.to_string()
    } else {
        message.replace(secret, "***")
    }
}

fn commit_info(commit: &Commit<'_>) -> CommitInfo {
    CommitInfo::new(
        commit.id().to_string(),
        String::from_utf8_lossy(commit.message_bytes()),
        commit.time().seconds(),
    )
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<CommitInfo> {
        let head = self
            .repo
            .head()
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|e| {
                AutoSemverError::repository(format!("cannot read HEAD commit: {}", e.message()))
            })?;

        Ok(commit_info(&head))
    }

    fn resolve_commit(&self, reference: &str) -> Result<CommitInfo> {
        let commit = self.find_commit(reference)?;
        Ok(commit_info(&commit))
    }

    fn remote_url(&self, remote_name: &str) -> Result<String> {
        let remote = self.repo.find_remote(remote_name).map_err(|e| {
            AutoSemverError::repository(format!(
                "cannot find remote '{}': {}",
                remote_name,
                e.message()
            ))
        })?;

        remote.url().map(|url| url.to_string()).ok_or_else(|| {
            AutoSemverError::repository(format!("remote '{}' has no valid URL", remote_name))
        })
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Tags on trees or blobs carry no version history
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagInfo::new(
                    name,
                    commit.id().to_string(),
                    commit.time().seconds(),
                )),
                Err(e) => tracing::debug!("Ignoring tag '{}': {}", name, e.message()),
            }
        }

        Ok(tags)
    }

    fn create_tag(
        &mut self,
        name: &str,
        from_ref: Option<&str>,
        remote: &AuthenticatedRemote,
    ) -> Result<String> {
        let commit = self.tag_at(name, from_ref.unwrap_or("HEAD"), false)?;
        tracing::info!("Created tag {} at {}", name, commit);

        self.push(remote, &format!("refs/tags/{0}:refs/tags/{0}", name))?;
        tracing::info!("Pushed tag {}", name);
        Ok(commit)
    }

    fn delete_tag(&mut self, name: &str, remote: &AuthenticatedRemote) -> Result<()> {
        self.repo.tag_delete(name).map_err(|e| match e.code() {
            ErrorCode::NotFound => AutoSemverError::tag_not_found(name),
            _ => AutoSemverError::repository(format!(
                "cannot delete tag '{}': {}",
                name,
                e.message()
            )),
        })?;
        tracing::info!("Deleted local tag {}", name);

        self.push(remote, &format!(":refs/tags/{}", name))?;
        tracing::info!("Pushed deletion of tag {}", name);
        Ok(())
    }

    fn move_tag(
        &mut self,
        name: &str,
        from_ref: &str,
        remote: &AuthenticatedRemote,
    ) -> Result<String> {
        let commit = self.tag_at(name, from_ref, true)?;
        tracing::info!("Moved tag {} to {}", name, commit);

        self.push(remote, &format!("+refs/tags/{0}:refs/tags/{0}", name))?;
        tracing::info!("Force-pushed tag {}", name);
        Ok(commit)
    }
}
