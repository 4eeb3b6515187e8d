use crate::domain::{CommitInfo, TagInfo};
use crate::error::{AutoSemverError, Result};
use crate::git::{AuthenticatedRemote, Repository};
use std::collections::{BTreeMap, HashMap};

/// Mock repository for testing without actual git operations
///
/// Local tags keep insertion order. Pushes are applied to an in-memory
/// picture of the remote's tags and recorded as refspecs.
pub struct MockRepository {
    commits: HashMap<String, CommitInfo>,
    head: Option<String>,
    tags: Vec<(String, String)>,
    remote_urls: HashMap<String, String>,
    remote_tags: BTreeMap<String, String>,
    pushed: Vec<String>,
    fail_pushes: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            head: None,
            tags: Vec::new(),
            remote_urls: HashMap::new(),
            remote_tags: BTreeMap::new(),
            pushed: Vec::new(),
            fail_pushes: false,
        }
    }

    /// Add a commit to the mock repository
    pub fn add_commit(&mut self, commit: CommitInfo) {
        self.commits.insert(commit.id.clone(), commit);
    }

    /// Add a commit and point HEAD at it
    pub fn commit_head(&mut self, commit: CommitInfo) {
        self.head = Some(commit.id.clone());
        self.add_commit(commit);
    }

    /// Add a local tag pointing at a commit id, already present on the remote
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        let name = name.into();
        let target = target.into();
        self.remote_tags.insert(name.clone(), target.clone());
        self.tags.push((name, target));
    }

    pub fn set_remote_url(&mut self, remote: impl Into<String>, url: impl Into<String>) {
        self.remote_urls.insert(remote.into(), url.into());
    }

    /// Make every following push fail like a network error would
    pub fn fail_pushes(&mut self, fail: bool) {
        self.fail_pushes = fail;
    }

    /// Commit id a local tag points at
    pub fn local_tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, target)| target.as_str())
    }

    /// Commit id a tag points at on the remote
    pub fn remote_tag(&self, name: &str) -> Option<&str> {
        self.remote_tags.get(name).map(String::as_str)
    }

    /// Refspecs pushed so far, oldest first
    pub fn pushed(&self) -> &[String] {
        &self.pushed
    }

    fn push(&mut self, refspec: String) -> Result<()> {
        if self.fail_pushes {
            return Err(AutoSemverError::repository(format!(
                "network error during push: cannot push '{}'",
                refspec
            )));
        }

        let (force, spec) = match refspec.strip_prefix('+') {
            Some(spec) => (true, spec),
            None => (false, refspec.as_str()),
        };
        let (src, dst) = spec.split_once(':').unwrap_or((spec, spec));
        let name = dst.trim_start_matches("refs/tags/").to_string();

        if src.is_empty() {
            self.remote_tags.remove(&name);
        } else {
            let target = self
                .local_tag(&name)
                .map(str::to_string)
                .ok_or_else(|| AutoSemverError::repository(format!("no local tag '{}'", name)))?;
            if !force && self.remote_tags.contains_key(&name) {
                return Err(AutoSemverError::repository(format!(
                    "remote rejected refs/tags/{}: already exists",
                    name
                )));
            }
            self.remote_tags.insert(name, target);
        }

        self.pushed.push(refspec);
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<CommitInfo> {
        self.head
            .as_ref()
            .and_then(|id| self.commits.get(id))
            .cloned()
            .ok_or_else(|| AutoSemverError::repository("cannot read HEAD commit"))
    }

    fn resolve_commit(&self, reference: &str) -> Result<CommitInfo> {
        if reference == "HEAD" {
            return self.head_commit();
        }

        let id = self.local_tag(reference).unwrap_or(reference);
        self.commits.get(id).cloned().ok_or_else(|| {
            AutoSemverError::repository(format!("cannot resolve '{}' to a commit", reference))
        })
    }

    fn remote_url(&self, remote_name: &str) -> Result<String> {
        self.remote_urls
            .get(remote_name)
            .cloned()
            .ok_or_else(|| AutoSemverError::repository(format!("cannot find remote '{}'", remote_name)))
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        self.tags
            .iter()
            .map(|(name, target)| {
                let commit = self.commits.get(target).ok_or_else(|| {
                    AutoSemverError::repository(format!("tag '{}' points at unknown commit", name))
                })?;
                Ok(TagInfo::new(name.clone(), target.clone(), commit.time))
            })
            .collect()
    }

    fn create_tag(
        &mut self,
        name: &str,
        from_ref: Option<&str>,
        _remote: &AuthenticatedRemote,
    ) -> Result<String> {
        if self.local_tag(name).is_some() {
            return Err(AutoSemverError::repository(format!(
                "tag '{}' already exists",
                name
            )));
        }

        let commit = self.resolve_commit(from_ref.unwrap_or("HEAD"))?;
        self.tags.push((name.to_string(), commit.id.clone()));
        self.push(format!("refs/tags/{0}:refs/tags/{0}", name))?;
        Ok(commit.id)
    }

    fn delete_tag(&mut self, name: &str, _remote: &AuthenticatedRemote) -> Result<()> {
        let position = self
            .tags
            .iter()
            .position(|(tag, _)| tag == name)
            .ok_or_else(|| AutoSemverError::tag_not_found(name))?;

        self.tags.remove(position);
        self.push(format!(":refs/tags/{}", name))
    }

    fn move_tag(
        &mut self,
        name: &str,
        from_ref: &str,
        _remote: &AuthenticatedRemote,
    ) -> Result<String> {
        let commit = self.resolve_commit(from_ref)?;
        match self.tags.iter_mut().find(|(tag, _)| tag == name) {
            Some(entry) => entry.1 = commit.id.clone(),
            None => self.tags.push((name.to_string(), commit.id.clone())),
        }
        self.push(format!("+refs/tags/{0}:refs/tags/{0}", name))?;
        Ok(commit.id)
    }
}
