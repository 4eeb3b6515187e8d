#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use auto_semver::git::{AuthenticatedRemote, Credentials};
use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub const BASE_TIME: i64 = 1_700_000_000;

/// A working repository with a bare repository standing in for the server.
pub struct Fixture {
    _dir: TempDir,
    pub work_path: PathBuf,
    pub remote_path: PathBuf,
    pub repo: Repository,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let work_path = dir.path().join("work");
        let remote_path = dir.path().join("remote.git");

        Repository::init_bare(&remote_path).expect("Could not init bare remote");
        let repo = Repository::init(&work_path).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        Fixture {
            _dir: dir,
            work_path,
            remote_path,
            repo,
        }
    }

    /// Commit a change to README.md at a fixed time on top of HEAD
    pub fn commit(&self, message: &str, time: i64) -> Oid {
        let signature = Signature::new("Test User", "test@example.com", &Time::new(time, 0))
            .expect("Could not create signature");

        let content_path = self.work_path.join("README.md");
        fs::write(&content_path, format!("{}\n", message)).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parents: Vec<Commit<'_>> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parent_refs,
            )
            .expect("Could not create commit")
    }

    /// Create a lightweight tag locally only
    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    /// Push target pointing at the bare repository
    pub fn local_remote(&self) -> AuthenticatedRemote {
        AuthenticatedRemote::new(
            self.remote_path.to_str().expect("temp path is not UTF-8"),
            Credentials::new("ci-bot", "s3cret"),
        )
    }

    /// Commit id a tag points at on the bare remote
    pub fn remote_tag(&self, name: &str) -> Option<String> {
        let remote = Repository::open_bare(&self.remote_path).expect("Could not open remote");
        let reference = remote.find_reference(&format!("refs/tags/{}", name)).ok()?;
        let commit = reference.peel_to_commit().ok()?;
        Some(commit.id().to_string())
    }

    pub fn remote_tag_names(&self) -> Vec<String> {
        let remote = Repository::open_bare(&self.remote_path).expect("Could not open remote");
        let names = remote.tag_names(None).expect("Could not list remote tags");
        names.iter().flatten().map(|name| name.to_string()).collect()
    }
}
