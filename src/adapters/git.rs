use anyhow::{Context, Result};
use git2::{ErrorClass, ErrorCode, Repository as GitRepository};
use gitstamp_core::domain::{Identity, Signature};
use gitstamp_core::error::CoreError;
use gitstamp_core::ports::VcsPort;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Git adapter that implements VcsPort using git2
pub struct GitAdapter {
    repo: GitRepository,
    workdir: PathBuf,
}

impl GitAdapter {
    /// Open the repository at `path`
    ///
    /// Fails with `RepositoryNotFound` when nothing git can open lives there
    /// and with `BareRepository` when there is no working tree to stage from.
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, CoreError> {
        let path = path.as_ref();
        let repo = GitRepository::open(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => CoreError::RepositoryNotFound {
                path: path.to_path_buf(),
            },
            _ => CoreError::Vcs {
                source: anyhow::Error::new(e)
                    .context(format!("Failed to open git repository at {}", path.display())),
            },
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| CoreError::BareRepository {
                path: path.to_path_buf(),
            })?
            .to_path_buf();

        debug!("Opened repository at {}", workdir.display());
        Ok(Self { repo, workdir })
    }

    /// Current `HEAD` commit, `None` on an unborn branch
    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(reference) => {
                let commit = reference
                    .peel_to_commit()
                    .context("Failed to resolve HEAD to a commit")?;
                Ok(Some(commit))
            }
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
            Err(e) => Err(e).context("Failed to read HEAD"),
        }
    }
}

fn to_git_signature(signature: &Signature) -> Result<git2::Signature<'static>> {
    let time = git2::Time::new(signature.time.seconds, signature.time.offset_minutes);
    git2::Signature::new(&signature.identity.name, &signature.identity.email, &time)
        .with_context(|| format!("Invalid signature for {}", signature.identity))
}

impl VcsPort for GitAdapter {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn configured_identity(&self) -> Result<Option<Identity>> {
        let signature = match self.repo.signature() {
            Ok(signature) => signature,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            // libgit2 refuses empty names or names with angle brackets
            Err(e) if e.class() == ErrorClass::Invalid => {
                return Err(CoreError::InvalidIdentity {
                    reason: format!("repository user.name / user.email: {}", e.message()),
                }
                .into())
            }
            Err(e) => return Err(e).context("Failed to read configured identity"),
        };

        match (signature.name(), signature.email()) {
            (Some(name), Some(email)) => Ok(Some(Identity::new(name, email)?)),
            _ => Ok(None),
        }
    }

    fn stage(&mut self, path: &Path) -> Result<()> {
        let mut index = self.repo.index().context("Failed to open index")?;
        index
            .add_path(path)
            .with_context(|| format!("Failed to stage {}", path.display()))?;
        index.write().context("Failed to write index")?;
        debug!("Staged {}", path.display());
        Ok(())
    }

    fn index_matches_head(&self) -> Result<bool> {
        let mut index = self.repo.index().context("Failed to open index")?;
        let tree_id = index.write_tree().context("Failed to write tree from index")?;

        match self.head_commit()? {
            Some(head) => Ok(head.tree_id() == tree_id),
            None => Ok(false),
        }
    }

    fn commit(&mut self, message: &str, author: &Signature, committer: &Signature) -> Result<String> {
        let mut index = self.repo.index().context("Failed to open index")?;
        let tree_id = index.write_tree().context("Failed to write tree from index")?;
        let tree = self.repo.find_tree(tree_id)?;

        let author = to_git_signature(author)?;
        let committer = to_git_signature(committer)?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &author, &committer, message, &tree, &parents)
            .context("Failed to create commit")?;

        Ok(oid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitstamp_core::domain::Timestamp;
    use std::fs;
    use tempfile::TempDir;

    fn signature(seconds: i64, offset_minutes: i32) -> Signature {
        Signature {
            identity: Identity::new("Test User", "test@example.com").unwrap(),
            time: Timestamp::new(seconds, offset_minutes),
        }
    }

    #[test]
    fn test_open_missing_repository() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        match GitAdapter::open(&missing) {
            Err(CoreError::RepositoryNotFound { path }) => assert_eq!(path, missing),
            Err(e) => panic!("expected RepositoryNotFound, got {}", e),
            Ok(_) => panic!("expected RepositoryNotFound"),
        }
    }

    #[test]
    fn test_open_bare_repository() -> Result<()> {
        let temp_dir = TempDir::new()?;
        GitRepository::init_bare(temp_dir.path())?;

        assert!(matches!(
            GitAdapter::open(temp_dir.path()),
            Err(CoreError::BareRepository { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_configured_identity() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let repo = GitRepository::init(temp_dir.path())?;
        let mut config = repo.config()?;
        config.set_str("user.name", "Config User")?;
        config.set_str("user.email", "config@example.com")?;

        let adapter = GitAdapter::open(temp_dir.path())?;
        let identity = adapter.configured_identity()?;
        assert_eq!(
            identity,
            Some(Identity::new("Config User", "config@example.com")?)
        );
        Ok(())
    }

    #[test]
    fn test_malformed_configured_identity() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let repo = GitRepository::init(temp_dir.path())?;
        let mut config = repo.config()?;
        config.set_str("user.name", "Config <User>")?;
        config.set_str("user.email", "config@example.com")?;

        let adapter = GitAdapter::open(temp_dir.path())?;
        let error = match adapter.configured_identity() {
            Err(e) => e,
            Ok(identity) => panic!("expected InvalidIdentity, got {:?}", identity),
        };
        assert!(matches!(
            error.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidIdentity { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_stage_and_commit_with_custom_time() -> Result<()> {
        let temp_dir = TempDir::new()?;
        GitRepository::init(temp_dir.path())?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut adapter = GitAdapter::open(temp_dir.path())?;
        assert!(!adapter.index_matches_head()?);

        adapter.stage(Path::new("a.txt"))?;
        let id = adapter.commit("first", &signature(1_704_054_600, 60), &signature(1_704_054_600, 60))?;

        let repo = GitRepository::open(temp_dir.path())?;
        let commit = repo.find_commit(git2::Oid::from_str(&id)?)?;
        assert_eq!(commit.parent_count(), 0);
        assert_eq!(commit.author().when().seconds(), 1_704_054_600);
        assert_eq!(commit.author().when().offset_minutes(), 60);
        assert_eq!(commit.committer().when().seconds(), 1_704_054_600);
        assert_eq!(commit.message(), Some("first"));

        // Nothing changed since the commit
        adapter.stage(Path::new("a.txt"))?;
        assert!(adapter.index_matches_head()?);

        fs::write(temp_dir.path().join("a.txt"), "hello again")?;
        adapter.stage(Path::new("a.txt"))?;
        assert!(!adapter.index_matches_head()?);
        let second = adapter.commit("second", &signature(1_704_058_200, 0), &signature(1_704_058_200, 0))?;

        let second = repo.find_commit(git2::Oid::from_str(&second)?)?;
        assert_eq!(second.parent_id(0)?, commit.id());
        Ok(())
    }
}
