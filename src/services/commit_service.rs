use crate::adapters::{ChronoDateParser, GitAdapter};
use gitstamp_core::app::{normalize_date, CommitRequest};
use gitstamp_core::domain::{CommitRecord, DateInput, Identity, IdentitySource, Signature, ZonePolicy};
use gitstamp_core::error::{CoreError, Result};
use gitstamp_core::ports::{DateParser, VcsPort};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Creates dated commits through the VCS and date parser ports
pub struct CommitService<P: DateParser = ChronoDateParser> {
    parser: P,
    zone: ZonePolicy,
}

impl CommitService<ChronoDateParser> {
    pub fn new(zone: ZonePolicy) -> Self {
        Self::with_parser(ChronoDateParser::new(), zone)
    }
}

impl<P: DateParser> CommitService<P> {
    pub fn with_parser(parser: P, zone: ZonePolicy) -> Self {
        Self { parser, zone }
    }

    /// Open the request's repository with git2 and commit into it
    pub fn commit(&self, request: &CommitRequest) -> Result<CommitRecord> {
        let mut vcs = GitAdapter::open(&request.repository)?;
        self.commit_with(&mut vcs, request)
    }

    /// Stage `request.file` and commit it with the requested date
    ///
    /// Path, date, message and identities are all validated before anything
    /// is staged, so a rejected request leaves the index untouched.
    pub fn commit_with(&self, vcs: &mut dyn VcsPort, request: &CommitRequest) -> Result<CommitRecord> {
        let path = resolve_file(vcs.workdir(), &request.file)?;
        let time = normalize_date(&request.date, &self.parser, self.zone)?;

        if request.message.trim().is_empty() {
            return Err(CoreError::EmptyMessage);
        }

        let author = Signature {
            identity: resolve_identity(vcs, &request.author)?,
            time,
        };
        let committer = Signature {
            identity: resolve_identity(vcs, request.committer_source())?,
            time,
        };

        vcs.stage(&path)?;

        if vcs.index_matches_head()? {
            if !request.allow_empty {
                warn!("{} has no changes to commit", path.display());
                return Err(CoreError::NoChangesToCommit { path });
            }
            debug!("Creating empty commit for {}", path.display());
        }

        let id = vcs.commit(&request.message, &author, &committer)?;
        info!("Committed {} as {} dated {}", path.display(), id, time);

        Ok(CommitRecord {
            id,
            author,
            committer,
            message: request.message.clone(),
            path,
        })
    }
}

/// Commit one file with a chosen date, using git2 and the lenient date parser
///
/// Offset-less dates are taken as UTC.
pub fn commit_with_date(
    repository: impl AsRef<Path>,
    file: impl AsRef<Path>,
    message: &str,
    date: impl Into<DateInput>,
    author: IdentitySource,
) -> Result<CommitRecord> {
    let request = CommitRequest::new(
        repository.as_ref(),
        file.as_ref(),
        message,
        date,
        author,
    );
    CommitService::new(ZonePolicy::Utc).commit(&request)
}

fn resolve_identity(vcs: &dyn VcsPort, source: &IdentitySource) -> Result<Identity> {
    match source {
        IdentitySource::Explicit(identity) => Ok(identity.clone()),
        IdentitySource::Repository => vcs
            .configured_identity()
            .map_err(|e| match e.downcast::<CoreError>() {
                Ok(core) => core,
                Err(source) => CoreError::Vcs { source },
            })?
            .ok_or(CoreError::IdentityNotConfigured),
    }
}

/// Resolve `file` to a path relative to `workdir`
///
/// Relative paths are taken from the working tree root. The target must be
/// an existing regular file inside the working tree and outside `.git`.
fn resolve_file(workdir: &Path, file: &Path) -> Result<PathBuf> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        workdir.join(file)
    };

    if !absolute.is_file() {
        return Err(CoreError::FileNotFound {
            path: file.to_path_buf(),
        });
    }

    let outside = || CoreError::PathOutsideRepository {
        path: file.to_path_buf(),
        workdir: workdir.to_path_buf(),
    };

    // Canonicalize the parent only, so a symlinked file is staged as a link
    let file_name = absolute.file_name().ok_or_else(outside)?;
    let parent = absolute.parent().ok_or_else(outside)?;
    let parent = fs::canonicalize(parent).map_err(|e| CoreError::Vcs { source: e.into() })?;
    let workdir_canonical = fs::canonicalize(workdir).map_err(|e| CoreError::Vcs { source: e.into() })?;

    let relative = parent
        .join(file_name)
        .strip_prefix(&workdir_canonical)
        .map_err(|_| outside())?
        .to_path_buf();

    if relative.components().next() == Some(Component::Normal(".git".as_ref())) {
        return Err(outside());
    }

    Ok(relative)
}
