use crate::domain::{DateInput, IdentitySource};
use std::path::PathBuf;

/// Request to commit one file with a chosen author and committer date
///
/// Repository, file, message and date have no defaults; all four are
/// constructor arguments.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    /// Repository location (working tree root or any path git can open)
    pub repository: PathBuf,

    /// File to stage, relative to the working tree or absolute inside it
    pub file: PathBuf,

    pub message: String,

    pub date: DateInput,

    pub author: IdentitySource,

    /// Committer identity; `None` reuses the author source
    pub committer: Option<IdentitySource>,

    /// Create the commit even when the index already matches `HEAD`
    pub allow_empty: bool,
}

impl CommitRequest {
    pub fn new(
        repository: impl Into<PathBuf>,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
        date: impl Into<DateInput>,
        author: IdentitySource,
    ) -> Self {
        Self {
            repository: repository.into(),
            file: file.into(),
            message: message.into(),
            date: date.into(),
            author,
            committer: None,
            allow_empty: false,
        }
    }

    pub fn with_committer(mut self, committer: IdentitySource) -> Self {
        self.committer = Some(committer);
        self
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn committer_source(&self) -> &IdentitySource {
        self.committer.as_ref().unwrap_or(&self.author)
    }
}
