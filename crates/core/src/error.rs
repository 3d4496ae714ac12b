use std::path::PathBuf;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Repository not found: {}", path.display())]
    RepositoryNotFound { path: PathBuf },

    #[error("Repository has no working tree: {}", path.display())]
    BareRepository { path: PathBuf },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Path {} is outside the working tree {}", path.display(), workdir.display())]
    PathOutsideRepository { path: PathBuf, workdir: PathBuf },

    #[error("Invalid commit date format: {input}")]
    InvalidDateFormat { input: String },

    #[error("Commit date is not a usable timestamp: {detail}")]
    InvalidTimestampType { detail: String },

    #[error("No identity configured for this repository (set user.name and user.email)")]
    IdentityNotConfigured,

    #[error("Invalid identity: {reason}")]
    InvalidIdentity { reason: String },

    #[error("Commit message is empty")]
    EmptyMessage,

    /// The whole staged tree equals `HEAD`'s tree after staging `path`.
    /// Changes staged beforehand for other paths count as changes and are
    /// committed along with `path`, as `git commit` would.
    #[error("No changes to commit for {}", path.display())]
    NoChangesToCommit { path: PathBuf },

    #[error("Version control error: {source}")]
    Vcs {
        #[from]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
