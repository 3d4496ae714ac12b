use crate::domain::{Identity, Signature};
use anyhow::Result;
use std::path::Path;

/// Port for the version-control operations a dated commit needs
///
/// Implementations are opened on one repository with a working tree.
pub trait VcsPort {
    /// Root of the working tree
    fn workdir(&self) -> &Path;

    /// Identity configured for the repository, if any
    fn configured_identity(&self) -> Result<Option<Identity>>;

    /// Add the file at `path` (relative to the working tree) to the index
    fn stage(&mut self, path: &Path) -> Result<()>;

    /// Whether the index tree is identical to the tree of `HEAD`
    fn index_matches_head(&self) -> Result<bool>;

    /// Commit the index on top of `HEAD` and return the new commit id
    fn commit(&mut self, message: &str, author: &Signature, committer: &Signature) -> Result<String>;
}
