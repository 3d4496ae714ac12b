use crate::domain::timestamp::Timestamp;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Author or committer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Build an identity that git can write into a commit header
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();

        if name.is_empty() {
            return Err(CoreError::InvalidIdentity {
                reason: "name is empty".to_string(),
            });
        }
        if email.is_empty() {
            return Err(CoreError::InvalidIdentity {
                reason: "email is empty".to_string(),
            });
        }
        for (field, value) in [("name", &name), ("email", &email)] {
            if value.contains(|c: char| matches!(c, '<' | '>' | '\n' | '\0')) {
                return Err(CoreError::InvalidIdentity {
                    reason: format!("{} '{}' contains '<', '>' or a line break", field, value),
                });
            }
        }

        Ok(Self { name, email })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Where an author or committer identity comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    Explicit(Identity),
    /// `user.name` / `user.email` from the repository configuration
    Repository,
}

/// Identity stamped with a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub identity: Identity,
    pub time: Timestamp,
}

/// A commit created by this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author: Signature,
    pub committer: Signature,
    pub message: String,
    /// Staged path, relative to the working tree
    pub path: PathBuf,
}
