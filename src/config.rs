use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use gitstamp_core::domain::{Identity, IdentitySource, ZonePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub date: DateConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct IdentityConfig {
    #[serde(default)]
    pub source: IdentityMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// Read `user.name` / `user.email` from the repository configuration
    #[default]
    Repository,
    /// Use `name` / `email` from this file or the command line
    Explicit,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct DateConfig {
    /// Zone for dates written without an offset
    #[serde(default)]
    pub zone: ZonePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            identity: IdentityConfig::default(),
            date: DateConfig::default(),
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "gitstamp")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("gitstamp.toml"))
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn from_cli_and_file(cli_args: &CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config.clone())?;

        // CLI args override config file
        if cli_args.use_repo_identity {
            config.identity.source = IdentityMode::Repository;
        }
        if cli_args.author_name.is_some() || cli_args.author_email.is_some() {
            config.identity.source = IdentityMode::Explicit;
        }
        if let Some(name) = &cli_args.author_name {
            config.identity.name = Some(name.clone());
        }
        if let Some(email) = &cli_args.author_email {
            config.identity.email = Some(email.clone());
        }
        if let Some(name) = &cli_args.committer_name {
            config.identity.committer_name = Some(name.clone());
        }
        if let Some(email) = &cli_args.committer_email {
            config.identity.committer_email = Some(email.clone());
        }
        if let Some(zone) = cli_args.zone {
            config.date.zone = zone;
        }

        Ok(config)
    }

    pub fn author_source(&self) -> Result<IdentitySource> {
        match self.identity.source {
            IdentityMode::Repository => Ok(IdentitySource::Repository),
            IdentityMode::Explicit => match (&self.identity.name, &self.identity.email) {
                (Some(name), Some(email)) => Ok(IdentitySource::Explicit(Identity::new(
                    name.as_str(),
                    email.as_str(),
                )?)),
                _ => bail!("An explicit author identity needs both a name and an email"),
            },
        }
    }

    /// `None` when the committer should match the author
    pub fn committer_source(&self) -> Result<Option<IdentitySource>> {
        match (&self.identity.committer_name, &self.identity.committer_email) {
            (Some(name), Some(email)) => Ok(Some(IdentitySource::Explicit(Identity::new(
                name.as_str(),
                email.as_str(),
            )?))),
            (None, None) => Ok(None),
            _ => bail!("An explicit committer identity needs both a name and an email"),
        }
    }
}
