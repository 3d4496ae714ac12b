use anyhow::{bail, Result};
use clap::Parser;
use gitstamp_core::app::CommitRequest;
use gitstamp_core::domain::ZonePolicy;
use std::path::PathBuf;

use crate::adapters::RequestFile;
use crate::config::Config;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitstamp")]
#[command(about = "Commit a single file to a Git repository with a chosen author and committer date")]
pub struct CliArgs {
    /// Path to the Git repository
    #[arg(required_unless_present = "request")]
    pub repo: Option<PathBuf>,

    /// File to stage, relative to the repository root
    #[arg(required_unless_present = "request")]
    pub file: Option<PathBuf>,

    /// Commit message
    #[arg(required_unless_present = "request", allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Author and committer date, e.g. "2023-12-25 10:00" or 2023-12-31T20:30:00Z
    #[arg(required_unless_present = "request")]
    pub date: Option<String>,

    /// Read repository, file, message and date from a TOML request file
    #[arg(long, conflicts_with_all = ["repo", "file", "message", "date"])]
    pub request: Option<PathBuf>,

    /// Author name (switches to an explicit identity)
    #[arg(long)]
    pub author_name: Option<String>,

    /// Author email (switches to an explicit identity)
    #[arg(long)]
    pub author_email: Option<String>,

    /// Committer name (defaults to the author)
    #[arg(long, requires = "committer_email")]
    pub committer_name: Option<String>,

    /// Committer email (defaults to the author)
    #[arg(long, requires = "committer_name")]
    pub committer_email: Option<String>,

    /// Use user.name / user.email from the repository configuration
    #[arg(long, conflicts_with_all = ["author_name", "author_email"])]
    pub use_repo_identity: bool,

    /// Zone for dates without an offset: utc, local or +hh:mm
    #[arg(long, allow_hyphen_values = true)]
    pub zone: Option<ZonePolicy>,

    /// Create the commit even if the file has no changes
    #[arg(long)]
    pub allow_empty: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Turn parsed arguments and the merged config into a commit request
pub fn build_request(cli_args: &CliArgs, config: &Config) -> Result<CommitRequest> {
    let author = config.author_source()?;

    let request = match &cli_args.request {
        Some(path) => RequestFile::load(path)?.into_request(author),
        None => match (&cli_args.repo, &cli_args.file, &cli_args.message, &cli_args.date) {
            (Some(repo), Some(file), Some(message), Some(date)) => {
                CommitRequest::new(repo, file, message, date.as_str(), author)
            }
            _ => bail!("Repository, file, message and date are all required"),
        },
    };

    let request = match config.committer_source()? {
        Some(committer) => request.with_committer(committer),
        None => request,
    };

    Ok(if cli_args.allow_empty {
        request.allow_empty(true)
    } else {
        request
    })
}
