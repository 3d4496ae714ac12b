use anyhow::Result;
use clap::Parser;
use gitstamp::cli::{build_request, CliArgs};
use gitstamp::config::{Config, IdentityMode};
use gitstamp::gitstamp_core::domain::{Identity, IdentitySource, ZonePolicy};
use gitstamp::CommitService;
use std::fs;
use tempfile::TempDir;

// Full flow: config file -> CLI overrides -> request -> commit
#[test]
fn test_config_and_cli_drive_a_commit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().join("T1");
    fs::create_dir_all(&repo_path)?;
    let repo = git2::Repository::init(&repo_path)?;
    fs::write(repo_path.join("b.txt"), "feature X")?;

    let config_file = temp_dir.path().join("gitstamp.toml");
    fs::write(
        &config_file,
        r#"
version = 1

[identity]
source = "explicit"
name = "bg"
email = "one@gmail.com"

[date]
zone = "utc"
"#,
    )?;

    let config_arg = config_file.to_string_lossy().to_string();
    let repo_arg = repo_path.to_string_lossy().to_string();
    let cli_args = CliArgs::parse_from([
        "gitstamp",
        repo_arg.as_str(),
        "b.txt",
        "Implemented new feature X",
        "2023-12-31 21:30",
        "--zone",
        "+01:00",
        "--config",
        config_arg.as_str(),
    ]);

    let config = Config::from_cli_and_file(&cli_args)?;
    assert_eq!(config.identity.source, IdentityMode::Explicit);
    assert_eq!(config.date.zone, ZonePolicy::Fixed(60));

    let request = build_request(&cli_args, &config)?;
    assert_eq!(
        request.author,
        IdentitySource::Explicit(Identity::new("bg", "one@gmail.com")?)
    );

    let record = CommitService::new(config.date.zone).commit(&request)?;

    let head = repo.head()?.peel_to_commit()?;
    assert_eq!(head.id().to_string(), record.id);
    assert_eq!(head.author().when().seconds(), 1_704_054_600);
    assert_eq!(head.committer().when().offset_minutes(), 60);
    assert_eq!(head.author().name(), Some("bg"));
    Ok(())
}

#[test]
fn test_request_file_drives_a_commit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().join("repo");
    fs::create_dir_all(&repo_path)?;
    let repo = git2::Repository::init(&repo_path)?;
    fs::write(repo_path.join("b.txt"), "b")?;

    let request_file = temp_dir.path().join("commit.toml");
    fs::write(
        &request_file,
        format!(
            "repository = {:?}\nfile = \"b.txt\"\nmessage = \"From a request file\"\ndate = 2023-12-31T20:30:00Z\n",
            repo_path.to_string_lossy()
        ),
    )?;

    let request_arg = request_file.to_string_lossy().to_string();
    let missing_config = temp_dir.path().join("none.toml").to_string_lossy().to_string();
    let cli_args = CliArgs::parse_from([
        "gitstamp",
        "--request",
        request_arg.as_str(),
        "--author-name",
        "bg",
        "--author-email",
        "one@gmail.com",
        "--config",
        missing_config.as_str(),
    ]);

    let config = Config::from_cli_and_file(&cli_args)?;
    let request = build_request(&cli_args, &config)?;
    CommitService::new(config.date.zone).commit(&request)?;

    let head = repo.head()?.peel_to_commit()?;
    assert_eq!(head.message(), Some("From a request file"));
    assert_eq!(head.author().when().seconds(), 1_704_054_600);
    assert_eq!(head.committer().when().seconds(), 1_704_054_600);
    Ok(())
}
