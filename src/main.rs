use anyhow::Result;
use clap::Parser;
use gitstamp::cli::{build_request, CliArgs};
use gitstamp::config::Config;
use gitstamp::services::CommitService;
use tracing::{error, info};

fn main() -> Result<()> {
    // Initialize tracing with env filter; stdout is kept for the commit summary
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli_args = CliArgs::parse();
    let config = Config::from_cli_and_file(&cli_args)?;
    let request = build_request(&cli_args, &config)?;

    info!(
        "Committing {} in {} (zone {})",
        request.file.display(),
        request.repository.display(),
        config.date.zone
    );

    let service = CommitService::new(config.date.zone);
    let record = match service.commit(&request) {
        Ok(record) => record,
        Err(err) => {
            error!("Commit failed: {}", err);
            return Err(err.into());
        }
    };

    println!("{}", record.id);
    println!("Author:    {} {}", record.author.identity, record.author.time);
    println!("Committer: {} {}", record.committer.identity, record.committer.time);
    Ok(())
}
