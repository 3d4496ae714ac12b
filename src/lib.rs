//! gitstamp - commit a single file with a chosen author and committer date
//!
//! The commit operation itself lives in [`services::CommitService`]; it
//! talks to Git and to the date parser through the ports defined in
//! `gitstamp-core`, implemented here by [`adapters`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod services;

pub use gitstamp_core;
pub use services::{commit_with_date, CommitService};
