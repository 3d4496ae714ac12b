pub mod commit_service;

pub use commit_service::*;
