pub mod date;
pub mod vcs;

// Re-exports
pub use date::*;
pub use vcs::*;
