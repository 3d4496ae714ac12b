pub mod commit;
pub mod timestamp;

// Re-exports for convenience
pub use commit::*;
pub use timestamp::*;
