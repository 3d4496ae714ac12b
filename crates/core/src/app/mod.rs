pub mod commands;
pub mod dates;

pub use commands::*;
pub use dates::*;
