pub mod date;
pub mod git;
pub mod request;

pub use date::*;
pub use git::*;
pub use request::*;
