pub mod compaction;
pub mod errors;

pub use errors::*;
