pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod manifest;
pub mod resolve;
pub mod types;

pub use error::BuildError;
pub use types::{DependencyRecord, EntryFile};
