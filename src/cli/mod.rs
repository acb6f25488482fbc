mod args;
mod build;

pub use args::Args;
pub use build::{expand_entries, package_name, run_build, BuildSummary, MAIN_FILE, MANIFEST_FILE};
