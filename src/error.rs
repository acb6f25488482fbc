use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while tracing the module graph or building the manifest
#[derive(Debug, Error)]
pub enum BuildError {
    /// A specifier could not be mapped to a file
    #[error("cannot resolve '{specifier}' imported from {}", from.display())]
    Resolution { specifier: String, from: PathBuf },

    /// A source file could not be read
    #[error("cannot read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The traversal exceeded its module budget
    #[error("module graph exceeds {limit} modules")]
    TooManyModules { limit: usize },

    /// Two distinct files map to one manifest key
    #[error("module key '{key}' maps to both {previous} and {replacement}")]
    KeyCollision {
        key: String,
        previous: String,
        replacement: String,
    },

    /// Malformed invocation
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
