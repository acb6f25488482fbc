use async_trait::async_trait;
use std::path::Path;

use crate::error::{BuildError, Result};

/// Supplies module source text
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String>;
}

/// Reads sources from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

#[async_trait]
impl SourceReader for FsReader {
    async fn read(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BuildError::SourceRead {
                path: path.to_path_buf(),
                source,
            })
    }
}
