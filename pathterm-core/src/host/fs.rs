//! Filesystem queries.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Whether a path names a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    File,
    Directory,
}

impl PathKind {
    /// Word used for this kind in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "folder",
        }
    }
}

/// Asynchronous stat queries.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Classify `path`. Fails if it does not exist or cannot be read.
    async fn stat(&self, path: &Path) -> io::Result<PathKind>;
}

/// [`FileSystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<PathKind> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(if metadata.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        })
    }
}
