use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::Bucket;
use crate::content::Content;
use crate::error::{BucketError, Result};

/// Bucket over a base directory on the local filesystem.
pub struct LocalBucket {
    root: PathBuf,
}

impl LocalBucket {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let root = path.as_ref().to_path_buf();
        Self { root }
    }

    /// Open a bucket, creating the base directory if it does not exist.
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `base/key`, or the base directory itself for an empty key. The key is
    /// appended verbatim so a leading `/` does not escape the base.
    fn full_path(&self, key: &str) -> PathBuf {
        if key.is_empty() {
            return self.root.clone();
        }
        let mut path = OsString::from(self.root.as_os_str());
        path.push("/");
        path.push(key);
        PathBuf::from(path)
    }
}

#[async_trait]
impl Bucket for LocalBucket {
    async fn list(&self, folder: Option<&str>) -> Result<Vec<String>> {
        let dir = self.full_path(folder.unwrap_or_default());
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        entries.sort();
        debug!(dir = %dir.display(), count = entries.len(), "listed");
        Ok(entries)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        match tokio::fs::metadata(self.full_path(key)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let data = tokio::fs::read(self.full_path(key)).await?;
        Ok(Bytes::from(data))
    }

    async fn put(&self, key: &str, content: Content) -> Result<()> {
        if key.is_empty() {
            return Err(BucketError::EmptyKey);
        }
        let full = self.full_path(key);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, content.as_bytes()).await?;
        debug!(path = %full.display(), bytes = content.len(), "written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(BucketError::EmptyKey);
        }
        let full = self.full_path(key);
        tokio::fs::remove_file(&full).await?;
        debug!(path = %full.display(), "deleted");
        Ok(())
    }
}
