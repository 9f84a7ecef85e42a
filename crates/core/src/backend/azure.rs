use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::{ObjectStore, PutPayload};
use tracing::debug;

use super::{Bucket, exists_from_head, object_path, scope_path};
use crate::content::Content;
use crate::error::Result;
use crate::root::BucketRoot;

/// Bucket over an Azure Blob Storage container.
pub struct AzureBucket {
    container: Arc<dyn ObjectStore>,
    root: BucketRoot,
}

impl AzureBucket {
    /// Binds a configured account client to the container named by
    /// `identifier` (`container` or `container/prefix`).
    pub fn new(builder: MicrosoftAzureBuilder, identifier: &str) -> Result<Self> {
        let root = BucketRoot::parse(identifier);
        let container = builder.with_container_name(root.name()).build()?;
        Ok(Self {
            container: Arc::new(container),
            root,
        })
    }

    /// Uses a store already bound to the container; only the prefix part of
    /// `identifier` affects keys.
    pub fn with_store(container: Arc<dyn ObjectStore>, identifier: &str) -> Self {
        let root = BucketRoot::parse(identifier);
        Self { container, root }
    }

    pub fn root(&self) -> &BucketRoot {
        &self.root
    }
}

#[async_trait]
impl Bucket for AzureBucket {
    /// Blobs directly below the folder, then one entry per virtual
    /// sub-folder. All result pages are drained.
    async fn list(&self, folder: Option<&str>) -> Result<Vec<String>> {
        let scope = scope_path(&self.root.scope(folder))?;
        let listing = self.container.list_with_delimiter(scope.as_ref()).await?;
        let entries: Vec<String> = listing
            .objects
            .into_iter()
            .map(|blob| blob.location.to_string())
            .chain(listing.common_prefixes.into_iter().map(|p| p.to_string()))
            .collect();
        debug!(bucket = %self.root, count = entries.len(), "listed");
        Ok(entries)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let path = object_path(&self.root.key(key))?;
        exists_from_head(self.container.head(&path).await)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = object_path(&self.root.key(key))?;
        let body = self.container.get(&path).await?.bytes().await?;
        debug!(bucket = %self.root, key = %path, bytes = body.len(), "downloaded");
        Ok(body)
    }

    async fn put(&self, key: &str, content: Content) -> Result<()> {
        let path = object_path(&self.root.key(key))?;
        let size = content.len();
        self.container
            .put(&path, PutPayload::from(content.into_bytes()))
            .await?;
        debug!(bucket = %self.root, key = %path, bytes = size, "uploaded");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = object_path(&self.root.key(key))?;
        self.container.delete(&path).await?;
        debug!(bucket = %self.root, key = %path, "deleted");
        Ok(())
    }
}
