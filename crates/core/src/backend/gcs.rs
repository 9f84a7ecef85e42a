use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use tracing::debug;

use super::{Bucket, exists_from_head, object_path, scope_path};
use crate::content::Content;
use crate::error::Result;
use crate::root::BucketRoot;

/// Bucket over Google Cloud Storage.
pub struct GcsBucket {
    store: Arc<dyn ObjectStore>,
    root: BucketRoot,
}

impl GcsBucket {
    /// Binds a configured client builder to the bucket named by `identifier`
    /// (`bucket` or `bucket/prefix`).
    pub fn new(builder: GoogleCloudStorageBuilder, identifier: &str) -> Result<Self> {
        let root = BucketRoot::parse(identifier);
        let store = builder.with_bucket_name(root.name()).build()?;
        Ok(Self {
            store: Arc::new(store),
            root,
        })
    }

    /// Uses a store already bound to the bucket; only the prefix part of
    /// `identifier` affects keys.
    pub fn with_store(store: Arc<dyn ObjectStore>, identifier: &str) -> Self {
        let root = BucketRoot::parse(identifier);
        Self { store, root }
    }

    pub fn root(&self) -> &BucketRoot {
        &self.root
    }
}

#[async_trait]
impl Bucket for GcsBucket {
    /// Every object under the folder, at any depth.
    async fn list(&self, folder: Option<&str>) -> Result<Vec<String>> {
        let scope = scope_path(&self.root.scope(folder))?;
        let objects: Vec<ObjectMeta> = self.store.list(scope.as_ref()).try_collect().await?;
        debug!(bucket = %self.root, count = objects.len(), "listed");
        Ok(objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let path = object_path(&self.root.key(key))?;
        exists_from_head(self.store.head(&path).await)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = object_path(&self.root.key(key))?;
        let data = self.store.get(&path).await?.bytes().await?;
        debug!(bucket = %self.root, key = %path, bytes = data.len(), "downloaded");
        Ok(data)
    }

    async fn put(&self, key: &str, content: Content) -> Result<()> {
        let path = object_path(&self.root.key(key))?;
        let size = content.len();
        self.store
            .put(&path, PutPayload::from(content.into_bytes()))
            .await?;
        debug!(bucket = %self.root, key = %path, bytes = size, "saved");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = object_path(&self.root.key(key))?;
        self.store.delete(&path).await?;
        debug!(bucket = %self.root, key = %path, "deleted");
        Ok(())
    }
}
