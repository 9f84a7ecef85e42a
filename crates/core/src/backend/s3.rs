use async_trait::async_trait;
use bytes::Bytes;
use s3::bucket::Bucket as RemoteBucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use tracing::{debug, warn};

use super::Bucket;
use crate::content::Content;
use crate::error::Result;
use crate::root::BucketRoot;

const DELIMITER: &str = "/";

/// Bucket over an S3-compatible object store.
pub struct S3Bucket {
    client: Box<RemoteBucket>,
    root: BucketRoot,
}

impl S3Bucket {
    /// `identifier` is `bucket` or `bucket/prefix`.
    pub fn new(region: Region, credentials: Credentials, identifier: &str) -> Result<Self> {
        let root = BucketRoot::parse(identifier);
        let client = RemoteBucket::new(root.name(), region, credentials)?.with_path_style();
        Ok(Self { client, root })
    }

    /// Uses a client already bound to the bucket; only the prefix part of
    /// `identifier` affects keys.
    pub fn with_client(client: Box<RemoteBucket>, identifier: &str) -> Self {
        let root = BucketRoot::parse(identifier);
        Self { client, root }
    }

    pub fn root(&self) -> &BucketRoot {
        &self.root
    }
}

#[async_trait]
impl Bucket for S3Bucket {
    /// Reads a single page only. Entries beyond the first page are not
    /// returned; a truncated page is logged.
    async fn list(&self, folder: Option<&str>) -> Result<Vec<String>> {
        let scope = self.root.scope(folder);
        let (page, _) = self
            .client
            .list_page(scope.clone(), Some(DELIMITER.to_string()), None, None, None)
            .await?;
        if page.is_truncated {
            warn!(bucket = %self.root, scope = %scope, "listing truncated after first page");
        }
        let entries = listing_entries(
            page.contents.into_iter().map(|object| object.key),
            page.common_prefixes
                .unwrap_or_default()
                .into_iter()
                .map(|common| common.prefix),
        );
        debug!(bucket = %self.root, scope = %scope, count = entries.len(), "listed");
        Ok(entries)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let full = self.root.key(key);
        let head = self.client.head_object(&full).await.map(|(_, status)| status);
        exists_from_head(head)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let full = self.root.key(key);
        let response = self.client.get_object(&full).await?;
        debug!(bucket = %self.root, key = %full, "fetched");
        Ok(Bytes::from(response.to_vec()))
    }

    async fn put(&self, key: &str, content: Content) -> Result<()> {
        let full = self.root.key(key);
        self.client.put_object(&full, content.as_bytes()).await?;
        debug!(bucket = %self.root, key = %full, bytes = content.len(), "written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let full = self.root.key(key);
        self.client.delete_object(&full).await?;
        debug!(bucket = %self.root, key = %full, "deleted");
        Ok(())
    }
}

/// Object keys followed by common prefixes with the trailing delimiter
/// stripped.
fn listing_entries(
    keys: impl IntoIterator<Item = String>,
    common_prefixes: impl IntoIterator<Item = String>,
) -> Vec<String> {
    keys.into_iter()
        .chain(common_prefixes.into_iter().map(|prefix| {
            prefix
                .strip_suffix(DELIMITER)
                .map(str::to_string)
                .unwrap_or(prefix)
        }))
        .collect()
}

/// HTTP 404 on HEAD means absent; any other failure propagates.
fn exists_from_head(head: std::result::Result<u16, S3Error>) -> Result<bool> {
    match head {
        Ok(404) | Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
        Ok(_) => Ok(true),
        Err(e) => Err(e.into()),
    }
}
