pub mod azure;
pub mod gcs;
pub mod local;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::{self, Path};

use crate::content::{Content, TextEncoding};
use crate::error::Result;

/// Key-value object storage, one implementation per backend.
///
/// All keys are relative to the bucket root and its optional prefix.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Entries one level below `folder`, or below the bucket root when `None`.
    async fn list(&self, folder: Option<&str>) -> Result<Vec<String>>;

    /// `false` only when the backend reports the object as absent.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Full object content as raw bytes.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Full object content decoded with `encoding`.
    async fn get_text(&self, key: &str, encoding: TextEncoding) -> Result<String> {
        let data = self.get(key).await?;
        Ok(encoding.decode(&data))
    }

    /// Write or overwrite the whole object.
    async fn put(&self, key: &str, content: Content) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// Store path for a backend key. The key must already be in the store's
/// canonical form; `Path::parse` would otherwise drop a leading or trailing
/// `/` and address a different object.
pub(crate) fn object_path(key: &str) -> Result<Path> {
    let parsed = Path::parse(key).map_err(object_store::Error::from)?;
    let canonical: &str = parsed.as_ref();
    if key.is_empty() || canonical != key {
        return Err(object_store::Error::from(path::Error::EmptySegment {
            path: key.to_string(),
        })
        .into());
    }
    Ok(parsed)
}

/// Listing scope for an object store, `None` at the store root. Scopes end in
/// a single `/`, which is not part of the store path.
pub(crate) fn scope_path(scope: &str) -> Result<Option<Path>> {
    if scope.is_empty() {
        Ok(None)
    } else {
        object_path(scope.strip_suffix('/').unwrap_or(scope)).map(Some)
    }
}

/// Object-store HEAD outcome: `NotFound` means absent, anything else
/// propagates.
pub(crate) fn exists_from_head<T>(head: object_store::Result<T>) -> Result<bool> {
    match head {
        Ok(_) => Ok(true),
        Err(object_store::Error::NotFound { .. }) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BucketError;

    #[test]
    fn head_not_found_is_false() {
        assert!(exists_from_head(Ok(())).unwrap());

        let missing: object_store::Result<()> = Err(object_store::Error::NotFound {
            path: "file1.txt".to_string(),
            source: "404 The specified blob does not exist".into(),
        });
        assert!(!exists_from_head(missing).unwrap());
    }

    #[test]
    fn head_other_failures_propagate() {
        let denied: object_store::Result<()> = Err(object_store::Error::Generic {
            store: "GCS",
            source: "403 Forbidden".into(),
        });
        let err = exists_from_head(denied).unwrap_err();
        assert!(matches!(
            err,
            BucketError::ObjectStore(object_store::Error::Generic { store: "GCS", .. })
        ));
        assert!(!err.is_not_found());

        let generic: object_store::Result<()> = Err(object_store::Error::Generic {
            store: "MicrosoftAzure",
            source: "connection reset".into(),
        });
        assert!(exists_from_head(generic).is_err());
    }

    #[test]
    fn object_paths_are_not_rewritten() {
        assert_eq!(object_path("sub/file1.txt").unwrap().as_ref(), "sub/file1.txt");
        assert!(object_path("sub//file1.txt").is_err());
        assert!(object_path("../file1.txt").is_err());
        assert_eq!(scope_path("").unwrap(), None);
        assert_eq!(
            scope_path("sub/folder/").unwrap().unwrap().as_ref(),
            "sub/folder"
        );
    }

    #[test]
    fn keys_with_outer_slashes_are_rejected() {
        for key in ["/file1.txt", "folder/", "sub/", ""] {
            let err = object_path(key).unwrap_err();
            assert!(
                matches!(
                    err,
                    BucketError::ObjectStore(object_store::Error::InvalidPath { .. })
                ),
                "{key:?}"
            );
        }
    }

    #[test]
    fn scope_rejects_doubled_trailing_slash() {
        assert!(scope_path("folder//").is_err());
        assert!(scope_path("/folder/").is_err());
    }
}
