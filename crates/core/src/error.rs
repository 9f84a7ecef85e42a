use thiserror::Error;

/// Failure of a bucket operation.
///
/// Backend errors pass through unchanged; only the empty-key guard and
/// encoding lookup originate here.
#[derive(Error, Debug)]
pub enum BucketError {
    #[error("key is empty")]
    EmptyKey,

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    S3(#[from] s3::error::S3Error),

    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),
}

impl BucketError {
    /// Whether the backend reported the object as absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            BucketError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            BucketError::S3(s3::error::S3Error::HttpFailWithBody(status, _)) => *status == 404,
            BucketError::ObjectStore(object_store::Error::NotFound { .. }) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BucketError>;
