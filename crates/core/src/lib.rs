pub mod backend;
pub mod content;
pub mod error;
pub mod root;

pub use backend::Bucket;
pub use backend::azure::AzureBucket;
pub use backend::gcs::GcsBucket;
pub use backend::local::LocalBucket;
pub use backend::s3::S3Bucket;
pub use content::{Content, TextEncoding};
pub use error::{BucketError, Result};
pub use root::BucketRoot;
