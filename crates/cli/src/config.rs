use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use s3::creds::Credentials;
use s3::region::Region;
use serde::{Deserialize, Serialize};

use bucketry_core::{AzureBucket, Bucket, GcsBucket, LocalBucket, S3Bucket};

const CONFIG_FILE: &str = "bucketry.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bucket: BucketConfig,
}

/// Backend selection. `bucket`/`container` take an identifier of the form
/// `name` or `name/prefix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BucketConfig {
    #[serde(rename = "local")]
    Local { path: String },
    #[serde(rename = "s3")]
    S3 {
        endpoint: String,
        region: String,
        bucket: String,
        access_key: String,
        secret_key: String,
    },
    #[serde(rename = "gcs")]
    Gcs {
        bucket: String,
        service_account_path: Option<String>,
    },
    #[serde(rename = "azure")]
    Azure {
        account: String,
        container: String,
        access_key: Option<String>,
    },
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bucketry")
            .join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("config not found at {}", path.display()))?;
        toml::from_str(&content).context("failed to parse config")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn open_bucket(&self) -> Result<Arc<dyn Bucket>> {
        match &self.bucket {
            BucketConfig::Local { path } => Ok(Arc::new(LocalBucket::new(path))),
            BucketConfig::S3 {
                endpoint,
                region,
                bucket,
                access_key,
                secret_key,
            } => {
                let region = Region::Custom {
                    region: region.clone(),
                    endpoint: endpoint.clone(),
                };
                let credentials = Credentials::new(
                    Some(access_key.as_str()),
                    Some(secret_key.as_str()),
                    None,
                    None,
                    None,
                )?;
                let bucket = S3Bucket::new(region, credentials, bucket)
                    .with_context(|| format!("failed to open S3 bucket {bucket}"))?;
                Ok(Arc::new(bucket))
            }
            BucketConfig::Gcs {
                bucket,
                service_account_path,
            } => {
                let mut builder = GoogleCloudStorageBuilder::from_env();
                if let Some(path) = service_account_path {
                    builder = builder.with_service_account_path(path);
                }
                let bucket = GcsBucket::new(builder, bucket)
                    .with_context(|| format!("failed to open GCS bucket {bucket}"))?;
                Ok(Arc::new(bucket))
            }
            BucketConfig::Azure {
                account,
                container,
                access_key,
            } => {
                let mut builder = MicrosoftAzureBuilder::from_env().with_account(account);
                if let Some(key) = access_key {
                    builder = builder.with_access_key(key);
                }
                let bucket = AzureBucket::new(builder, container)
                    .with_context(|| format!("failed to open Azure container {container}"))?;
                Ok(Arc::new(bucket))
            }
        }
    }
}
