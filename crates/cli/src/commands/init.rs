use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use bucketry_core::LocalBucket;

use crate::config::{AppConfig, BucketConfig};

#[derive(Args)]
pub struct InitArgs {
    /// Backend type: local, s3, gcs or azure
    #[arg(long)]
    backend: String,

    /// Base directory for local backend
    #[arg(long)]
    path: Option<String>,

    /// Bucket identifier (`name` or `name/prefix`) for s3 and gcs
    #[arg(long)]
    bucket: Option<String>,

    /// Container identifier (`name` or `name/prefix`) for azure
    #[arg(long)]
    container: Option<String>,

    /// S3 endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// S3 region
    #[arg(long, default_value = "auto")]
    region: String,

    /// S3 or Azure access key
    #[arg(long)]
    access_key: Option<String>,

    /// S3 secret key
    #[arg(long)]
    secret_key: Option<String>,

    /// GCS service account key file
    #[arg(long)]
    service_account_path: Option<String>,

    /// Azure storage account
    #[arg(long)]
    account: Option<String>,
}

pub async fn run(args: InitArgs, config_path: &Path) -> Result<()> {
    let bucket_config = bucket_config(args)?;

    if let BucketConfig::Local { path } = &bucket_config {
        LocalBucket::init(path).await?;
    }

    let config = AppConfig {
        bucket: bucket_config,
    };
    // fail before writing anything if the backend cannot be opened
    config.open_bucket()?;
    config.save(config_path)?;

    info!(config_path = %config_path.display(), "Config saved");
    println!("Config: {}", config_path.display());
    Ok(())
}

fn bucket_config(args: InitArgs) -> Result<BucketConfig> {
    let config = match args.backend.as_str() {
        "local" => {
            let path = args
                .path
                .ok_or_else(|| anyhow::anyhow!("--path required for local backend"))?;
            BucketConfig::Local { path }
        }
        "s3" => {
            let endpoint = args
                .endpoint
                .ok_or_else(|| anyhow::anyhow!("--endpoint required for S3 backend"))?;
            let bucket = args
                .bucket
                .ok_or_else(|| anyhow::anyhow!("--bucket required for S3 backend"))?;
            let access_key = args
                .access_key
                .ok_or_else(|| anyhow::anyhow!("--access-key required for S3 backend"))?;
            let secret_key = args
                .secret_key
                .ok_or_else(|| anyhow::anyhow!("--secret-key required for S3 backend"))?;
            BucketConfig::S3 {
                endpoint,
                region: args.region,
                bucket,
                access_key,
                secret_key,
            }
        }
        "gcs" => {
            let bucket = args
                .bucket
                .ok_or_else(|| anyhow::anyhow!("--bucket required for GCS backend"))?;
            BucketConfig::Gcs {
                bucket,
                service_account_path: args.service_account_path,
            }
        }
        "azure" => {
            let account = args
                .account
                .ok_or_else(|| anyhow::anyhow!("--account required for Azure backend"))?;
            let container = args
                .container
                .ok_or_else(|| anyhow::anyhow!("--container required for Azure backend"))?;
            BucketConfig::Azure {
                account,
                container,
                access_key: args.access_key,
            }
        }
        other => anyhow::bail!("unknown backend: {other} (supported: local, s3, gcs, azure)"),
    };
    Ok(config)
}
