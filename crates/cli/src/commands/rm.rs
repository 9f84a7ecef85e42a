use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bucketry_core::Bucket;

use crate::config::AppConfig;

#[derive(Args)]
pub struct RmArgs {
    key: String,
}

pub async fn run(args: RmArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let bucket = config.open_bucket()?;

    bucket
        .delete(&args.key)
        .await
        .with_context(|| format!("failed to delete {}", args.key))?;
    info!(key = %args.key, "Object deleted");
    Ok(())
}
