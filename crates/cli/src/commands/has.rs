use std::path::Path;

use anyhow::Result;
use clap::Args;

use bucketry_core::Bucket;

use crate::config::AppConfig;

#[derive(Args)]
pub struct HasArgs {
    key: String,
}

pub async fn run(args: HasArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let bucket = config.open_bucket()?;

    let exists = bucket.has(&args.key).await?;
    println!("{exists}");
    if !exists {
        std::process::exit(1);
    }
    Ok(())
}
