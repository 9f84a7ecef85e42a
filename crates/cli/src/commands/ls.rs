use std::path::Path;

use anyhow::Result;
use clap::Args;

use bucketry_core::Bucket;

use crate::config::AppConfig;

#[derive(Args)]
pub struct LsArgs {
    /// Folder to list (defaults to the bucket root)
    folder: Option<String>,

    /// Print a JSON array instead of one entry per line
    #[arg(long)]
    json: bool,
}

pub async fn run(args: LsArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let bucket = config.open_bucket()?;

    let entries = bucket.list(args.folder.as_deref()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{entry}");
        }
    }
    Ok(())
}
