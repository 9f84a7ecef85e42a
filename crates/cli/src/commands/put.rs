use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bucketry_core::{Bucket, Content};

use crate::config::AppConfig;

#[derive(Args)]
pub struct PutArgs {
    key: String,

    /// Upload the bytes of a file
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    file: Option<PathBuf>,

    /// Upload a string as UTF-8 text
    #[arg(long)]
    text: Option<String>,
}

pub async fn run(args: PutArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let bucket = config.open_bucket()?;

    let content = match (args.file, args.text) {
        (Some(path), _) => Content::from(
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, Some(text)) => Content::from(text),
        (None, None) => anyhow::bail!("--file or --text required"),
    };
    let size = content.len();

    bucket
        .put(&args.key, content)
        .await
        .with_context(|| format!("failed to put {}", args.key))?;
    info!(key = %args.key, bytes = size, "Object stored");
    Ok(())
}
